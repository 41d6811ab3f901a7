//! Full-grid rule evaluation
//!
//! Every trigger recomputes from scratch:
//! 1. Union the fetch masks and per-layer search pads of the enabled rules.
//! 2. Build the candidate set: every populated cell, plus every cell within
//!    a pad's radius of a populated cell shifted down by the pad's layer.
//! 3. For each candidate, fetch the masked neighbourhood and take the first
//!    rule in priority order that matches.
//! 4. Clear the presentation layer and set every placement in one call.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::algorithm::bitset::DependencyMask;
use crate::algorithm::pattern::PATTERN_OFFSETS;
use crate::algorithm::rule::{Neighborhood, Rule};
use crate::algorithm::ruleset::RuleSet;
use crate::io::configuration::{MAX_LAYER_OFFSET, PATTERN_SIZE};
use crate::spatial::{
    CellId, Orientation, Planes, PresentationGrid, RadialIter, SourceGrid, TilePlacement,
};

/// Number of vertical layers a search pad can target, `-2..=2`
pub const PAD_LAYERS: usize = (2 * MAX_LAYER_OFFSET + 1) as usize;

/// Counters describing one recompute
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    /// Populated cells in the source grid
    pub source_cells: usize,
    /// Cells evaluated against the rules
    pub candidates: usize,
    /// Tiles emitted
    pub placements: usize,
    /// Enabled rules refused because of malformed slots
    pub skipped_rules: usize,
}

/// Result of evaluating a rule set against a source grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// One placement per matched cell, in cell order
    pub placements: Vec<TilePlacement>,
    /// Counters for this evaluation
    pub stats: RecomputeStats,
}

/// Enabled, well-formed rules and their unioned requirements
struct ActiveRules<'a> {
    rules: Vec<&'a Rule>,
    mask: DependencyMask,
    pads: [Option<u32>; PAD_LAYERS],
    skipped: usize,
}

impl<'a> ActiveRules<'a> {
    fn collect(rule_set: &'a RuleSet) -> Self {
        let mut active = Self {
            rules: Vec::with_capacity(rule_set.len()),
            mask: DependencyMask::new(),
            pads: [None; PAD_LAYERS],
            skipped: 0,
        };

        for rule in rule_set.iter().filter(|rule| rule.enabled) {
            if rule.is_malformed() {
                warn!(rule = rule.id, "skipping rule with an invalid pattern slot");
                active.skipped += 1;
                continue;
            }

            active.mask.union_with(rule.mask());
            if let Some(pad) = rule.search_pad() {
                let layer = usize::try_from(pad.layer + MAX_LAYER_OFFSET).ok();
                if let Some(widest) = layer.and_then(|index| active.pads.get_mut(index)) {
                    *widest = Some(widest.map_or(pad.radius, |radius| radius.max(pad.radius)));
                }
            }
            active.rules.push(rule);
        }

        active
    }

    fn first_match(&self, values: &Neighborhood) -> Option<(&'a Rule, Orientation)> {
        self.rules
            .iter()
            .find_map(|&rule| rule.matches(values).map(|orientation| (rule, orientation)))
    }
}

/// Cells the rules are evaluated against
///
/// Populated cells outside the 16-bit range are never candidates.
pub fn candidate_cells<S: SourceGrid>(
    source: &S,
    pads: &[Option<u32>; PAD_LAYERS],
) -> BTreeSet<CellId> {
    let mut candidates = BTreeSet::new();

    for (cell, _) in source.cells() {
        if !cell.in_bounds() {
            continue;
        }
        candidates.insert(cell);

        for (layer, radius) in (-MAX_LAYER_OFFSET..).zip(pads.iter()) {
            let Some(radius) = *radius else {
                continue;
            };
            let center = cell - CellId::new(0, 0, layer);
            candidates.extend(RadialIter::new(center, radius, Planes::HORIZONTAL));
        }
    }

    candidates
}

/// Fetch the masked neighbourhood of `cell`; unmasked slots stay `None`
pub fn gather_neighborhood<S: SourceGrid>(
    source: &S,
    cell: CellId,
    mask: &DependencyMask,
) -> Neighborhood {
    let mut values: Neighborhood = [None; PATTERN_SIZE];
    for (slot, (value, &offset)) in values.iter_mut().zip(PATTERN_OFFSETS.iter()).enumerate() {
        if mask.contains(slot) {
            *value = source.get(cell + offset);
        }
    }
    values
}

/// Evaluate every enabled rule against the source grid
///
/// Pure with respect to its inputs: the same rules and grid always produce
/// the same placements in the same order.
pub fn evaluate<S: SourceGrid>(rule_set: &RuleSet, source: &S) -> Evaluation {
    let active = ActiveRules::collect(rule_set);
    let mut stats = RecomputeStats {
        source_cells: source.cells().count(),
        skipped_rules: active.skipped,
        ..RecomputeStats::default()
    };

    if active.rules.is_empty() {
        debug!(?stats, "no enabled rules, nothing to place");
        return Evaluation {
            placements: Vec::new(),
            stats,
        };
    }

    let candidates = candidate_cells(source, &active.pads);
    stats.candidates = candidates.len();

    let placements: Vec<TilePlacement> = candidates
        .into_iter()
        .filter_map(|cell| {
            let values = gather_neighborhood(source, cell, &active.mask);
            active
                .first_match(&values)
                .map(|(rule, orientation)| TilePlacement {
                    cell,
                    tile: rule.tile,
                    orientation,
                })
        })
        .collect();
    stats.placements = placements.len();

    debug!(?stats, "evaluated rule set");
    Evaluation { placements, stats }
}

/// Owns a rule set and the presentation layer it drives
///
/// The host calls [`on_source_changed`](Self::on_source_changed) after
/// painting and [`on_ruleset_changed`](Self::on_ruleset_changed) after any
/// rule edit. Both perform the same full recompute.
#[derive(Clone, Debug, Default)]
pub struct AutoTiler<P: PresentationGrid> {
    rules: RuleSet,
    output: P,
    last_stats: RecomputeStats,
}

impl<P: PresentationGrid> AutoTiler<P> {
    /// Attach a rule set to a presentation layer
    pub fn new(rules: RuleSet, output: P) -> Self {
        Self {
            rules,
            output,
            last_stats: RecomputeStats::default(),
        }
    }

    /// Current rule set
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Mutable rule set; follow edits with [`on_ruleset_changed`](Self::on_ruleset_changed)
    pub const fn rules_mut(&mut self) -> &mut RuleSet {
        &mut self.rules
    }

    /// Presentation layer as of the last recompute
    pub const fn output(&self) -> &P {
        &self.output
    }

    /// Counters from the last recompute
    pub const fn last_stats(&self) -> RecomputeStats {
        self.last_stats
    }

    /// Release the rule set and presentation layer
    pub fn into_parts(self) -> (RuleSet, P) {
        (self.rules, self.output)
    }

    /// Rebuild the presentation layer from scratch
    ///
    /// Placements are computed in full before the layer is touched, then the
    /// layer is cleared and bulk-set.
    pub fn recompute<S: SourceGrid>(&mut self, source: &S) -> RecomputeStats {
        let evaluation = evaluate(&self.rules, source);
        self.output.clear();
        self.output.set_cells(&evaluation.placements);
        self.last_stats = evaluation.stats;
        evaluation.stats
    }

    /// Painted values changed
    pub fn on_source_changed<S: SourceGrid>(&mut self, source: &S) -> RecomputeStats {
        self.recompute(source)
    }

    /// Rules were added, updated, deleted, reordered or toggled
    pub fn on_ruleset_changed<S: SourceGrid>(&mut self, source: &S) -> RecomputeStats {
        self.recompute(source)
    }
}
