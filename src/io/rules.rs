//! Serialized rule records
//!
//! A rule is stored as its id, tile, enabled flag and a map from relative
//! offset (written `(q, r, y)`) to a cell record. Disabled slots are omitted.
//! Reading never fails on a bad cell: unknown offsets are dropped and
//! unrecognized state tags degrade to [`CellState::Invalid`], each with a
//! warning, so a damaged rule can be inspected but never matches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::algorithm::pattern::CellState;
use crate::algorithm::rule::{Rule, RuleId};
use crate::algorithm::ruleset::RuleSet;
use crate::spatial::CellId;

const STATE_DISABLED: &str = "disabled";
const STATE_EMPTY: &str = "empty";
const STATE_NOT_EMPTY: &str = "not_empty";
const STATE_TYPE: &str = "type";
const STATE_NOT_TYPE: &str = "not_type";
const STATE_INVALID: &str = "invalid";

/// Classification of one slot as stored on disk
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// One of `empty`, `not_empty`, `disabled`, `type`, `not_type`
    pub state: String,
    /// Payload for `type` and `not_type`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

impl CellRecord {
    /// Decode into a cell state
    ///
    /// Returns `None` for an unrecognized tag or a `type`/`not_type` record
    /// without its payload.
    pub fn to_state(&self) -> Option<CellState> {
        match (self.state.as_str(), self.value) {
            (STATE_DISABLED, _) => Some(CellState::Disabled),
            (STATE_EMPTY, _) => Some(CellState::Empty),
            (STATE_NOT_EMPTY, _) => Some(CellState::NotEmpty),
            (STATE_TYPE, Some(value)) => Some(CellState::Type(value)),
            (STATE_NOT_TYPE, Some(value)) => Some(CellState::NotType(value)),
            _ => None,
        }
    }
}

impl From<CellState> for CellRecord {
    fn from(state: CellState) -> Self {
        let (tag, value) = match state {
            CellState::Disabled => (STATE_DISABLED, None),
            CellState::Empty => (STATE_EMPTY, None),
            CellState::NotEmpty => (STATE_NOT_EMPTY, None),
            CellState::Type(value) => (STATE_TYPE, Some(value)),
            CellState::NotType(value) => (STATE_NOT_TYPE, Some(value)),
            CellState::Invalid => (STATE_INVALID, None),
        };
        Self {
            state: tag.to_string(),
            value,
        }
    }
}

const fn unassigned_id() -> RuleId {
    Rule::ID_NOT_SET
}

const fn enabled_by_default() -> bool {
    true
}

/// One rule as stored on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Rule id; omitted ids are allocated on load
    #[serde(default = "unassigned_id")]
    pub id: RuleId,
    /// Output tile
    pub tile: i32,
    /// Whether the engine applies this rule
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Classified slots keyed by relative offset
    #[serde(default)]
    pub cells: BTreeMap<String, CellRecord>,
}

impl RuleRecord {
    /// Build a rule from this record
    ///
    /// Keys that do not parse or fall outside the footprint are skipped. An
    /// unreadable state is kept as [`CellState::Invalid`].
    pub fn into_rule(self) -> Rule {
        let mut rule = Rule::new(self.tile).with_id(self.id);
        rule.enabled = self.enabled;

        for (key, record) in &self.cells {
            let offset = match key.parse::<CellId>() {
                Ok(offset) => offset,
                Err(error) => {
                    warn!(rule = self.id, %key, %error, "skipping unreadable cell key");
                    continue;
                }
            };

            let state = record.to_state().unwrap_or_else(|| {
                warn!(
                    rule = self.id,
                    %offset,
                    state = %record.state,
                    "unrecognized cell state, marking slot invalid"
                );
                CellState::Invalid
            });

            if let Err(error) = rule.set_cell(offset, state) {
                warn!(rule = self.id, %error, "skipping cell outside the pattern");
            }
        }

        rule
    }
}

impl Rule {
    /// Serializable form of this rule, enabled slots only
    pub fn to_record(&self) -> RuleRecord {
        RuleRecord {
            id: self.id,
            tile: self.tile,
            enabled: self.enabled,
            cells: self
                .cells()
                .map(|(offset, state)| (offset.to_string(), CellRecord::from(state)))
                .collect(),
        }
    }
}

impl RuleSet {
    /// Records in priority order
    pub fn to_records(&self) -> Vec<RuleRecord> {
        self.iter().map(Rule::to_record).collect()
    }

    /// Rebuild a rule set whose priority follows the record order
    ///
    /// Explicit ids are claimed before any omitted id is allocated, so an
    /// early record without an id cannot take the id of a later one. Records
    /// repeating an id are skipped with a warning.
    pub fn from_records(records: Vec<RuleRecord>) -> Self {
        let mut rule_set = Self::new();

        let (explicit, unassigned): (Vec<_>, Vec<_>) = records
            .into_iter()
            .map(RuleRecord::into_rule)
            .enumerate()
            .partition(|(_, rule)| rule.id != Rule::ID_NOT_SET);

        let mut placed = Vec::with_capacity(explicit.len() + unassigned.len());
        for (position, rule) in explicit.into_iter().chain(unassigned) {
            match rule_set.add(rule) {
                Ok(id) => placed.push((position, id)),
                Err(error) => warn!(position, %error, "skipping rule record"),
            }
        }

        placed.sort_unstable_by_key(|&(position, _)| position);
        if let Err(error) = rule_set.reorder(placed.into_iter().map(|(_, id)| id).collect()) {
            warn!(%error, "keeping insertion order for loaded rules");
        }

        rule_set
    }
}
