//! Tests for candidate expansion, neighbourhood fetching and recompute

#[cfg(test)]
mod tests {
    use hextile::algorithm::bitset::DependencyMask;
    use hextile::algorithm::executor::{
        AutoTiler, PAD_LAYERS, candidate_cells, evaluate, gather_neighborhood,
    };
    use hextile::algorithm::pattern::CellState;
    use hextile::algorithm::rule::Rule;
    use hextile::algorithm::ruleset::RuleSet;
    use hextile::spatial::{CellId, Orientation, SparseGrid, TileLayer, TilePlacement};

    fn grid(cells: &[(CellId, i32)]) -> SparseGrid {
        cells.iter().copied().collect()
    }

    fn centre_rule(value: i32, tile: i32) -> Rule {
        Rule::new(tile)
            .with_cell(CellId::ZERO, CellState::Type(value))
            .unwrap()
    }

    // Tests populated cells are always candidates and pads add their rings
    // Verified by not shifting the pad centre by the layer
    #[test]
    fn test_candidate_cells() {
        let source = grid(&[(CellId::new(4, 0, 0), 1)]);

        let none = candidate_cells(&source, &[None; PAD_LAYERS]);
        assert_eq!(none.into_iter().collect::<Vec<_>>(), vec![CellId::new(4, 0, 0)]);

        // Layer +1 pad: candidates sit one level below the populated cell
        let mut pads = [None; PAD_LAYERS];
        pads[3] = Some(1);
        let candidates = candidate_cells(&source, &pads);
        assert_eq!(candidates.len(), 8);
        assert!(candidates.contains(&CellId::new(4, 0, -1)));
        assert!(candidates.contains(&CellId::new(5, 0, -1)));
        assert!(!candidates.contains(&CellId::new(5, 0, 0)));
    }

    // Tests populated cells outside the 16-bit range are ignored
    // Verified by skipping the bounds check
    #[test]
    fn test_candidate_cells_skip_out_of_range() {
        let source = grid(&[(CellId::new(40000, 0, 0), 1), (CellId::ZERO, 1)]);
        let candidates = candidate_cells(&source, &[None; PAD_LAYERS]);
        assert_eq!(candidates.into_iter().collect::<Vec<_>>(), vec![CellId::ZERO]);
    }

    // Tests only masked slots are fetched
    // Verified by fetching every slot regardless of mask
    #[test]
    fn test_gather_neighborhood_respects_mask() {
        let source = grid(&[(CellId::ZERO, 1), (CellId::UP, 2), (CellId::new(1, 0, 0), 3)]);

        let mut mask = DependencyMask::new();
        mask.mark_slot(0);
        let values = gather_neighborhood(&source, CellId::ZERO, &mask);
        assert_eq!(values[0], Some(1));
        assert_eq!(values[1], None);

        let values = gather_neighborhood(&source, CellId::ZERO, &DependencyMask::all());
        assert_eq!(values[1], Some(2));
        assert_eq!(values[5], Some(3));

        let values = gather_neighborhood(&source, CellId::DOWN, &DependencyMask::all());
        assert_eq!(values[1], Some(1));
        assert_eq!(values[3], Some(2));
    }

    // Tests no enabled rules yields no output
    // Verified by evaluating disabled rules
    #[test]
    fn test_evaluate_without_enabled_rules() {
        let source = grid(&[(CellId::ZERO, 3)]);
        assert!(evaluate(&RuleSet::new(), &source).placements.is_empty());

        let mut rule_set = RuleSet::new();
        let id = rule_set.add(centre_rule(3, 1)).unwrap();
        rule_set.set_enabled(id, false).unwrap();

        let evaluation = evaluate(&rule_set, &source);
        assert!(evaluation.placements.is_empty());
        assert_eq!(evaluation.stats.source_cells, 1);
        assert_eq!(evaluation.stats.candidates, 0);
    }

    // Tests malformed rules are skipped while the rest still apply
    // Verified by applying malformed rules
    #[test]
    fn test_evaluate_skips_malformed_rules() {
        let mut rule_set = RuleSet::new();
        rule_set
            .add(
                Rule::new(9)
                    .with_cell(CellId::UP, CellState::Invalid)
                    .unwrap(),
            )
            .unwrap();
        rule_set.add(centre_rule(3, 1)).unwrap();

        let source = grid(&[(CellId::ZERO, 3)]);
        let evaluation = evaluate(&rule_set, &source);

        assert_eq!(evaluation.stats.skipped_rules, 1);
        assert_eq!(
            evaluation.placements,
            vec![TilePlacement {
                cell: CellId::ZERO,
                tile: 1,
                orientation: Orientation::Upright0,
            }]
        );
    }

    // Tests the first matching rule in priority order wins
    // Verified by letting later rules overwrite earlier matches
    #[test]
    fn test_evaluate_priority() {
        let mut rule_set = RuleSet::new();
        let first = rule_set.add(centre_rule(3, 1)).unwrap();
        let second = rule_set
            .add(
                Rule::new(2)
                    .with_cell(CellId::ZERO, CellState::NotEmpty)
                    .unwrap(),
            )
            .unwrap();

        let source = grid(&[(CellId::ZERO, 3), (CellId::new(5, 0, 0), 4)]);
        let evaluation = evaluate(&rule_set, &source);
        let tiles: Vec<i32> = evaluation.placements.iter().map(|p| p.tile).collect();
        assert_eq!(tiles, vec![1, 2]);

        rule_set.reorder(vec![second, first]).unwrap();
        let evaluation = evaluate(&rule_set, &source);
        let tiles: Vec<i32> = evaluation.placements.iter().map(|p| p.tile).collect();
        assert_eq!(tiles, vec![2, 2]);
    }

    // Tests a cell painted -1 is evaluated as a populated cell
    // Verified by dropping cells whose value is -1
    #[test]
    fn test_evaluate_negative_one_value() {
        let mut rule_set = RuleSet::new();
        rule_set.add(centre_rule(-1, 4)).unwrap();

        let evaluation = evaluate(&rule_set, &grid(&[(CellId::ZERO, -1)]));
        assert_eq!(
            evaluation.placements,
            vec![TilePlacement {
                cell: CellId::ZERO,
                tile: 4,
                orientation: Orientation::Upright0,
            }]
        );
    }

    // Tests the tiler replaces its output on every trigger
    // Verified by appending without clearing
    #[test]
    fn test_auto_tiler_recompute_replaces_output() {
        let mut rule_set = RuleSet::new();
        let id = rule_set.add(centre_rule(3, 1)).unwrap();
        let mut tiler = AutoTiler::new(rule_set, TileLayer::new());

        let mut source = grid(&[(CellId::ZERO, 3), (CellId::UP, 3)]);
        let stats = tiler.on_source_changed(&source);
        assert_eq!(stats.placements, 2);
        assert_eq!(tiler.output().len(), 2);

        source.erase(CellId::UP);
        tiler.on_source_changed(&source);
        assert_eq!(tiler.output().len(), 1);
        assert_eq!(tiler.last_stats().placements, 1);

        tiler.rules_mut().set_enabled(id, false).unwrap();
        tiler.on_ruleset_changed(&source);
        assert!(tiler.output().is_empty());

        let (rules, output) = tiler.into_parts();
        assert_eq!(rules.len(), 1);
        assert!(output.is_empty());
    }

    // Tests empty-centre rules reach unpainted cells through the search pad
    // Verified by dropping pad expansion from the candidate set
    #[test]
    fn test_auto_tiler_empty_centre_on_vec_output() {
        let rule = Rule::new(8)
            .with_cell(CellId::ZERO, CellState::Empty)
            .unwrap()
            .with_cell(CellId::UP, CellState::Type(2))
            .unwrap();
        let mut rule_set = RuleSet::new();
        rule_set.add(rule).unwrap();

        let mut tiler = AutoTiler::new(rule_set, Vec::<TilePlacement>::new());
        tiler.recompute(&grid(&[(CellId::new(3, 3, 1), 2)]));

        assert_eq!(
            tiler.output(),
            &vec![TilePlacement {
                cell: CellId::new(3, 3, 0),
                tile: 8,
                orientation: Orientation::Upright0,
            }]
        );
    }
}
