//! Tests for rule editing, derived dependencies and rotation matching

#[cfg(test)]
mod tests {
    use hextile::TileError;
    use hextile::algorithm::pattern::{CellState, get_pattern_index, rotation_tables};
    use hextile::algorithm::rule::{Neighborhood, Rule, SearchPad, derive};
    use hextile::io::configuration::{MAX_LAYER_OFFSET, MAX_SEARCH_RADIUS, PATTERN_SIZE};
    use hextile::spatial::{CellId, Orientation};
    use proptest::prelude::*;

    fn slot(q: i32, r: i32, y: i32) -> usize {
        get_pattern_index(CellId::new(q, r, y)).unwrap()
    }

    fn neighborhood(values: &[(usize, i32)]) -> Neighborhood {
        let mut neighborhood = [None; PATTERN_SIZE];
        for &(slot, value) in values {
            neighborhood[slot] = Some(value);
        }
        neighborhood
    }

    // Tests on-axis slots set single mask bits and bound the visit length
    // Verified by marking a ring for on-axis slots
    #[test]
    fn test_derive_on_axis() {
        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Type(3);
        pattern[2] = CellState::Empty;

        let dependencies = derive(&pattern);
        assert_eq!(dependencies.mask.to_vec(), vec![0, 2]);
        assert_eq!(dependencies.visit_len, 3);
        assert_eq!(dependencies.pad, None);
    }

    // Tests any ring slot pulls in its whole ring
    // Verified by marking only the configured slot
    #[test]
    fn test_derive_marks_whole_ring() {
        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[slot(-1, 2, 0)] = CellState::NotEmpty;

        let dependencies = derive(&pattern);
        assert_eq!(dependencies.mask.to_vec(), (11..23).collect::<Vec<_>>());
        assert_eq!(dependencies.visit_len, slot(-1, 2, 0) + 1);
    }

    // Tests search pads sized from the anchoring slot's layer and radius
    // Verified by swapping layer and radius in the pad
    #[test]
    fn test_derive_search_pad() {
        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Empty;
        pattern[slot(1, 0, 0)] = CellState::Type(5);
        assert_eq!(derive(&pattern).pad, Some(SearchPad { layer: 0, radius: 1 }));

        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Empty;
        pattern[1] = CellState::NotEmpty;
        assert_eq!(derive(&pattern).pad, Some(SearchPad { layer: 1, radius: 0 }));

        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Empty;
        pattern[slot(0, -2, 0)] = CellState::NotType(1);
        assert_eq!(derive(&pattern).pad, Some(SearchPad { layer: 0, radius: 2 }));

        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Empty;
        pattern[slot(0, 1, -1)] = CellState::Type(2);
        assert_eq!(derive(&pattern).pad, Some(SearchPad { layer: -1, radius: 1 }));
    }

    // Tests every footprint slot yields a pad inside the configured limits
    // Verified by dropping the radius limit check
    #[test]
    fn test_search_pad_for_slot_limits() {
        for slot in 0..PATTERN_SIZE {
            let pad = SearchPad::for_slot(slot).unwrap();
            assert!(pad.radius <= MAX_SEARCH_RADIUS);
            assert!(pad.layer.abs() <= MAX_LAYER_OFFSET);
        }
        assert_eq!(
            SearchPad::for_slot(slot(2, -1, 0)),
            Some(SearchPad { layer: 0, radius: 2 })
        );
        assert_eq!(SearchPad::for_slot(PATTERN_SIZE), None);
    }

    // Tests only the first anchoring slot sizes the pad
    // Verified by taking the widest anchoring slot
    #[test]
    fn test_derive_search_pad_first_anchor_only() {
        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Empty;
        pattern[1] = CellState::Type(1);
        pattern[slot(2, 0, 0)] = CellState::Type(1);

        assert_eq!(derive(&pattern).pad, Some(SearchPad { layer: 1, radius: 0 }));
    }

    // Tests no pad without an empty centre or without an anchor
    // Verified by deriving a pad whenever any slot anchors
    #[test]
    fn test_derive_without_pad() {
        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::NotEmpty;
        pattern[slot(1, 0, 0)] = CellState::Type(5);
        assert_eq!(derive(&pattern).pad, None);

        let mut pattern = [CellState::Disabled; PATTERN_SIZE];
        pattern[0] = CellState::Empty;
        pattern[slot(1, 0, 0)] = CellState::Empty;
        assert_eq!(derive(&pattern).pad, None);
    }

    // Tests editing keeps derived data current
    // Verified by skipping the re-derive in set_cell
    #[test]
    fn test_edits_rederive() {
        let mut rule = Rule::new(7);
        assert!(rule.mask().is_empty());

        rule.set_cell(CellId::ZERO, CellState::Empty).unwrap();
        rule.set_cell(CellId::new(0, 1, 0), CellState::Type(2)).unwrap();
        assert_eq!(rule.mask().count(), 7);
        assert_eq!(rule.search_pad(), Some(SearchPad { layer: 0, radius: 1 }));
        assert_eq!(rule.cell(CellId::new(0, 1, 0)), Some(CellState::Type(2)));

        rule.clear_cell(CellId::new(0, 1, 0)).unwrap();
        assert_eq!(rule.mask().to_vec(), vec![0]);
        assert_eq!(rule.search_pad(), None);

        rule.clear_pattern();
        assert!(rule.mask().is_empty());
        assert_eq!(rule.cells().count(), 0);
    }

    // Tests an offset outside the footprint is refused without changes
    // Verified by clamping the offset into the footprint
    #[test]
    fn test_invalid_offset_leaves_pattern() {
        let mut rule = Rule::new(1)
            .with_cell(CellId::ZERO, CellState::NotEmpty)
            .unwrap();
        let before = rule.clone();

        let result = rule.set_cell(CellId::new(3, 0, 0), CellState::Empty);
        assert!(matches!(result, Err(TileError::InvalidOffset { .. })));
        assert_eq!(rule, before);

        assert!(rule.set_slot(PATTERN_SIZE, CellState::Empty).is_err());
        assert_eq!(rule.cell(CellId::new(0, 0, 5)), None);
    }

    // Tests the enabled cells listing
    // Verified by listing disabled slots too
    #[test]
    fn test_cells_lists_enabled_only() {
        let rule = Rule::new(1)
            .with_id(4)
            .with_cell(CellId::UP, CellState::Empty)
            .unwrap()
            .with_cell(CellId::new(-1, 0, 0), CellState::NotType(2))
            .unwrap();

        assert_eq!(rule.id, 4);
        let cells: Vec<(CellId, CellState)> = rule.cells().collect();
        assert_eq!(
            cells,
            vec![
                (CellId::UP, CellState::Empty),
                (CellId::new(-1, 0, 0), CellState::NotType(2)),
            ]
        );
    }

    // Tests a centre-only rule matches upright
    // Verified by starting the rotation search at 60 degrees
    #[test]
    fn test_match_centre() {
        let rule = Rule::new(1)
            .with_cell(CellId::ZERO, CellState::Type(3))
            .unwrap();

        assert_eq!(
            rule.matches(&neighborhood(&[(0, 3)])),
            Some(Orientation::Upright0)
        );
        assert_eq!(rule.matches(&neighborhood(&[(0, 4)])), None);
        assert_eq!(rule.matches(&neighborhood(&[])), None);
    }

    // Tests a ring constraint matches under the rotation that aligns it
    // Verified by comparing against the unrotated slot
    #[test]
    fn test_match_reports_rotation() {
        let rule = Rule::new(1)
            .with_cell(CellId::new(1, 0, 0), CellState::Type(5))
            .unwrap();

        assert_eq!(
            rule.matches(&neighborhood(&[(slot(1, 0, 0), 5)])),
            Some(Orientation::Upright0)
        );
        assert_eq!(
            rule.matches(&neighborhood(&[(slot(0, 1, 0), 5)])),
            Some(Orientation::Upright60)
        );
        assert_eq!(
            rule.matches(&neighborhood(&[(slot(1, -1, 0), 5)])),
            Some(Orientation::Upright300)
        );
        assert_eq!(rule.matches(&neighborhood(&[(slot(2, 0, 0), 5)])), None);
    }

    // Tests an on-axis mismatch fails every rotation at once
    // Verified by continuing to the next rotation on axis mismatch
    #[test]
    fn test_on_axis_mismatch_fails_all_rotations() {
        let rule = Rule::new(1)
            .with_cell(CellId::new(1, 0, 0), CellState::Type(5))
            .unwrap()
            .with_cell(CellId::UP, CellState::Empty)
            .unwrap();

        let values = neighborhood(&[(slot(0, 1, 0), 5), (1, 9)]);
        assert_eq!(rule.matches(&values), None);
    }

    // Tests invalid slots pass matching but mark the rule malformed
    // Verified by rejecting invalid slots inside matches
    #[test]
    fn test_invalid_slot() {
        let rule = Rule::new(1)
            .with_cell(CellId::ZERO, CellState::Invalid)
            .unwrap();
        assert!(rule.is_malformed());
        assert_eq!(rule.matches(&neighborhood(&[])), Some(Orientation::Upright0));
        assert!(!Rule::new(1).is_malformed());
    }

    fn state_strategy() -> impl Strategy<Value = CellState> {
        prop_oneof![
            Just(CellState::Empty),
            Just(CellState::NotEmpty),
            (0i32..3).prop_map(CellState::Type),
            (0i32..3).prop_map(CellState::NotType),
        ]
    }

    proptest! {
        #[test]
        fn prop_match_rotation_invariance(
            slots in prop::collection::vec((5usize..PATTERN_SIZE, state_strategy()), 1..4),
            values in prop::collection::vec(prop::option::of(0i32..3), PATTERN_SIZE),
        ) {
            let mut rule = Rule::new(1);
            for (slot, state) in slots {
                prop_assert!(rule.set_slot(slot, state).is_ok());
            }

            let values: Neighborhood = std::array::from_fn(|slot| values.get(slot).copied().flatten());
            if let Some(orientation) = rule.matches(&values) {
                let table = &rotation_tables()[usize::from(orientation.steps())];
                let prerotated: Neighborhood =
                    std::array::from_fn(|slot| values[table[slot]]);
                prop_assert_eq!(rule.matches(&prerotated), Some(Orientation::Upright0));
            }
        }
    }
}
