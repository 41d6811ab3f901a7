/// Slot bitmask of neighbour fetches a rule depends on
pub mod bitset;
/// Full-grid recompute and the host-facing tiler
pub mod executor;
/// Fixed neighbourhood footprint and rotation tables
pub mod pattern;
/// Single rules and their derived dependencies
pub mod rule;
/// Prioritised rule collection
pub mod ruleset;
