//! Files, terminal and error plumbing around the engine

/// Command-line interface and batch scene processing
pub mod cli;
/// Pattern geometry constants and output defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG preview of one tile layer
pub mod image;
/// Batch progress display
pub mod progress;
/// Serialized rule records
pub mod rules;
/// Scene files: painted cells plus rules
pub mod scene;
