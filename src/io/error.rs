//! Error types for rule editing, scene loading and export

use std::fmt;
use std::path::PathBuf;

use crate::algorithm::rule::RuleId;
use crate::spatial::CellId;

/// Main error type for all tiling operations
#[derive(Debug)]
pub enum TileError {
    /// A neighbourhood offset outside the fixed pattern footprint
    InvalidOffset {
        /// The offending offset relative to the evaluation cell
        offset: CellId,
    },

    /// Update or delete referenced a rule id that does not exist
    UnknownRule {
        /// The missing rule id
        id: RuleId,
    },

    /// Add was given an explicit id that is already in use
    DuplicateRule {
        /// The conflicting rule id
        id: RuleId,
    },

    /// A priority order that is not a permutation of the current rule ids
    InvalidOrder {
        /// Why the order was rejected
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Scene or rule file could not be decoded or encoded
    SceneParse {
        /// Path of the file involved
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for TileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOffset { offset } => {
                write!(f, "Offset {offset} is outside the rule pattern footprint")
            }
            Self::UnknownRule { id } => write!(f, "No rule with id {id}"),
            Self::DuplicateRule { id } => write!(f, "A rule with id {id} already exists"),
            Self::InvalidOrder { reason } => write!(f, "Invalid rule order: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::SceneParse { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for TileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SceneParse { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for tiling results
pub type Result<T> = std::result::Result<T, TileError>;

impl From<std::io::Error> for TileError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> TileError {
    TileError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
