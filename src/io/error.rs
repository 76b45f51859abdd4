//! Error types for request validation and output writing
//!
//! Generation itself never fails; errors only arise at the edges where
//! requests are parsed and compositions are written out.

use std::fmt;
use std::path::PathBuf;

/// Main error type for the crate
#[derive(Debug)]
pub enum FoldfieldError {
    /// Request parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Seed text could not be parsed as a decimal or hexadecimal integer
    InvalidSeed {
        /// Text as given
        input: String,
        /// What went wrong
        reason: String,
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

    /// Failed to encode composition metadata
    Serialization {
        /// Path the metadata was destined for
        path: PathBuf,
        /// Underlying encoder error
        source: serde_json::Error,
    },
}

impl fmt::Display for FoldfieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSeed { input, reason } => {
                write!(f, "Invalid seed '{input}': {reason}")
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
            Self::Serialization { path, source } => {
                write!(
                    f,
                    "Failed to serialize metadata for '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for FoldfieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Serialization { source, .. } => Some(source),
            Self::InvalidParameter { .. } | Self::InvalidSeed { .. } => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, FoldfieldError>;

impl From<image::ImageError> for FoldfieldError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for FoldfieldError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for FoldfieldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> FoldfieldError {
    FoldfieldError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid seed error
pub fn invalid_seed(input: &str, reason: &impl ToString) -> FoldfieldError {
    FoldfieldError::InvalidSeed {
        input: input.to_owned(),
        reason: reason.to_string(),
    }
}
