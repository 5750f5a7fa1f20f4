//! Error types for gigdash
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, invalid config, missing snapshot)
//! - 4: Operation failed (I/O, malformed snapshot or config file)
//!
//! The rollup functions never fail; everything here belongs to the
//! surface that loads config and snapshots and parses arguments.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the gigdash CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for gigdash operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Snapshot not found: {0}")]
    SnapshotNotFound(PathBuf),

    // Operation failures (exit code 4)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidConfig(_) | Error::InvalidArgument(_) | Error::SnapshotNotFound(_) => {
                exit_codes::USER_ERROR
            }

            Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_)
            | Error::OperationFailed(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured details for JSON error output
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidConfig(message)
            | Error::InvalidArgument(message)
            | Error::OperationFailed(message) => {
                Some(serde_json::json!({ "message": message }))
            }
            Error::SnapshotNotFound(path) => {
                Some(serde_json::json!({ "path": path.to_string_lossy() }))
            }
            Error::Json(err) => Some(serde_json::json!({
                "line": err.line(),
                "column": err.column(),
            })),
            Error::Io(_) | Error::TomlParse(_) | Error::TomlSerialize(_) => None,
        }
    }
}

/// Result type alias for gigdash operations
pub type Result<T> = std::result::Result<T, Error>;

/// Wrapper for displaying errors in JSON format
#[derive(serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl From<&Error> for JsonError {
    fn from(err: &Error) -> Self {
        JsonError {
            error: err.to_string(),
            code: err.exit_code(),
            details: err.details(),
        }
    }
}
