//! Error types for taskboard
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, malformed task records, missing task file, bad config)
//! - 4: Operation failed (unreadable files, serialization)

use std::path::PathBuf;

use serde_json::json;
use thiserror::Error;

/// Exit codes for the taskboard CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskboard operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid task {id}: {reason}")]
    InvalidTask { id: String, reason: String },

    #[error("Invalid due date for task {id}: '{value}'")]
    InvalidDate { id: String, value: String },

    #[error("Task file not found: {}", .0.display())]
    TaskFileNotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Operation failures (exit code 4)
    #[error("Failed to read task file {}: {source}", .path.display())]
    TaskFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidTask { .. }
            | Error::InvalidDate { .. }
            | Error::TaskFileNotFound(_)
            | Error::InvalidConfig(_)
            | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Operation failures
            Error::TaskFileRead { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_)
            | Error::TomlSerialize(_) => exit_codes::OPERATION_FAILED,
        }
    }

    /// Structured fields for the JSON error envelope
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Error::InvalidTask { id, reason } => Some(json!({ "id": id, "reason": reason })),
            Error::InvalidDate { id, value } => Some(json!({ "id": id, "value": value })),
            Error::TaskFileNotFound(path) | Error::TaskFileRead { path, .. } => {
                Some(json!({ "path": path.display().to_string() }))
            }
            Error::InvalidConfig(message) | Error::InvalidArgument(message) => {
                Some(json!({ "message": message }))
            }
            _ => None,
        }
    }
}

/// Result type alias for taskboard operations
pub type Result<T> = std::result::Result<T, Error>;
