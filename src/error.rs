//! Error types for job script generation.
//!
//! Uses thiserror for derive macros. Only a handful of conditions are fatal;
//! absent optional fields, empty mappings and missing hooks are never errors.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jobscript operations.
#[derive(Error, Debug)]
pub enum JobScriptError {
    /// The engine executable resolved for the job host is not plausible.
    ///
    /// Raised by the prelude before anything is written to disk.
    #[error("bad cylc executable in global config: {0}")]
    InvalidExecutable(String),

    /// Temp-file creation, write, permission change or rename failed.
    #[error("failed to write job script '{}': {source}", path.display())]
    Io {
        /// The path being written when the failure happened.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A parameter environment template could not be rendered.
    #[error("invalid parameter template: {0}")]
    InvalidTemplate(String),

    /// `bash -n` rejected the generated script.
    #[error("job script syntax check failed: {0}")]
    SyntaxCheck(String),

    /// Bad input: unreadable or unparseable description or site config.
    #[error("{0}")]
    UserError(String),
}

impl JobScriptError {
    /// Build an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JobScriptError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            JobScriptError::UserError(_) => exit_codes::USER_ERROR,
            JobScriptError::InvalidExecutable(_) => exit_codes::INVALID_INPUT,
            JobScriptError::InvalidTemplate(_) => exit_codes::INVALID_INPUT,
            JobScriptError::Io { .. } => exit_codes::IO_FAILURE,
            JobScriptError::SyntaxCheck(_) => exit_codes::SYNTAX_FAILURE,
        }
    }
}

/// Result type alias for jobscript operations.
pub type Result<T> = std::result::Result<T, JobScriptError>;
