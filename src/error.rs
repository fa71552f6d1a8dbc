use std::path::PathBuf;

use thiserror::Error;

/// Exit status for successful runs and user interrupts.
pub(crate) const EXIT_OK: i32 = 0;
/// Exit status for any failure while reading or interpreting the input.
pub(crate) const EXIT_FAILURE: i32 = 1;
/// Exit status for invalid command line input, matching clap's usage errors.
pub(crate) const EXIT_USAGE: i32 = 2;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("{0}")]
    Argument(String),

    #[error("Potential sensitive data detected in {}", path.display())]
    SensitiveData { path: PathBuf, rule: String },

    #[error("File operation failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid JSON structure: {0}")]
    Structure(String),

    #[error("Cancelled by user")]
    Interrupted,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ParserError {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            ParserError::Argument(..) => EXIT_USAGE,
            ParserError::Interrupted => EXIT_OK,
            ParserError::SensitiveData { .. }
            | ParserError::Io { .. }
            | ParserError::Parse { .. }
            | ParserError::Structure(..)
            | ParserError::Unexpected(..) => EXIT_FAILURE,
        }
    }
}
