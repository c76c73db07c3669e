//! econ-define Error Types
//!
//! Centralized error handling for the library and the CLI.

use crate::fuzzy_map::NotFound;
use thiserror::Error;

/// Central error type for econ-define
#[derive(Error, Debug)]
pub enum DefineError {
    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("Term data error: {0}")]
    TermData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for econ-define operations
pub type DefineResult<T> = Result<T, DefineError>;
