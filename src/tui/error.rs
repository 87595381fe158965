use std::io;
use thiserror::Error;

/// TUI-specific errors
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] io::Error),
}

/// Result type for TUI operations
pub type TuiResult<T> = Result<T, TuiError>;
