// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Kernel Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Holofield kernel failures.
#[derive(Error, Debug)]
pub enum HolofieldError {
    /// Digit source too short for the requested signal length and window.
    /// Fatal: the driver signal is a prerequisite for every grid step.
    #[error(
        "insufficient source length: need at least {required} digits, got {available}"
    )]
    InsufficientSource { required: usize, available: usize },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid input (digit text, grid shape, parameters).
    #[error("validation error: {0}")]
    Validation(String),

    /// A frame observer failed; the run is aborted.
    #[error("presentation error: {0}")]
    Presentation(String),

    /// File access from the runner.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HolofieldResult<T> = Result<T, HolofieldError>;
