//! Error types for brick production planning.

use thiserror::Error;

/// Main error type for planner operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// The catalog or another input cannot produce a meaningful plan.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operator was called in a state that breaks its contract
    /// (empty population, mismatched grid shapes).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Configuration values are out of range or inconsistent.
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for planner operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
