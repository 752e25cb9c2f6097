//! Error types for component configuration and logging setup.

use thiserror::Error;

/// Errors returned while building or configuring a component.
#[derive(Debug, Error)]
pub enum TaprootError {
    /// A caller-supplied argument is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Parsing the argument vector failed.
    #[error("failed to parse argument vector: {0}")]
    Parse(#[from] clap::Error),
    /// Setting up log output failed.
    #[error("failed to configure logging: {0}")]
    Logging(#[from] std::io::Error),
    /// A participant rejected the parsed configuration.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
