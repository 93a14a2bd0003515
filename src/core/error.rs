// @file: placemark_engine/src/core/error.rs
// @description: Fatal error taxonomy; row-level problems are handled as skips, not errors.
// @author: LAS.

use thiserror::Error;

// Only input acquisition and output delivery abort a run. Everything that
// goes wrong inside a single row is logged and counted by the resolver.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input error: {0}")]
    Input(String),

    #[error("output error: {0}")]
    Output(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("no rows could be resolved ({skipped} skipped)")]
    NoResolvablePoints { skipped: usize },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
