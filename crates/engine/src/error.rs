use data_loader::DataLoadError;
use pipeline::ModelError;
use resolver::ResolveError;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the recommendation engine
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Catalog error: {0}")]
    Data(#[from] DataLoadError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },

    /// The config file exists but could not be read or parsed
    #[error("Failed to read config {path}: {reason}")]
    ConfigFile { path: String, reason: String },

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    TaskFailed(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
