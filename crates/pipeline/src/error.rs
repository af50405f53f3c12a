//! Error types for model fitting.

use thiserror::Error;

/// Errors raised while fitting the vectorizer or building the similarity matrix
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The model cannot be built from the given input or settings
    /// (empty corpus, nonsensical tokenizer settings, ...)
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// `transform` was called before `fit`
    #[error("Vectorizer has not been fitted")]
    NotFitted,
}

impl ModelError {
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
