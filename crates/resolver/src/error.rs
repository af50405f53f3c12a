//! Error types for title resolution.

use data_loader::MovieIndex;
use thiserror::Error;

/// Errors raised while turning a query into recommendations.
///
/// All of these are deterministic for a given query and model; retrying
/// the same call gives the same error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    /// The fuzzy matcher found no title above its cutoff
    #[error("No movie title matches '{query}'")]
    NoMatch { query: String },

    /// The matcher produced a title the catalog does not contain
    #[error("Title '{title}' is not in the catalog")]
    NotFound { title: String },

    /// A movie index outside the similarity matrix
    #[error("Movie index {index} is out of range (catalog has {len} movies)")]
    IndexOutOfRange { index: MovieIndex, len: usize },

    /// Invalid matcher settings, or a catalog/matrix pair that don't belong together
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },
}

pub type Result<T> = std::result::Result<T, ResolveError>;
