//! Result types produced by the query resolver.

use data_loader::MovieIndex;
use serde::Serialize;

/// The catalog entry a free-text query was resolved to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedTitle {
    pub index: MovieIndex,
    pub title: String,
    /// Fuzzy-match score of the title against the query
    pub match_score: f64,
}

/// A movie paired with its similarity to the query movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredMovie {
    pub index: MovieIndex,
    pub score: f64,
}

/// One ranked recommendation. `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub index: MovieIndex,
    pub title: String,
    pub score: f64,
}
