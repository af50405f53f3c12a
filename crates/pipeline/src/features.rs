//! Feature composition: one text document per movie.
//!
//! The document is the five descriptive fields joined by single spaces,
//! in a fixed order. A missing field contributes an empty string, so the
//! separators are always there: a movie with only a director becomes
//! `"    James Cameron"`. No case folding or stop-word removal happens
//! here; the tokenizer owns that.

use data_loader::{Catalog, Movie};
use rayon::prelude::*;

/// Names of the fields that make up a document, in join order
pub const FEATURE_FIELDS: [&str; 5] = ["genres", "keywords", "tagline", "cast", "director"];

/// Build the document for a single movie
pub fn compose_document(movie: &Movie) -> String {
    let fields = [
        &movie.genres,
        &movie.keywords,
        &movie.tagline,
        &movie.cast,
        &movie.director,
    ];

    fields
        .iter()
        .map(|field| field.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Composes documents for a whole catalog.
///
/// Output order always matches catalog order, so document `i` belongs to
/// movie `i`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureComposer;

impl FeatureComposer {
    pub fn new() -> Self {
        Self
    }

    /// Compose all documents in parallel
    pub fn compose(&self, catalog: &Catalog) -> Vec<String> {
        catalog.movies().par_iter().map(compose_document).collect()
    }
}
