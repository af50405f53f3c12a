//! Core traits for the vectorization pipeline.
//!
//! The vectorizer does not care how text is split into terms, only that the
//! same splitting is applied at fit time and at transform time. The
//! [`Tokenizer`] trait is that seam.

/// Splits a document into terms.
///
/// ## Design Note
/// - `Send + Sync` so one tokenizer can be shared by the rayon workers
///   that tokenize documents in parallel
/// - Implementations must be deterministic: the same text always yields
///   the same tokens in the same order
pub trait Tokenizer: Send + Sync {
    /// Returns the name of this tokenizer (for logging/debugging)
    fn name(&self) -> &str;

    /// Split `text` into terms, in order of appearance (repeats kept)
    fn tokenize(&self, text: &str) -> Vec<String>;
}
