//! Pipeline from catalog text to the similarity model.
//!
//! This crate provides:
//! - Feature composition: one document per movie
//! - Tokenizer trait and the default word tokenizer
//! - TF-IDF vectorizer producing L2-normalised sparse rows
//! - All-pairs cosine similarity matrix
//!
//! ## Architecture
//! The pipeline processes the catalog in stages:
//! 1. `FeatureComposer` joins genres, keywords, tagline, cast and director
//! 2. `TfidfVectorizer` fits a vocabulary and weighs each document
//! 3. `SimilarityMatrix` computes cosine similarity for every pair of movies
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FeatureComposer, SimilarityMatrix, TfidfVectorizer};
//!
//! let documents = FeatureComposer::new().compose(&catalog);
//!
//! let mut vectorizer = TfidfVectorizer::new();
//! let features = vectorizer.fit_transform(&documents)?;
//!
//! let similarity = SimilarityMatrix::compute(&features)?;
//! println!("avatar vs titanic: {:?}", similarity.get(0, 1));
//! ```

pub mod error;
pub mod traits;
pub mod tokenizer;
pub mod features;
pub mod vectorizer;
pub mod similarity;

// Re-export main types
pub use error::{ModelError, Result};
pub use traits::Tokenizer;
pub use tokenizer::WordTokenizer;
pub use features::{compose_document, FeatureComposer, FEATURE_FIELDS};
pub use vectorizer::{FeatureMatrix, SparseVector, TfidfVectorizer, VectorizerConfig};
pub use similarity::SimilarityMatrix;
