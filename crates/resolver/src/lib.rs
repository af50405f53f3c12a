//! Query resolution on top of a fitted similarity model.
//!
//! This crate provides:
//! - `SequenceMatcher`: gestalt string ratio between two titles
//! - `TitleMatcher` trait and the default `DifflibMatcher`
//! - `QueryResolver`: query -> catalog entry -> ranked recommendations
//!
//! ## Example Usage
//! ```ignore
//! use resolver::{DifflibMatcher, QueryResolver, DEFAULT_TOP_K};
//!
//! let matcher = DifflibMatcher::default();
//! let resolver = QueryResolver::new(&catalog, &similarity, &matcher)?;
//!
//! for rec in resolver.recommend("Avatr", DEFAULT_TOP_K)? {
//!     println!("{}. {}", rec.rank, rec.title);
//! }
//! ```

pub mod error;
pub mod types;
pub mod matcher;
pub mod resolver;

// Re-export main types
pub use error::{ResolveError, Result};
pub use types::{Recommendation, ResolvedTitle, ScoredMovie};
pub use matcher::{DifflibMatcher, Match, SequenceMatcher, TitleMatch, TitleMatcher};
pub use resolver::{QueryResolver, Recommendations, DEFAULT_TOP_K};
