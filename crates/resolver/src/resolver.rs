//! Query Resolver - from a typed title to ranked recommendations
//!
//! ## Algorithm
//! 1. Fuzzy-match the query against every catalog title; take the best
//! 2. Map that title to its first catalog index
//! 3. Read the movie's row of the similarity matrix
//! 4. Order by score (highest first), ties by catalog index (lowest first)
//! 5. Yield the top K as 1-based ranked recommendations
//!
//! The query movie is not excluded: its self-similarity is maximal, so it
//! normally comes back at rank 1.
//!
//! Nothing here mutates the catalog or the matrix, so any number of
//! resolvers can run against the same model concurrently.

use crate::error::{ResolveError, Result};
use crate::matcher::TitleMatcher;
use crate::types::{Recommendation, ResolvedTitle, ScoredMovie};
use data_loader::{Catalog, MovieIndex};
use pipeline::SimilarityMatrix;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Default number of recommendations per query
pub const DEFAULT_TOP_K: usize = 29;

/// Resolves queries against one catalog and its similarity matrix
pub struct QueryResolver<'a> {
    catalog: &'a Catalog,
    similarity: &'a SimilarityMatrix,
    matcher: &'a dyn TitleMatcher,
}

impl<'a> QueryResolver<'a> {
    /// Create a resolver. The matrix must have been built from this catalog.
    pub fn new(
        catalog: &'a Catalog,
        similarity: &'a SimilarityMatrix,
        matcher: &'a dyn TitleMatcher,
    ) -> Result<Self> {
        if catalog.len() != similarity.len() {
            return Err(ResolveError::Configuration {
                reason: format!(
                    "catalog has {} movies but similarity matrix is {}x{}",
                    catalog.len(),
                    similarity.len(),
                    similarity.len()
                ),
            });
        }
        Ok(Self {
            catalog,
            similarity,
            matcher,
        })
    }

    /// Resolve a free-text query to one catalog entry (steps 1-2)
    #[instrument(skip(self), fields(matcher = self.matcher.name()))]
    pub fn resolve(&self, query: &str) -> Result<ResolvedTitle> {
        let matches = self.matcher.close_matches(query, self.catalog.titles());
        let best = matches.into_iter().next().ok_or_else(|| ResolveError::NoMatch {
            query: query.to_string(),
        })?;

        let index = self
            .catalog
            .index_of_title(&best.title)
            .ok_or_else(|| ResolveError::NotFound {
                title: best.title.clone(),
            })?;

        debug!(
            "Resolved '{}' to '{}' (index {}, score {:.3})",
            query, best.title, index, best.score
        );
        Ok(ResolvedTitle {
            index,
            title: best.title,
            match_score: best.score,
        })
    }

    /// Every movie ordered by similarity to `index` (steps 3-4)
    pub fn rank(&self, index: MovieIndex) -> Result<Vec<ScoredMovie>> {
        self.rank_top(index, self.similarity.len())
    }

    /// The `top_k` movies most similar to `index`, in rank order.
    ///
    /// Same order as the head of [`rank`](Self::rank), without sorting
    /// the whole row.
    pub fn rank_top(&self, index: MovieIndex, top_k: usize) -> Result<Vec<ScoredMovie>> {
        let row = self
            .similarity
            .row(index)
            .ok_or(ResolveError::IndexOutOfRange {
                index,
                len: self.similarity.len(),
            })?;

        let mut scored: Vec<ScoredMovie> = row
            .iter()
            .enumerate()
            .map(|(index, &score)| ScoredMovie { index, score })
            .collect();

        let k = top_k.min(scored.len());
        if k == 0 {
            return Ok(Vec::new());
        }
        if k < scored.len() {
            scored.select_nth_unstable_by(k - 1, by_rank);
            scored.truncate(k);
        }
        scored.sort_by(by_rank);
        Ok(scored)
    }

    /// Resolve `query` and return its `top_k` recommendations (steps 1-5).
    ///
    /// Titles are looked up lazily as the iterator is consumed.
    pub fn recommend(&self, query: &str, top_k: usize) -> Result<Recommendations<'a>> {
        let resolved = self.resolve(query)?;
        let ranked = self.rank_top(resolved.index, top_k)?;
        Ok(Recommendations {
            catalog: self.catalog,
            query: resolved,
            ranked: ranked.into_iter().enumerate(),
        })
    }
}

/// Highest score first; equal scores by ascending catalog index
fn by_rank(x: &ScoredMovie, y: &ScoredMovie) -> Ordering {
    y.score
        .total_cmp(&x.score)
        .then_with(|| x.index.cmp(&y.index))
}

/// Lazy sequence of ranked recommendations for one resolved query
pub struct Recommendations<'a> {
    catalog: &'a Catalog,
    query: ResolvedTitle,
    ranked: std::iter::Enumerate<std::vec::IntoIter<ScoredMovie>>,
}

impl Recommendations<'_> {
    /// The catalog entry the query resolved to
    pub fn resolved(&self) -> &ResolvedTitle {
        &self.query
    }
}

impl Iterator for Recommendations<'_> {
    type Item = Recommendation;

    fn next(&mut self) -> Option<Self::Item> {
        let (position, scored) = self.ranked.next()?;
        let title = self
            .catalog
            .titles()
            .get(scored.index)
            .cloned()
            .unwrap_or_default();
        Some(Recommendation {
            rank: position + 1,
            index: scored.index,
            title,
            score: scored.score,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ranked.size_hint()
    }
}

impl ExactSizeIterator for Recommendations<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{DifflibMatcher, TitleMatch};
    use data_loader::Movie;
    use pipeline::{FeatureComposer, TfidfVectorizer};

    fn create_test_model() -> (Catalog, SimilarityMatrix) {
        let catalog = Catalog::from_movies(vec![
            Movie::new(0, "Avatar")
                .with_genres("Action Adventure")
                .with_director("James Cameron"),
            Movie::new(1, "Titanic")
                .with_genres("Drama Romance")
                .with_director("James Cameron"),
            Movie::new(2, "Aliens")
                .with_genres("Action Horror")
                .with_director("James Cameron"),
            Movie::new(3, "Avatar")
                .with_genres("Documentary"),
            Movie::new(4, "Heat")
                .with_genres("Action Crime")
                .with_director("Michael Mann"),
        ])
        .unwrap();

        let documents = FeatureComposer::new().compose(&catalog);
        let features = TfidfVectorizer::new().fit_transform(&documents).unwrap();
        let similarity = SimilarityMatrix::compute(&features).unwrap();
        (catalog, similarity)
    }

    /// Always answers with the same title, whatever the query
    struct FixedMatcher(&'static str);

    impl TitleMatcher for FixedMatcher {
        fn name(&self) -> &str {
            "fixed"
        }

        fn close_matches(&self, _query: &str, _candidates: &[String]) -> Vec<TitleMatch> {
            vec![TitleMatch {
                title: self.0.to_string(),
                score: 1.0,
            }]
        }
    }

    #[test]
    fn test_resolve_exact_title() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        let resolved = resolver.resolve("Titanic").unwrap();
        assert_eq!(resolved.index, 1);
        assert_eq!(resolved.match_score, 1.0);
    }

    #[test]
    fn test_duplicate_title_resolves_to_first() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        assert_eq!(resolver.resolve("Avatar").unwrap().index, 0);
    }

    #[test]
    fn test_no_match() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        let err = resolver.resolve("Xyzzy123NotAMovie").unwrap_err();
        assert_eq!(
            err,
            ResolveError::NoMatch {
                query: "Xyzzy123NotAMovie".to_string()
            }
        );
    }

    #[test]
    fn test_not_found() {
        let (catalog, similarity) = create_test_model();
        let matcher = FixedMatcher("Ghost Movie");
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        let err = resolver.resolve("anything").unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { title } if title == "Ghost Movie"));
    }

    #[test]
    fn test_rank_order_and_ties() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        let ranked = resolver.rank(0).unwrap();
        assert_eq!(ranked.len(), catalog.len());
        assert_eq!(ranked[0].index, 0);

        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].index < pair[1].index);
            }
        }
    }

    #[test]
    fn test_rank_top_matches_full_rank() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        let full = resolver.rank(2).unwrap();
        for k in 0..=catalog.len() + 2 {
            let top = resolver.rank_top(2, k).unwrap();
            assert_eq!(top.as_slice(), &full[..k.min(full.len())]);
        }
    }

    #[test]
    fn test_rank_out_of_range() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        assert_eq!(
            resolver.rank(99).unwrap_err(),
            ResolveError::IndexOutOfRange { index: 99, len: 5 }
        );
    }

    #[test]
    fn test_recommend_is_ranked() {
        let (catalog, similarity) = create_test_model();
        let matcher = DifflibMatcher::default();
        let resolver = QueryResolver::new(&catalog, &similarity, &matcher).unwrap();

        let recommendations = resolver.recommend("Avatr", 3).unwrap();
        assert_eq!(recommendations.resolved().title, "Avatar");
        assert_eq!(recommendations.len(), 3);

        let items: Vec<Recommendation> = recommendations.collect();
        assert_eq!(items[0].rank, 1);
        assert_eq!(items[0].title, "Avatar");
        assert_eq!(items[0].index, 0);
        assert_eq!(
            items.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_mismatched_matrix_rejected() {
        let (catalog, _) = create_test_model();
        let features = TfidfVectorizer::new().fit_transform(&["action"]).unwrap();
        let small = SimilarityMatrix::compute(&features).unwrap();
        let matcher = DifflibMatcher::default();

        assert!(matches!(
            QueryResolver::new(&catalog, &small, &matcher),
            Err(ResolveError::Configuration { .. })
        ));
    }
}
