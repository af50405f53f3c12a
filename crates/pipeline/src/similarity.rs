//! All-pairs cosine similarity.
//!
//! Rows of the feature matrix are unit length, so cosine similarity is the
//! dot product. The N×N result is stored dense and row-major, computed
//! once per catalog and read-only afterwards.
//!
//! ## Algorithm
//! 1. Build an inverted index: column -> [(row, weight)] in row order
//! 2. For each row `i` (in parallel), walk its columns in increasing order
//!    and add `w_i * w_j` into `out[j]` for every posting `(j, w_j)`
//! 3. Diagonal is set to exactly 1.0 (0.0 for zero rows); off-diagonal
//!    values are clamped to [0, 1]
//!
//! Cell `(i, j)` and cell `(j, i)` receive the same products in the same
//! order (shared columns, ascending), so the matrix is bit-for-bit symmetric
//! without a mirroring pass.

use crate::error::{ModelError, Result};
use crate::vectorizer::FeatureMatrix;
use data_loader::MovieIndex;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// Dense, symmetric N×N cosine similarity matrix
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the similarity of every pair of rows in `features`
    #[instrument(skip(features), fields(n_rows = features.n_rows(), n_features = features.n_features()))]
    pub fn compute(features: &FeatureMatrix) -> Result<Self> {
        let n = features.n_rows();
        if n == 0 {
            return Err(ModelError::configuration(
                "cannot compute similarity for an empty feature matrix",
            ));
        }

        let mut postings: Vec<Vec<(usize, f64)>> = vec![Vec::new(); features.n_features()];
        for (row, vector) in features.rows().iter().enumerate() {
            for (col, weight) in vector.iter() {
                postings[col].push((row, weight));
            }
        }

        let mut values = vec![0.0f64; n * n];
        values
            .par_chunks_mut(n)
            .zip(features.rows().par_iter())
            .enumerate()
            .for_each(|(i, (out, vector))| {
                for (col, weight) in vector.iter() {
                    for &(j, other) in &postings[col] {
                        out[j] += weight * other;
                    }
                }

                let self_similarity = if vector.is_zero() { 0.0 } else { 1.0 };
                for (j, cell) in out.iter_mut().enumerate() {
                    *cell = if i == j {
                        self_similarity
                    } else {
                        cell.clamp(0.0, 1.0)
                    };
                }
            });

        debug!("Computed {}x{} similarity matrix", n, n);
        Ok(Self { n, values })
    }

    /// Number of movies (N)
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity of movies `i` and `j`, `None` when out of range
    pub fn get(&self, i: MovieIndex, j: MovieIndex) -> Option<f64> {
        if i < self.n && j < self.n {
            Some(self.values[i * self.n + j])
        } else {
            None
        }
    }

    /// All similarities of movie `i`, indexed by the other movie
    pub fn row(&self, i: MovieIndex) -> Option<&[f64]> {
        if i < self.n {
            Some(&self.values[i * self.n..(i + 1) * self.n])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfidfVectorizer;

    fn matrix_for(docs: &[&str]) -> SimilarityMatrix {
        let mut vectorizer = TfidfVectorizer::new();
        let features = vectorizer.fit_transform(docs).unwrap();
        SimilarityMatrix::compute(&features).unwrap()
    }

    #[test]
    fn test_identical_and_disjoint_documents() {
        let matrix = matrix_for(&["action hero", "action hero", "romance drama"]);

        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix.get(0, 1), Some(1.0));
        assert_eq!(matrix.get(0, 2), Some(0.0));
        assert!(matrix.get(0, 1).unwrap() > matrix.get(0, 2).unwrap());
        assert_eq!(matrix.get(0, 1), matrix.get(1, 0));
    }

    #[test]
    fn test_diagonal() {
        let matrix = matrix_for(&["action hero", "    ", "space opera action"]);

        assert_eq!(matrix.get(0, 0), Some(1.0));
        assert_eq!(matrix.get(2, 2), Some(1.0));
        // Zero row: 0.0 everywhere, including itself
        assert_eq!(matrix.get(1, 1), Some(0.0));
        assert!(matrix.row(1).unwrap().iter().all(|&v| v == 0.0));
        assert_eq!(matrix.get(0, 1), Some(0.0));
        assert_eq!(matrix.get(2, 1), Some(0.0));
    }

    #[test]
    fn test_symmetric_and_bounded() {
        let matrix = matrix_for(&[
            "Action Adventure Fantasy culture clash future space war James Cameron",
            "Adventure Fantasy Action ocean drug abuse Johnny Depp Gore Verbinski",
            "Action Adventure Crime spy based on novel Daniel Craig Sam Mendes",
            "Action Crime Drama Thriller dc comics Christian Bale Christopher Nolan",
            "Drama Romance ship iceberg Leonardo DiCaprio James Cameron",
        ]);

        for i in 0..matrix.len() {
            for j in 0..matrix.len() {
                let v = matrix.get(i, j).unwrap();
                assert_eq!(v, matrix.get(j, i).unwrap());
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_partial_overlap() {
        let matrix = matrix_for(&["action hero", "action romance", "drama"]);
        let v = matrix.get(0, 1).unwrap();
        assert!(v > 0.0 && v < 1.0);
    }

    #[test]
    fn test_matches_pairwise_dot() {
        let docs = ["action hero space", "hero space opera", "opera drama", "action"];
        let mut vectorizer = TfidfVectorizer::new();
        let features = vectorizer.fit_transform(&docs).unwrap();
        let matrix = SimilarityMatrix::compute(&features).unwrap();

        for i in 0..docs.len() {
            for j in 0..docs.len() {
                if i == j {
                    continue;
                }
                let expected = features.rows()[i].dot(&features.rows()[j]);
                assert!((matrix.get(i, j).unwrap() - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let matrix = matrix_for(&["action"]);
        assert_eq!(matrix.get(0, 1), None);
        assert!(matrix.row(1).is_none());
    }

    #[test]
    fn test_empty_feature_matrix_rejected() {
        let features = FeatureMatrix::new(Vec::new(), 0);
        let err = SimilarityMatrix::compute(&features).unwrap_err();
        assert!(matches!(err, ModelError::Configuration { .. }));
    }
}
