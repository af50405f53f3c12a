//! TF-IDF vectorization.
//!
//! ## Algorithm
//! 1. Tokenize every document (in parallel)
//! 2. Count document frequency `df(t)` for each distinct term
//! 3. Assign columns in lexicographic term order
//! 4. `idf(t) = ln((1 + N) / (1 + df(t))) + 1`
//! 5. For each document: `w(t) = tf(t) * idf(t)`, then L2-normalise the row
//!
//! `tf` is the raw term count, or `1 + ln(count)` with `sublinear_tf`.
//! A document with no known terms is a zero row and stays zero.
//!
//! Fitting is corpus dependent: the vocabulary and idf table describe
//! exactly the documents passed to `fit`, and a new corpus means a new fit.

use crate::error::{ModelError, Result};
use crate::tokenizer::WordTokenizer;
use crate::traits::Tokenizer;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument};

// =============================================================================
// Configuration
// =============================================================================

/// Tunables for the vectorizer.
///
/// The defaults reproduce the reference weighting: lower-cased tokens of at
/// least two characters, raw counts, smoothed idf, L2 rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorizerConfig {
    pub lowercase: bool,
    pub min_token_len: usize,
    pub sublinear_tf: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            min_token_len: 2,
            sublinear_tf: false,
        }
    }
}

impl VectorizerConfig {
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Reject settings that can never produce a token
    pub fn validate(&self) -> Result<()> {
        if self.min_token_len == 0 {
            return Err(ModelError::configuration(
                "min_token_len must be at least 1",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Sparse rows
// =============================================================================

/// A sparse feature vector. `indices` is strictly increasing and
/// `values[k]` is the weight of column `indices[k]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Weight of one column (0.0 when absent)
    pub fn get(&self, column: usize) -> f64 {
        self.indices
            .binary_search(&column)
            .map(|k| self.values[k])
            .unwrap_or(0.0)
    }

    /// Dot product over the shared columns, summed in column order
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut a, mut b) = (0, 0);
        let mut sum = 0.0;
        while a < self.indices.len() && b < other.indices.len() {
            match self.indices[a].cmp(&other.indices[b]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => b += 1,
                std::cmp::Ordering::Equal => {
                    sum += self.values[a] * other.values[b];
                    a += 1;
                    b += 1;
                }
            }
        }
        sum
    }

    /// Iterate `(column, weight)` pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }
}

/// N×V matrix of document vectors, one row per document
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    rows: Vec<SparseVector>,
    n_features: usize,
}

impl FeatureMatrix {
    pub fn new(rows: Vec<SparseVector>, n_features: usize) -> Self {
        Self { rows, n_features }
    }

    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&SparseVector> {
        self.rows.get(index)
    }

    /// Number of documents (N)
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Vocabulary size (V)
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

// =============================================================================
// Vectorizer
// =============================================================================

/// Learned state of a fitted vectorizer
#[derive(Debug, Clone)]
struct FittedVocabulary {
    /// term -> column
    columns: HashMap<String, usize>,
    /// column -> term, sorted
    terms: Vec<String>,
    /// column -> idf weight
    idf: Vec<f64>,
    n_documents: usize,
}

/// TF-IDF vectorizer with smoothed idf and L2-normalised rows
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    tokenizer: Box<dyn Tokenizer>,
    fitted: Option<FittedVocabulary>,
}

impl TfidfVectorizer {
    /// Create a vectorizer with the default configuration
    pub fn new() -> Self {
        Self::with_config(VectorizerConfig::default())
    }

    /// Create a vectorizer whose word tokenizer follows `config`
    pub fn with_config(config: VectorizerConfig) -> Self {
        let tokenizer = WordTokenizer::new()
            .with_lowercase(config.lowercase)
            .with_min_token_len(config.min_token_len);
        Self {
            config,
            tokenizer: Box::new(tokenizer),
            fitted: None,
        }
    }

    /// Replace the tokenizer. Discards any previous fit.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self.fitted = None;
        self
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Learn vocabulary and idf weights from `documents`
    pub fn fit<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Result<()> {
        let tokenized = self.tokenize_all(documents)?;
        self.fit_tokens(&tokenized);
        Ok(())
    }

    /// Fit on `documents` and return their vectors, tokenizing each once
    #[instrument(skip(self, documents), fields(n_documents = documents.len()))]
    pub fn fit_transform<S: AsRef<str> + Sync>(&mut self, documents: &[S]) -> Result<FeatureMatrix> {
        let tokenized = self.tokenize_all(documents)?;
        self.fit_tokens(&tokenized);

        let vocabulary = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        let rows: Vec<SparseVector> = tokenized
            .par_iter()
            .map(|tokens| self.weigh(vocabulary, tokens))
            .collect();

        Ok(FeatureMatrix::new(rows, vocabulary.terms.len()))
    }

    /// Vectorize documents against the fitted vocabulary.
    ///
    /// Terms never seen during `fit` are ignored.
    pub fn transform<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Result<FeatureMatrix> {
        let vocabulary = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        let rows: Vec<SparseVector> = documents
            .par_iter()
            .map(|doc| self.weigh(vocabulary, &self.tokenizer.tokenize(doc.as_ref())))
            .collect();

        Ok(FeatureMatrix::new(rows, vocabulary.terms.len()))
    }

    /// Vectorize a single document against the fitted vocabulary
    pub fn transform_one(&self, document: &str) -> Result<SparseVector> {
        let vocabulary = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        Ok(self.weigh(vocabulary, &self.tokenizer.tokenize(document)))
    }

    /// Terms in column order (empty before fit)
    pub fn vocabulary(&self) -> &[String] {
        self.fitted
            .as_ref()
            .map(|v| v.terms.as_slice())
            .unwrap_or(&[])
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary().len()
    }

    /// Column of a term, if it is in the vocabulary
    pub fn column_of(&self, term: &str) -> Option<usize> {
        self.fitted.as_ref()?.columns.get(term).copied()
    }

    /// idf weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f64> {
        let vocabulary = self.fitted.as_ref()?;
        vocabulary.columns.get(term).map(|&col| vocabulary.idf[col])
    }

    /// Number of documents the vectorizer was fitted on
    pub fn n_documents(&self) -> usize {
        self.fitted.as_ref().map(|v| v.n_documents).unwrap_or(0)
    }

    fn tokenize_all<S: AsRef<str> + Sync>(&self, documents: &[S]) -> Result<Vec<Vec<String>>> {
        self.config.validate()?;
        if documents.is_empty() {
            return Err(ModelError::configuration(
                "cannot fit vectorizer on an empty corpus",
            ));
        }

        debug!(
            "Tokenizing {} documents with '{}' tokenizer",
            documents.len(),
            self.tokenizer.name()
        );
        Ok(documents
            .par_iter()
            .map(|doc| self.tokenizer.tokenize(doc.as_ref()))
            .collect())
    }

    fn fit_tokens(&mut self, tokenized: &[Vec<String>]) {
        let n_documents = tokenized.len();

        // Document frequency: each document counts a term once
        let doc_freq: HashMap<&str, usize> = tokenized
            .par_iter()
            .fold(HashMap::new, |mut local, tokens| {
                let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
                for term in unique {
                    *local.entry(term).or_insert(0) += 1;
                }
                local
            })
            .reduce(HashMap::new, |mut acc, local| {
                for (term, count) in local {
                    *acc.entry(term).or_insert(0) += count;
                }
                acc
            });

        let mut terms: Vec<String> = doc_freq.keys().map(|t| t.to_string()).collect();
        terms.sort_unstable();

        let n = n_documents as f64;
        let idf: Vec<f64> = terms
            .iter()
            .map(|term| {
                let df = doc_freq[term.as_str()] as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let columns: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(col, term)| (term.clone(), col))
            .collect();

        debug!(
            "Fitted vocabulary of {} terms over {} documents",
            terms.len(),
            n_documents
        );

        self.fitted = Some(FittedVocabulary {
            columns,
            terms,
            idf,
            n_documents,
        });
    }

    /// tf-idf weights for one tokenized document, L2-normalised
    fn weigh(&self, vocabulary: &FittedVocabulary, tokens: &[String]) -> SparseVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for token in tokens {
            if let Some(&col) = vocabulary.columns.get(token) {
                *counts.entry(col).or_insert(0) += 1;
            }
        }

        let mut entries: Vec<(usize, usize)> = counts.into_iter().collect();
        entries.sort_unstable_by_key(|&(col, _)| col);

        let (indices, mut values): (Vec<usize>, Vec<f64>) = entries
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.config.sublinear_tf {
                    1.0 + (count as f64).ln()
                } else {
                    count as f64
                };
                (col, tf * vocabulary.idf[col])
            })
            .unzip();

        let norm = values.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for value in values.iter_mut() {
                *value /= norm;
            }
        }

        SparseVector { indices, values }
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("config", &self.config)
            .field("tokenizer", &self.tokenizer.name())
            .field("vocabulary_size", &self.vocabulary_size())
            .finish()
    }
}
