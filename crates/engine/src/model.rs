//! # Recommendation Model
//!
//! Builds everything a query needs from one catalog:
//! 1. Compose one feature document per movie
//! 2. Fit the TF-IDF vectorizer and weigh every document
//! 3. Compute the all-pairs similarity matrix
//!
//! The catalog, vectorizer and matrix are owned together and never change
//! after `build`. A different catalog means building a new model.

use std::time::Instant;

use data_loader::Catalog;
use pipeline::{FeatureComposer, SimilarityMatrix, TfidfVectorizer};
use resolver::{
    DifflibMatcher, QueryResolver, Recommendation, ResolvedTitle, TitleMatch, TitleMatcher,
};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::RecommenderConfig;
use crate::error::Result;

/// Answer to one recommendation query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResponse {
    /// The text the user typed
    pub query: String,
    pub resolved: ResolvedTitle,
    pub recommendations: Vec<Recommendation>,
}

/// Immutable similarity model over one catalog
pub struct RecommendationModel {
    catalog: Catalog,
    vectorizer: TfidfVectorizer,
    similarity: SimilarityMatrix,
    matcher: DifflibMatcher,
    config: RecommenderConfig,
}

impl RecommendationModel {
    /// Fit the model on `catalog`
    #[instrument(skip(catalog, config), fields(n_movies = catalog.len()))]
    pub fn build(catalog: Catalog, config: &RecommenderConfig) -> Result<Self> {
        config.validate()?;
        let matcher = DifflibMatcher::new(config.match_cutoff, config.max_matches)?;
        let start_time = Instant::now();

        let documents = FeatureComposer::new().compose(&catalog);
        debug!("Composed {} feature documents", documents.len());

        let mut vectorizer = TfidfVectorizer::with_config(config.vectorizer.clone());
        let features = vectorizer.fit_transform(&documents)?;
        info!(
            "Vectorized {} movies over {} terms",
            features.n_rows(),
            features.n_features()
        );

        let similarity = SimilarityMatrix::compute(&features)?;

        info!(
            "Built recommendation model for {} movies in {:.2?}",
            catalog.len(),
            start_time.elapsed()
        );

        Ok(Self {
            catalog,
            vectorizer,
            similarity,
            matcher,
            config: config.clone(),
        })
    }

    fn resolver(&self) -> Result<QueryResolver<'_>> {
        Ok(QueryResolver::new(&self.catalog, &self.similarity, &self.matcher)?)
    }

    /// The catalog entry a free-text title resolves to
    pub fn resolve(&self, title: &str) -> Result<ResolvedTitle> {
        Ok(self.resolver()?.resolve(title)?)
    }

    /// The `top_k` movies most similar to the best match for `title`
    pub fn recommend(&self, title: &str, top_k: usize) -> Result<RecommendationResponse> {
        let recommendations = self.resolver()?.recommend(title, top_k)?;
        let resolved = recommendations.resolved().clone();
        let recommendations: Vec<Recommendation> = recommendations.collect();

        debug!(
            "'{}' -> '{}': {} recommendations",
            title,
            resolved.title,
            recommendations.len()
        );

        Ok(RecommendationResponse {
            query: title.to_string(),
            resolved,
            recommendations,
        })
    }

    /// [`recommend`](Self::recommend) with the configured `top_k`
    pub fn recommend_default(&self, title: &str) -> Result<RecommendationResponse> {
        self.recommend(title, self.config.top_k)
    }

    /// Up to `limit` catalog titles that fuzzily match `title`, best first
    pub fn search(&self, title: &str, limit: usize) -> Result<Vec<TitleMatch>> {
        let matcher = DifflibMatcher::new(self.config.match_cutoff, limit)?;
        Ok(matcher.close_matches(title, self.catalog.titles()))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }
}

impl std::fmt::Debug for RecommendationModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationModel")
            .field("movies", &self.catalog.len())
            .field("vocabulary_size", &self.vectorizer.vocabulary_size())
            .field("config", &self.config)
            .finish()
    }
}
