//! # Recommendation Service
//!
//! Shares one [`RecommendationModel`] between any number of concurrent
//! callers and lets the catalog be replaced while they run.
//!
//! Queries work on a snapshot (`Arc`) of the current model, so a reload
//! never blocks or disturbs a query in flight. A reload builds the new model
//! entirely outside the lock and only swaps the pointer once it succeeded;
//! on failure the previous model stays in place.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use data_loader::Catalog;
use tracing::{info, warn};

use crate::config::RecommenderConfig;
use crate::error::{EngineError, Result};
use crate::model::{RecommendationModel, RecommendationResponse};

pub struct RecommendationService {
    model: RwLock<Arc<RecommendationModel>>,
    config: RecommenderConfig,
}

impl RecommendationService {
    pub fn new(model: RecommendationModel) -> Self {
        let config = model.config().clone();
        Self {
            model: RwLock::new(Arc::new(model)),
            config,
        }
    }

    /// Build a model from `catalog` and serve it
    pub fn from_catalog(catalog: Catalog, config: RecommenderConfig) -> Result<Self> {
        let model = RecommendationModel::build(catalog, &config)?;
        Ok(Self::new(model))
    }

    /// Load a catalog file, build a model and serve it
    pub fn load(path: &Path, config: RecommenderConfig) -> Result<Self> {
        let catalog = Catalog::load_from_files(path)?;
        Self::from_catalog(catalog, config)
    }

    /// The model currently being served
    pub fn snapshot(&self) -> Arc<RecommendationModel> {
        self.model
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn recommend(&self, title: &str, top_k: usize) -> Result<RecommendationResponse> {
        self.snapshot().recommend(title, top_k)
    }

    /// Run a query on the blocking pool
    pub async fn recommend_async(
        &self,
        title: impl Into<String>,
        top_k: usize,
    ) -> Result<RecommendationResponse> {
        let model = self.snapshot();
        let title = title.into();

        tokio::task::spawn_blocking(move || model.recommend(&title, top_k))
            .await
            .map_err(|e| EngineError::TaskFailed(e.to_string()))?
    }

    /// Replace the served model with one built from `catalog`
    pub fn reload(&self, catalog: Catalog) -> Result<()> {
        let model = RecommendationModel::build(catalog, &self.config)?;
        self.swap(model);
        Ok(())
    }

    /// Load and build from `path` on the blocking pool, giving up after
    /// `timeout`. The served model is unchanged unless this returns `Ok`.
    pub async fn reload_from_file(&self, path: impl Into<PathBuf>, timeout: Duration) -> Result<()> {
        let path = path.into();
        let config = self.config.clone();
        let start_time = Instant::now();

        let task = tokio::task::spawn_blocking(move || -> Result<RecommendationModel> {
            let catalog = Catalog::load_from_files(&path)?;
            RecommendationModel::build(catalog, &config)
        });

        let model = match tokio::time::timeout(timeout, task).await {
            Ok(joined) => joined.map_err(|e| EngineError::TaskFailed(e.to_string()))?,
            Err(_) => {
                warn!("Reload timed out after {:?}, keeping current model", timeout);
                return Err(EngineError::Timeout(timeout));
            }
        };

        match model {
            Ok(model) => {
                self.swap(model);
                info!("Reloaded model in {:.2?}", start_time.elapsed());
                Ok(())
            }
            Err(e) => {
                warn!("Reload failed, keeping current model: {}", e);
                Err(e)
            }
        }
    }

    fn swap(&self, model: RecommendationModel) {
        let movies = model.catalog().len();
        *self.model.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(model);
        info!("Now serving {} movies", movies);
    }
}
