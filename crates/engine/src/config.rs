//! Engine configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! { "top_k": 10, "vectorizer": { "sublinear_tf": true } }
//! ```

use crate::error::{EngineError, Result};
use pipeline::VectorizerConfig;
use resolver::{DifflibMatcher, DEFAULT_TOP_K};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Recommendations returned per query
    pub top_k: usize,
    /// Minimum fuzzy-match score for a title to count as a match
    pub match_cutoff: f64,
    /// Candidate titles kept per query
    pub max_matches: usize,
    pub vectorizer: VectorizerConfig,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            match_cutoff: DifflibMatcher::DEFAULT_CUTOFF,
            max_matches: DifflibMatcher::DEFAULT_MAX_MATCHES,
            vectorizer: VectorizerConfig::default(),
        }
    }
}

impl RecommenderConfig {
    /// Load a JSON config file and validate it
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let config_error = |reason: String| EngineError::ConfigFile {
            path: path.display().to_string(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config: Self =
            serde_json::from_str(&contents).map_err(|e| config_error(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn with_match_cutoff(mut self, match_cutoff: f64) -> Self {
        self.match_cutoff = match_cutoff;
        self
    }

    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    pub fn with_vectorizer(mut self, vectorizer: VectorizerConfig) -> Self {
        self.vectorizer = vectorizer;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_k == 0 {
            return Err(EngineError::Configuration {
                reason: "top_k must be greater than 0".to_string(),
            });
        }
        DifflibMatcher::new(self.match_cutoff, self.max_matches)?;
        self.vectorizer.validate()?;
        Ok(())
    }
}
