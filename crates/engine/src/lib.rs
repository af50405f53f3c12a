//! Recommendation engine: the fitted model and the service around it.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{RecommendationService, RecommenderConfig};
//!
//! let service = RecommendationService::load(Path::new("data/movies.csv"), RecommenderConfig::default())?;
//! let response = service.recommend_async("Avatar", 10).await?;
//! for rec in response.recommendations {
//!     println!("{}. {}", rec.rank, rec.title);
//! }
//! ```

pub mod error;
pub mod config;
pub mod model;
pub mod service;

pub use error::{EngineError, Result};
pub use config::RecommenderConfig;
pub use model::{RecommendationModel, RecommendationResponse};
pub use service::RecommendationService;

pub use resolver::{Recommendation, ResolvedTitle, TitleMatch};
