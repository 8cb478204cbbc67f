pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use engine::{with_fallback, RecommendationEngine};
pub use error::{RecommendationError, Result};
pub use models::{AffinityProfile, ScoredCourse};
