use catalog_core::CatalogError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RecommendationError>;

#[derive(Debug, Error)]
pub enum RecommendationError {
    /// Caller bug (bad limit, malformed input). The only class that
    /// propagates; everything else degrades to the fallback ranking.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("user history unavailable")]
    ProfileUnavailable,

    #[error("catalog store error: {0}")]
    Store(#[from] CatalogError),

    #[error("deadline exceeded")]
    DeadlineExceeded,
}
