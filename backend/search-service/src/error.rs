use catalog_core::CatalogError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Caller bug (bad pagination, inverted ranges). Propagates.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("catalog store error: {0}")]
    Store(#[from] CatalogError),
}
