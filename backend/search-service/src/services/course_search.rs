use std::sync::Arc;

use catalog_core::{CatalogStore, SearchFilters};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::models::CourseSearchResponse;
use crate::services::FacetAggregator;

/// Filtered, paginated course search with facet counts over the same
/// filtered universe. The page query, the total count and the facet scan
/// all read the same immutable snapshot, so they fan out concurrently.
pub struct CourseSearchService {
    store: Arc<dyn CatalogStore>,
    facets: FacetAggregator,
    config: SearchConfig,
}

impl CourseSearchService {
    pub fn new(store: Arc<dyn CatalogStore>, config: SearchConfig) -> Self {
        Self {
            facets: FacetAggregator::new(store.clone(), config.facet_scan_limit),
            store,
            config,
        }
    }

    pub async fn search(&self, filters: &SearchFilters) -> Result<CourseSearchResponse> {
        filters
            .validate(self.config.max_limit)
            .map_err(SearchError::InvalidFilter)?;

        let query = filters.to_query();
        let (courses, total, facets) = tokio::join!(
            self.store.query_courses(&query),
            self.store.count_courses(&query),
            self.facets.course_facets(&query),
        );
        let courses = courses?;
        let total = total?;
        let facets = facets?;

        debug!(
            returned = courses.len(),
            total,
            page = filters.page,
            "course search complete"
        );

        Ok(CourseSearchResponse {
            courses,
            total,
            facets,
        })
    }
}
