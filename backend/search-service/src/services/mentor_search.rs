use std::sync::Arc;

use catalog_core::{CatalogStore, MentorFilters};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::models::MentorSearchResponse;
use crate::services::FacetAggregator;

pub struct MentorSearchService {
    store: Arc<dyn CatalogStore>,
    facets: FacetAggregator,
    config: SearchConfig,
}

impl MentorSearchService {
    pub fn new(store: Arc<dyn CatalogStore>, config: SearchConfig) -> Self {
        Self {
            facets: FacetAggregator::new(store.clone(), config.facet_scan_limit),
            store,
            config,
        }
    }

    pub async fn search(&self, filters: &MentorFilters) -> Result<MentorSearchResponse> {
        filters
            .validate(self.config.max_limit)
            .map_err(SearchError::InvalidFilter)?;

        let query = filters.to_query();
        let (mentors, total, facets) = tokio::join!(
            self.store.query_mentors(&query),
            self.store.count_mentors(&query),
            self.facets.mentor_facets(&query),
        );
        let mentors = mentors?;
        let total = total?;
        let facets = facets?;

        debug!(
            returned = mentors.len(),
            total,
            page = filters.page,
            "mentor search complete"
        );

        Ok(MentorSearchResponse {
            mentors,
            total,
            facets,
        })
    }
}
