use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use catalog_core::{CacheStore, CatalogStore, CategoryId, CourseId, UserId};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{RecommendationError, Result};
use crate::models::ScoredCourse;
use crate::services::{scoring, CandidateRetriever, ProfileBuilder, RecommendationCache};

/// Awaits `primary`; on any error logs it and awaits `fallback` instead.
/// Every degradation path in the engine goes through this combinator.
pub async fn with_fallback<T, E1, E2, P, F>(
    context: &'static str,
    primary: P,
    fallback: F,
) -> std::result::Result<T, E2>
where
    E1: Display,
    P: Future<Output = std::result::Result<T, E1>>,
    F: Future<Output = std::result::Result<T, E2>>,
{
    match primary.await {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(context, error = %e, "primary computation failed, serving fallback");
            fallback.await
        }
    }
}

/// Facade over profile aggregation, candidate retrieval, scoring, caching
/// and fallback. Both stores are injected so tests substitute in-memory
/// fakes.
pub struct RecommendationEngine {
    store: Arc<dyn CatalogStore>,
    profile_builder: ProfileBuilder,
    retriever: CandidateRetriever,
    cache: RecommendationCache,
    viewed_basis_limit: usize,
    deadline: Duration,
}

impl RecommendationEngine {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        cache_store: Arc<dyn CacheStore>,
        config: &Config,
    ) -> Self {
        Self {
            profile_builder: ProfileBuilder::new(
                store.clone(),
                config.recommend.view_history_limit,
            ),
            retriever: CandidateRetriever::new(store.clone(), config.recommend.candidate_limit),
            cache: RecommendationCache::new(
                cache_store,
                Duration::from_secs(config.cache.ttl_secs),
            ),
            viewed_basis_limit: config.recommend.viewed_basis_limit,
            deadline: Duration::from_millis(config.recommend.deadline_ms),
            store,
        }
    }

    /// Cached per user. Any failure of the personalized pipeline (including
    /// the deadline) degrades to the trending ranking; callers detect
    /// degraded output by the "Trending now" reason.
    pub async fn get_personalized(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredCourse>> {
        validate_limit(limit)?;

        let key = RecommendationCache::user_key(user_id);
        self.cache
            .get_or_compute(&key, || async {
                with_fallback(
                    "personalized recommendations",
                    self.personalized_with_deadline(user_id, limit),
                    self.trending_list(limit),
                )
                .await
            })
            .await
    }

    pub async fn get_similar(
        &self,
        course_id: CourseId,
        limit: usize,
    ) -> Result<Vec<ScoredCourse>> {
        validate_limit(limit)?;

        match self.retriever.similar_to(course_id).await? {
            Some((reference, candidates)) => {
                Ok(scoring::score_similar(&reference, candidates, limit))
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_trending(&self, limit: usize) -> Result<Vec<ScoredCourse>> {
        validate_limit(limit)?;
        self.trending_list(limit).await
    }

    pub async fn get_in_category(
        &self,
        category_id: CategoryId,
        exclude_ids: Vec<CourseId>,
        limit: usize,
    ) -> Result<Vec<ScoredCourse>> {
        validate_limit(limit)?;

        let candidates = self.retriever.in_category(category_id, exclude_ids).await?;
        Ok(scoring::score_in_category(candidates, limit))
    }

    /// Ranks against the categories and tags of the user's most recently
    /// viewed courses. No view history means no basis: the result is empty.
    pub async fn get_because_you_viewed(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredCourse>> {
        validate_limit(limit)?;

        let events = self
            .store
            .recent_course_views(user_id, self.viewed_basis_limit)
            .await?;
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let viewed_ids: Vec<CourseId> = events.iter().map(|event| event.entity_id).collect();
        let basis = self.retriever.courses_by_ids(&viewed_ids).await?;
        if basis.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.retriever.published_excluding(viewed_ids).await?;
        Ok(scoring::score_because_viewed(&basis, candidates, limit))
    }

    /// Must be invoked by any collaborator that mutates the user's
    /// enrollment/review/wishlist state; the engine has no other
    /// invalidation signal.
    pub async fn clear_user_cache(&self, user_id: UserId) {
        let key = RecommendationCache::user_key(user_id);
        self.cache.clear(&key).await;
        info!(%user_id, "recommendation cache cleared");
    }

    async fn personalized_with_deadline(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredCourse>> {
        match tokio::time::timeout(self.deadline, self.personalized_pipeline(user_id, limit)).await
        {
            Ok(result) => result,
            Err(_) => Err(RecommendationError::DeadlineExceeded),
        }
    }

    async fn personalized_pipeline(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ScoredCourse>> {
        let profile = self.profile_builder.build(user_id).await?;
        let candidates = self.retriever.personalized(&profile).await?;
        Ok(scoring::score_personalized(candidates, &profile, limit))
    }

    async fn trending_list(&self, limit: usize) -> Result<Vec<ScoredCourse>> {
        let candidates = self.retriever.trending(limit).await?;
        Ok(scoring::score_trending(candidates, limit))
    }
}

fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(RecommendationError::InvalidRequest(
            "limit must be positive".to_string(),
        ));
    }
    Ok(())
}
