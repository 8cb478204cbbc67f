use std::sync::Arc;

use catalog_core::{
    CatalogError, CatalogStore, CategoryId, Course, CourseId, CourseQuery, CourseSort,
    SimilarityFilter, SortDirection,
};
use tracing::debug;

use crate::models::AffinityProfile;

/// Issues bounded catalog queries for the retrieval modes. All translation
/// from engine-level intent to [`CourseQuery`] lives here.
pub struct CandidateRetriever {
    store: Arc<dyn CatalogStore>,
    candidate_limit: usize,
}

impl CandidateRetriever {
    pub fn new(store: Arc<dyn CatalogStore>, candidate_limit: usize) -> Self {
        Self {
            store,
            candidate_limit,
        }
    }

    /// Published courses the user has not enrolled in.
    pub async fn personalized(
        &self,
        profile: &AffinityProfile,
    ) -> Result<Vec<Course>, CatalogError> {
        let query = CourseQuery {
            exclude_ids: profile.enrolled_course_ids.iter().copied().collect(),
            ..CourseQuery::published(self.candidate_limit)
        };
        self.store.query_courses(&query).await
    }

    /// Published courses sharing ANY of category/level/mentor/tags with the
    /// reference. A missing reference is a valid "no similarity basis"
    /// state, not an error.
    pub async fn similar_to(
        &self,
        course_id: CourseId,
    ) -> Result<Option<(Course, Vec<Course>)>, CatalogError> {
        let Some(reference) = self.store.get_course(course_id).await? else {
            debug!(%course_id, "reference course not found, no similarity basis");
            return Ok(None);
        };

        let query = CourseQuery {
            exclude_ids: vec![reference.id],
            similar_to: Some(SimilarityFilter {
                category_id: Some(reference.category_id),
                level: Some(reference.level),
                mentor_id: Some(reference.mentor_id),
                tags: reference.tags.clone(),
            }),
            ..CourseQuery::published(self.candidate_limit)
        };
        let candidates = self.store.query_courses(&query).await?;
        Ok(Some((reference, candidates)))
    }

    pub async fn in_category(
        &self,
        category_id: CategoryId,
        exclude_ids: Vec<CourseId>,
    ) -> Result<Vec<Course>, CatalogError> {
        let query = CourseQuery {
            category_id: Some(category_id),
            exclude_ids,
            ..CourseQuery::published(self.candidate_limit)
        };
        self.store.query_courses(&query).await
    }

    /// Pure popularity ordering: students desc, then rating desc, then
    /// review count desc.
    pub async fn trending(&self, limit: usize) -> Result<Vec<Course>, CatalogError> {
        let query = CourseQuery {
            sort: CourseSort::Students,
            direction: SortDirection::Desc,
            ..CourseQuery::published(limit)
        };
        self.store.query_courses(&query).await
    }

    /// Published courses excluding the given ids, e.g. a viewer's recent
    /// history.
    pub async fn published_excluding(
        &self,
        exclude_ids: Vec<CourseId>,
    ) -> Result<Vec<Course>, CatalogError> {
        let query = CourseQuery {
            exclude_ids,
            ..CourseQuery::published(self.candidate_limit)
        };
        self.store.query_courses(&query).await
    }

    /// Resolve courses by id, preserving input order and skipping ids that
    /// no longer exist.
    pub async fn courses_by_ids(&self, ids: &[CourseId]) -> Result<Vec<Course>, CatalogError> {
        let mut courses = Vec::with_capacity(ids.len());
        for &id in ids {
            if let Some(course) = self.store.get_course(id).await? {
                courses.push(course);
            }
        }
        Ok(courses)
    }
}
