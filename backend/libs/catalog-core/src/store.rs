use std::time::Duration;

use async_trait::async_trait;

use crate::error::{CacheError, CatalogError};
use crate::models::{
    Category, CategoryId, Course, CourseId, EnrollmentRecord, Mentor, ReviewRecord, UserId,
    ViewEvent, WishlistRecord,
};
use crate::query::{CourseQuery, MentorQuery};

/// Read-only access to the catalog. The engine never writes through this
/// interface; implementations own all schema and transaction concerns.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn query_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, CatalogError>;

    /// Count of the full filtered universe, ignoring `offset`/`limit`.
    async fn count_courses(&self, query: &CourseQuery) -> Result<u64, CatalogError>;

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, CatalogError>;

    async fn query_mentors(&self, query: &MentorQuery) -> Result<Vec<Mentor>, CatalogError>;

    async fn count_mentors(&self, query: &MentorQuery) -> Result<u64, CatalogError>;

    /// Resolve category labels for facet display.
    async fn get_categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CatalogError>;

    async fn enrollments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<EnrollmentRecord>, CatalogError>;

    async fn reviews_by_user(&self, user_id: UserId) -> Result<Vec<ReviewRecord>, CatalogError>;

    async fn wishlist_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WishlistRecord>, CatalogError>;

    /// Course-view events from the activity log, most-recent-first,
    /// bounded to `limit`.
    async fn recent_course_views(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ViewEvent>, CatalogError>;
}

/// Key/value cache with per-key time-to-live. Values are opaque bytes;
/// serialization lives with the caller.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    async fn set_with_ttl(
        &self,
        key: &str,
        value: &[u8],
        ttl: Duration,
    ) -> Result<(), CacheError>;

    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}
