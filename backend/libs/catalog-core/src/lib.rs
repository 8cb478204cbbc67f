pub mod cache;
pub mod error;
pub mod memory;
pub mod models;
pub mod query;
pub mod store;

pub use cache::{MemoryCache, RedisCache};
pub use error::{CacheError, CatalogError};
pub use memory::MemoryCatalog;
pub use models::{
    Category, CategoryId, Course, CourseId, CourseLevel, CourseSignal, EnrollmentRecord, Mentor,
    MentorId, ReviewRecord, UserId, ViewEvent, WishlistRecord,
};
pub use query::{
    CourseQuery, CourseSort, MentorFilters, MentorQuery, MentorSort, SearchFilters,
    SimilarityFilter, SortDirection,
};
pub use store::{CacheStore, CatalogStore};
