pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use models::{
    CourseFacets, CourseSearchResponse, FacetBucket, MentorFacets, MentorSearchResponse,
    SearchSuggestions,
};
pub use services::{CourseSearchService, MentorSearchService, SuggestionService};
