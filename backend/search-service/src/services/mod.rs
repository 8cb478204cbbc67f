pub mod course_search;
pub mod facets;
pub mod mentor_search;
pub mod suggestions;

pub use course_search::CourseSearchService;
pub use facets::FacetAggregator;
pub use mentor_search::MentorSearchService;
pub use suggestions::SuggestionService;
