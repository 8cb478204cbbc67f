use catalog_core::{Course, CourseId, Mentor, MentorId};
use serde::{Deserialize, Serialize};

/// One grouped count over the filtered candidate universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetBucket {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseFacets {
    pub categories: Vec<FacetBucket>,
    pub levels: Vec<FacetBucket>,
    pub price_ranges: Vec<FacetBucket>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentorFacets {
    pub expertise: Vec<FacetBucket>,
    pub experience_ranges: Vec<FacetBucket>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSearchResponse {
    pub courses: Vec<Course>,
    /// Size of the full filtered universe, independent of pagination.
    pub total: u64,
    pub facets: CourseFacets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorSearchResponse {
    pub mentors: Vec<Mentor>,
    pub total: u64,
    pub facets: MentorFacets,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSuggestion {
    pub id: CourseId,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorSuggestion {
    pub id: MentorId,
    pub display_name: String,
    pub headline: String,
}

/// Autocomplete payload. All groups are empty when the query is too short.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSuggestions {
    pub courses: Vec<CourseSuggestion>,
    pub mentors: Vec<MentorSuggestion>,
    pub tags: Vec<String>,
}
