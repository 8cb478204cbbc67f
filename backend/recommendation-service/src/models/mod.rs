use std::collections::{HashMap, HashSet};

use catalog_core::{CategoryId, Course, CourseId, CourseLevel};
use serde::{Deserialize, Serialize};

/// Transient per-request preference profile. Built fresh on each cache miss,
/// consumed by one scoring pass, never persisted or shared.
#[derive(Debug, Clone, Default)]
pub struct AffinityProfile {
    /// Excluded from personalized recommendations.
    pub enrolled_course_ids: HashSet<CourseId>,
    pub category_affinity: HashMap<CategoryId, f64>,
    pub level_affinity: HashMap<CourseLevel, f64>,
    pub tag_affinity: HashMap<String, f64>,
    /// Most-recent-first, bounded upstream.
    pub recently_viewed: Vec<CourseId>,
}

impl AffinityProfile {
    pub fn category_weight(&self, category_id: CategoryId) -> f64 {
        self.category_affinity.get(&category_id).copied().unwrap_or(0.0)
    }

    pub fn level_weight(&self, level: CourseLevel) -> f64 {
        self.level_affinity.get(&level).copied().unwrap_or(0.0)
    }

    pub fn tag_weight(&self, tag: &str) -> f64 {
        self.tag_affinity.get(tag).copied().unwrap_or(0.0)
    }
}

/// A candidate course with its computed score and the single strongest
/// rationale behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCourse {
    pub course: Course,
    pub score: f64,
    pub reason: String,
}

/// Reason labels, assigned by an ordered rule list (first match wins).
/// "Trending now" doubles as the marker callers use to detect fallback
/// output.
pub mod reason {
    pub const RECENTLY_VIEWED: &str = "You viewed this recently";
    pub const SAME_MENTOR: &str = "From the same mentor";
    pub const MATCHES_INTERESTS: &str = "Matches your interests";
    pub const SIMILAR_TOPICS: &str = "Covers similar topics";
    pub const HIGHLY_RATED: &str = "Highly rated by learners";
    pub const IN_CATEGORY: &str = "Popular in this category";
    pub const BECAUSE_VIEWED: &str = "Because you viewed similar courses";
    pub const TRENDING: &str = "Trending now";
    pub const DEFAULT: &str = "Recommended for you";
}
