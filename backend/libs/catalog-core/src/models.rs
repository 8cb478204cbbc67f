use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CourseId = Uuid;
pub type MentorId = Uuid;
pub type CategoryId = Uuid;
pub type UserId = Uuid;

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }

    pub const ALL: [CourseLevel; 3] = [
        CourseLevel::Beginner,
        CourseLevel::Intermediate,
        CourseLevel::Advanced,
    ];
}

/// Read-only course projection from the catalog store.
///
/// Invariants: `average_rating` is in `[0, 5]`; `tags` is deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub slug: String,
    pub thumbnail: Option<String>,
    pub short_description: String,
    pub description: String,
    pub level: CourseLevel,
    /// Listed price in minor currency units.
    pub price: i64,
    pub discount_price: Option<i64>,
    pub is_free: bool,
    pub category_id: CategoryId,
    pub tags: Vec<String>,
    pub mentor_id: MentorId,
    pub average_rating: f64,
    pub total_students: u64,
    pub total_reviews: u64,
    pub language: String,
    pub is_published: bool,
    pub published_at: DateTime<Utc>,
}

impl Course {
    /// Price after discount, used for price-range bucketing.
    pub fn effective_price(&self) -> i64 {
        if self.is_free {
            return 0;
        }
        self.discount_price.unwrap_or(self.price)
    }
}

/// Read-only mentor projection from the catalog store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: MentorId,
    pub display_name: String,
    pub avatar: Option<String>,
    pub headline: String,
    pub expertise: Vec<String>,
    pub experience_years: u32,
    pub average_rating: f64,
    pub total_students: u64,
    pub total_courses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

/// Minimal course projection consumed by the affinity fold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSignal {
    pub id: CourseId,
    pub category_id: CategoryId,
    pub level: CourseLevel,
    pub tags: Vec<String>,
}

impl From<&Course> for CourseSignal {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            category_id: course.category_id,
            level: course.level,
            tags: course.tags.clone(),
        }
    }
}

/// One enrollment of the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub course: CourseSignal,
}

/// One review authored by the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub course_id: CourseId,
    pub rating: f64,
}

/// One wishlist entry of the requesting user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistRecord {
    pub course: CourseSignal,
}

/// One course-view event from the activity log, most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewEvent {
    pub entity_id: CourseId,
    pub created_at: DateTime<Utc>,
}
