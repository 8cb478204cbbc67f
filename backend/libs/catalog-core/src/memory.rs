use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::CatalogError;
use crate::models::{
    Category, CategoryId, Course, CourseId, CourseSignal, EnrollmentRecord, Mentor, ReviewRecord,
    UserId, ViewEvent, WishlistRecord,
};
use crate::query::{CourseQuery, CourseSort, MentorQuery, MentorSort, SortDirection};
use crate::store::CatalogStore;

/// In-memory [`CatalogStore`] carrying the reference semantics of the query
/// types: AND over flat filters, ANY over the similarity reference,
/// case-insensitive substring text matching, stable sorting, pagination.
/// Populated up front and read-only afterwards.
#[derive(Default)]
pub struct MemoryCatalog {
    courses: Vec<Course>,
    mentors: Vec<Mentor>,
    categories: HashMap<CategoryId, Category>,
    enrollments: HashMap<UserId, Vec<EnrollmentRecord>>,
    reviews: HashMap<UserId, Vec<ReviewRecord>>,
    wishlists: HashMap<UserId, Vec<WishlistRecord>>,
    views: HashMap<UserId, Vec<ViewEvent>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub fn insert_mentor(&mut self, mentor: Mentor) {
        self.mentors.push(mentor);
    }

    pub fn insert_category(&mut self, category: Category) {
        self.categories.insert(category.id, category);
    }

    pub fn insert_enrollment(&mut self, user_id: UserId, course: &Course) {
        self.enrollments
            .entry(user_id)
            .or_default()
            .push(EnrollmentRecord {
                course: CourseSignal::from(course),
            });
    }

    pub fn insert_review(&mut self, user_id: UserId, course_id: CourseId, rating: f64) {
        self.reviews
            .entry(user_id)
            .or_default()
            .push(ReviewRecord { course_id, rating });
    }

    pub fn insert_wishlist(&mut self, user_id: UserId, course: &Course) {
        self.wishlists
            .entry(user_id)
            .or_default()
            .push(WishlistRecord {
                course: CourseSignal::from(course),
            });
    }

    pub fn insert_view(&mut self, user_id: UserId, course_id: CourseId, at: DateTime<Utc>) {
        self.views.entry(user_id).or_default().push(ViewEvent {
            entity_id: course_id,
            created_at: at,
        });
    }

    fn matches_course(course: &Course, query: &CourseQuery) -> bool {
        if query.published_only && !course.is_published {
            return false;
        }
        if query.exclude_ids.contains(&course.id) {
            return false;
        }
        if let Some(category_id) = query.category_id {
            if course.category_id != category_id {
                return false;
            }
        }
        if let Some(level) = query.level {
            if course.level != level {
                return false;
            }
        }
        if let Some(min) = query.min_price {
            if course.effective_price() < min {
                return false;
            }
        }
        if let Some(max) = query.max_price {
            if course.effective_price() > max {
                return false;
            }
        }
        if let Some(min_rating) = query.min_rating {
            if course.average_rating < min_rating {
                return false;
            }
        }
        if let Some(is_free) = query.is_free {
            if course.is_free != is_free {
                return false;
            }
        }
        if let Some(language) = &query.language {
            if !course.language.eq_ignore_ascii_case(language) {
                return false;
            }
        }
        if !query.tags_any.is_empty() && !tags_overlap(&course.tags, &query.tags_any) {
            return false;
        }
        if let Some(text) = &query.text {
            if !course_matches_text(course, text) {
                return false;
            }
        }
        if let Some(similar) = &query.similar_to {
            let same_category = similar.category_id == Some(course.category_id);
            let same_level = similar.level == Some(course.level);
            let same_mentor = similar.mentor_id == Some(course.mentor_id);
            let shared_tags = tags_overlap(&course.tags, &similar.tags);
            if !(same_category || same_level || same_mentor || shared_tags) {
                return false;
            }
        }
        true
    }

    fn matches_mentor(mentor: &Mentor, query: &MentorQuery) -> bool {
        if let Some(min_rating) = query.min_rating {
            if mentor.average_rating < min_rating {
                return false;
            }
        }
        if let Some(min_years) = query.min_experience_years {
            if mentor.experience_years < min_years {
                return false;
            }
        }
        if !query.expertise_any.is_empty() && !tags_overlap(&mentor.expertise, &query.expertise_any)
        {
            return false;
        }
        if let Some(text) = &query.text {
            let needle = text.to_lowercase();
            let in_name = mentor.display_name.to_lowercase().contains(&needle);
            let in_headline = mentor.headline.to_lowercase().contains(&needle);
            let in_expertise = mentor
                .expertise
                .iter()
                .any(|skill| skill.to_lowercase().contains(&needle));
            if !(in_name || in_headline || in_expertise) {
                return false;
            }
        }
        true
    }
}

fn tags_overlap(a: &[String], b: &[String]) -> bool {
    a.iter()
        .any(|tag| b.iter().any(|other| tag.eq_ignore_ascii_case(other)))
}

fn course_matches_text(course: &Course, text: &str) -> bool {
    let needle = text.to_lowercase();
    course.title.to_lowercase().contains(&needle)
        || course.description.to_lowercase().contains(&needle)
        || course.short_description.to_lowercase().contains(&needle)
        || course
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn course_ordering(a: &Course, b: &Course, sort: CourseSort) -> Ordering {
    match sort {
        CourseSort::Relevance => Ordering::Equal,
        CourseSort::Rating => cmp_f64(a.average_rating, b.average_rating),
        CourseSort::Students => a
            .total_students
            .cmp(&b.total_students)
            .then(cmp_f64(a.average_rating, b.average_rating))
            .then(a.total_reviews.cmp(&b.total_reviews)),
        CourseSort::Price => a.effective_price().cmp(&b.effective_price()),
        CourseSort::Newest => a.published_at.cmp(&b.published_at),
    }
}

fn mentor_ordering(a: &Mentor, b: &Mentor, sort: MentorSort) -> Ordering {
    match sort {
        MentorSort::Relevance => Ordering::Equal,
        MentorSort::Rating => cmp_f64(a.average_rating, b.average_rating),
        MentorSort::Students => a.total_students.cmp(&b.total_students),
        MentorSort::Experience => a.experience_years.cmp(&b.experience_years),
    }
}

/// Stable directional sort: equal keys keep retrieval order either way.
fn sort_directed<T>(items: &mut [T], direction: SortDirection, cmp: impl Fn(&T, &T) -> Ordering) {
    match direction {
        SortDirection::Asc => items.sort_by(|a, b| cmp(a, b)),
        SortDirection::Desc => items.sort_by(|a, b| cmp(b, a)),
    }
}

fn paginate<T>(items: Vec<T>, offset: usize, limit: usize) -> Vec<T> {
    items.into_iter().skip(offset).take(limit).collect()
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn query_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, CatalogError> {
        let mut matched: Vec<Course> = self
            .courses
            .iter()
            .filter(|course| Self::matches_course(course, query))
            .cloned()
            .collect();
        if query.sort != CourseSort::Relevance {
            sort_directed(&mut matched, query.direction, |a, b| {
                course_ordering(a, b, query.sort)
            });
        }
        Ok(paginate(matched, query.offset, query.limit))
    }

    async fn count_courses(&self, query: &CourseQuery) -> Result<u64, CatalogError> {
        let count = self
            .courses
            .iter()
            .filter(|course| Self::matches_course(course, query))
            .count();
        Ok(count as u64)
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, CatalogError> {
        Ok(self.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn query_mentors(&self, query: &MentorQuery) -> Result<Vec<Mentor>, CatalogError> {
        let mut matched: Vec<Mentor> = self
            .mentors
            .iter()
            .filter(|mentor| Self::matches_mentor(mentor, query))
            .cloned()
            .collect();
        if query.sort != MentorSort::Relevance {
            sort_directed(&mut matched, query.direction, |a, b| {
                mentor_ordering(a, b, query.sort)
            });
        }
        Ok(paginate(matched, query.offset, query.limit))
    }

    async fn count_mentors(&self, query: &MentorQuery) -> Result<u64, CatalogError> {
        let count = self
            .mentors
            .iter()
            .filter(|mentor| Self::matches_mentor(mentor, query))
            .count();
        Ok(count as u64)
    }

    async fn get_categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CatalogError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.categories.get(id).cloned())
            .collect())
    }

    async fn enrollments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<EnrollmentRecord>, CatalogError> {
        Ok(self.enrollments.get(&user_id).cloned().unwrap_or_default())
    }

    async fn reviews_by_user(&self, user_id: UserId) -> Result<Vec<ReviewRecord>, CatalogError> {
        Ok(self.reviews.get(&user_id).cloned().unwrap_or_default())
    }

    async fn wishlist_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WishlistRecord>, CatalogError> {
        Ok(self.wishlists.get(&user_id).cloned().unwrap_or_default())
    }

    async fn recent_course_views(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ViewEvent>, CatalogError> {
        let mut events = self.views.get(&user_id).cloned().unwrap_or_default();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        events.truncate(limit);
        Ok(events)
    }
}
