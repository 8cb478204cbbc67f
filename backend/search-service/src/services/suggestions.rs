use std::sync::Arc;

use catalog_core::{CatalogStore, CourseQuery, MentorQuery};
use tracing::debug;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::{CourseSuggestion, MentorSuggestion, SearchSuggestions};

/// Queries shorter than this return empty groups without touching the
/// store.
const MIN_QUERY_CHARS: usize = 2;

/// Autocomplete over course titles, mentor names and tags.
pub struct SuggestionService {
    store: Arc<dyn CatalogStore>,
    config: SearchConfig,
}

impl SuggestionService {
    pub fn new(store: Arc<dyn CatalogStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub async fn suggest(&self, query: &str, limit: usize) -> Result<SearchSuggestions> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchSuggestions::default());
        }
        let limit = limit.clamp(1, self.config.max_suggestions);

        let course_query = CourseQuery {
            text: Some(trimmed.to_string()),
            ..CourseQuery::published(limit)
        };
        let mentor_query = MentorQuery {
            text: Some(trimmed.to_string()),
            limit,
            ..MentorQuery::default()
        };
        let (courses, mentors) = tokio::join!(
            self.store.query_courses(&course_query),
            self.store.query_mentors(&mentor_query),
        );
        let courses = courses?;
        let mentors = mentors?;

        // Tags come from the matched courses; a course matched by tag is
        // already part of the text-match universe.
        let needle = trimmed.to_lowercase();
        let mut tags: Vec<String> = Vec::new();
        for course in &courses {
            for tag in &course.tags {
                if tag.to_lowercase().contains(&needle)
                    && !tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
                {
                    tags.push(tag.clone());
                }
            }
        }
        tags.truncate(limit);

        debug!(
            query = trimmed,
            courses = courses.len(),
            mentors = mentors.len(),
            tags = tags.len(),
            "suggestions computed"
        );

        Ok(SearchSuggestions {
            courses: courses
                .into_iter()
                .map(|course| CourseSuggestion {
                    id: course.id,
                    title: course.title,
                    slug: course.slug,
                })
                .collect(),
            mentors: mentors
                .into_iter()
                .map(|mentor| MentorSuggestion {
                    id: mentor.id,
                    display_name: mentor.display_name,
                    headline: mentor.headline,
                })
                .collect(),
            tags,
        })
    }
}
