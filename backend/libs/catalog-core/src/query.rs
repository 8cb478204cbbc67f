use serde::{Deserialize, Serialize};

use crate::models::{CategoryId, CourseId, CourseLevel, MentorId};

/// Sort keys accepted by course queries. Malformed sort input is
/// unrepresentable; callers deserialize into this enum or fail early.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseSort {
    #[default]
    Relevance,
    Rating,
    Students,
    Price,
    Newest,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentorSort {
    #[default]
    Relevance,
    Rating,
    Students,
    Experience,
}

/// Similarity reference for the similar-to retrieval mode. A candidate
/// matches when ANY of the fields match, in contrast to the flat filters
/// of [`CourseQuery`] which combine with AND semantics.
#[derive(Debug, Clone, Default)]
pub struct SimilarityFilter {
    pub category_id: Option<CategoryId>,
    pub level: Option<CourseLevel>,
    pub mentor_id: Option<MentorId>,
    pub tags: Vec<String>,
}

/// Store-level course query. All flat filters combine with AND semantics;
/// `similar_to` matches with ANY semantics. Every query carries an explicit
/// `limit` so no catalog read is unbounded.
#[derive(Debug, Clone, Default)]
pub struct CourseQuery {
    pub text: Option<String>,
    pub category_id: Option<CategoryId>,
    pub level: Option<CourseLevel>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_rating: Option<f64>,
    pub is_free: Option<bool>,
    pub tags_any: Vec<String>,
    pub language: Option<String>,
    pub exclude_ids: Vec<CourseId>,
    pub similar_to: Option<SimilarityFilter>,
    pub published_only: bool,
    pub sort: CourseSort,
    pub direction: SortDirection,
    pub offset: usize,
    pub limit: usize,
}

impl CourseQuery {
    /// Query over published courses with a bounded result set.
    pub fn published(limit: usize) -> Self {
        Self {
            published_only: true,
            limit,
            ..Self::default()
        }
    }
}

/// Store-level mentor query, AND semantics throughout.
#[derive(Debug, Clone, Default)]
pub struct MentorQuery {
    pub text: Option<String>,
    pub expertise_any: Vec<String>,
    pub min_rating: Option<f64>,
    pub min_experience_years: Option<u32>,
    pub sort: MentorSort,
    pub direction: SortDirection,
    pub offset: usize,
    pub limit: usize,
}

/// Caller-supplied course search filters. Validation failures here are the
/// one error class that propagates to the caller as a request bug.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub category_id: Option<CategoryId>,
    pub level: Option<CourseLevel>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_rating: Option<f64>,
    pub is_free: Option<bool>,
    pub tags: Vec<String>,
    pub language: Option<String>,
    pub page: usize,
    pub limit: usize,
    pub sort: CourseSort,
    pub direction: SortDirection,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            category_id: None,
            level: None,
            min_price: None,
            max_price: None,
            min_rating: None,
            is_free: None,
            tags: Vec::new(),
            language: None,
            page: 1,
            limit: 20,
            sort: CourseSort::default(),
            direction: SortDirection::default(),
        }
    }
}

impl SearchFilters {
    pub fn validate(&self, max_limit: usize) -> Result<(), String> {
        if self.page < 1 {
            return Err(format!("page must be >= 1, got {}", self.page));
        }
        if self.limit == 0 {
            return Err("limit must be positive".to_string());
        }
        if self.limit > max_limit {
            return Err(format!("limit must be <= {}, got {}", max_limit, self.limit));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(format!("min_price {} exceeds max_price {}", min, max));
            }
        }
        if let Some(rating) = self.min_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(format!("min_rating must be in [0, 5], got {}", rating));
            }
        }
        Ok(())
    }

    /// Translate to a paginated store query over published courses.
    pub fn to_query(&self) -> CourseQuery {
        CourseQuery {
            text: self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            category_id: self.category_id,
            level: self.level,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rating: self.min_rating,
            is_free: self.is_free,
            tags_any: self.tags.clone(),
            language: self.language.clone(),
            exclude_ids: Vec::new(),
            similar_to: None,
            published_only: true,
            sort: self.sort,
            direction: self.direction,
            offset: (self.page - 1) * self.limit,
            limit: self.limit,
        }
    }
}

/// Caller-supplied mentor search filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MentorFilters {
    pub query: Option<String>,
    pub expertise: Vec<String>,
    pub min_rating: Option<f64>,
    pub min_experience_years: Option<u32>,
    pub page: usize,
    pub limit: usize,
    pub sort: MentorSort,
    pub direction: SortDirection,
}

impl Default for MentorFilters {
    fn default() -> Self {
        Self {
            query: None,
            expertise: Vec::new(),
            min_rating: None,
            min_experience_years: None,
            page: 1,
            limit: 20,
            sort: MentorSort::default(),
            direction: SortDirection::default(),
        }
    }
}

impl MentorFilters {
    pub fn validate(&self, max_limit: usize) -> Result<(), String> {
        if self.page < 1 {
            return Err(format!("page must be >= 1, got {}", self.page));
        }
        if self.limit == 0 {
            return Err("limit must be positive".to_string());
        }
        if self.limit > max_limit {
            return Err(format!("limit must be <= {}, got {}", max_limit, self.limit));
        }
        if let Some(rating) = self.min_rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(format!("min_rating must be in [0, 5], got {}", rating));
            }
        }
        Ok(())
    }

    pub fn to_query(&self) -> MentorQuery {
        MentorQuery {
            text: self
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(String::from),
            expertise_any: self.expertise.clone(),
            min_rating: self.min_rating,
            min_experience_years: self.min_experience_years,
            sort: self.sort,
            direction: self.direction,
            offset: (self.page - 1) * self.limit,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_validate() {
        let filters = SearchFilters::default();
        assert!(filters.validate(100).is_ok());
    }

    #[test]
    fn zero_limit_rejected() {
        let filters = SearchFilters {
            limit: 0,
            ..Default::default()
        };
        assert!(filters.validate(100).is_err());
    }

    #[test]
    fn inverted_price_range_rejected() {
        let filters = SearchFilters {
            min_price: Some(500_000),
            max_price: Some(100_000),
            ..Default::default()
        };
        assert!(filters.validate(100).is_err());
    }

    #[test]
    fn pagination_maps_to_offset() {
        let filters = SearchFilters {
            page: 3,
            limit: 20,
            ..Default::default()
        };
        let query = filters.to_query();
        assert_eq!(query.offset, 40);
        assert_eq!(query.limit, 20);
        assert!(query.published_only);
    }

    #[test]
    fn blank_query_text_dropped() {
        let filters = SearchFilters {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.to_query().text, None);
    }
}
