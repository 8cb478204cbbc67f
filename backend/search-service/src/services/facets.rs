//! Facet aggregation over the filtered candidate universe.
//!
//! Price and experience ranges use fixed static buckets rather than
//! quantiles computed from the live distribution; the bucket set is part of
//! the search UI contract.

use std::collections::HashMap;
use std::sync::Arc;

use catalog_core::{CatalogError, CatalogStore, CourseLevel, CourseQuery, MentorQuery};
use tracing::debug;

use crate::models::{CourseFacets, FacetBucket, MentorFacets};

const PRICE_BUCKET_LABELS: [&str; 5] =
    ["Free", "Under 100K", "100K - 250K", "250K - 500K", "Over 500K"];

const EXPERIENCE_BUCKET_LABELS: [&str; 4] =
    ["0-2 years", "3-5 years", "6-10 years", "10+ years"];

fn price_bucket_label(effective_price: i64) -> &'static str {
    if effective_price <= 0 {
        "Free"
    } else if effective_price < 100_000 {
        "Under 100K"
    } else if effective_price < 250_000 {
        "100K - 250K"
    } else if effective_price < 500_000 {
        "250K - 500K"
    } else {
        "Over 500K"
    }
}

fn experience_bucket_label(years: u32) -> &'static str {
    match years {
        0..=2 => "0-2 years",
        3..=5 => "3-5 years",
        6..=10 => "6-10 years",
        _ => "10+ years",
    }
}

pub struct FacetAggregator {
    store: Arc<dyn CatalogStore>,
    scan_limit: usize,
}

impl FacetAggregator {
    pub fn new(store: Arc<dyn CatalogStore>, scan_limit: usize) -> Self {
        Self { store, scan_limit }
    }

    /// Group the same filtered universe as the main query (unpaginated,
    /// bounded by the scan cap) by category, level and price bucket.
    pub async fn course_facets(&self, query: &CourseQuery) -> Result<CourseFacets, CatalogError> {
        let start = std::time::Instant::now();

        let mut scan = query.clone();
        scan.offset = 0;
        scan.limit = self.scan_limit;
        let universe = self.store.query_courses(&scan).await?;

        let mut category_counts: HashMap<catalog_core::CategoryId, u64> = HashMap::new();
        let mut level_counts: HashMap<CourseLevel, u64> = HashMap::new();
        let mut price_counts: HashMap<&'static str, u64> = HashMap::new();
        for course in &universe {
            *category_counts.entry(course.category_id).or_default() += 1;
            *level_counts.entry(course.level).or_default() += 1;
            *price_counts
                .entry(price_bucket_label(course.effective_price()))
                .or_default() += 1;
        }

        let category_ids: Vec<_> = category_counts.keys().copied().collect();
        let categories = self.store.get_categories(&category_ids).await?;
        let mut category_buckets: Vec<FacetBucket> = categories
            .into_iter()
            .filter_map(|category| {
                category_counts.get(&category.id).map(|&count| FacetBucket {
                    label: category.name,
                    count,
                })
            })
            .collect();
        category_buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        // Levels and price ranges are closed dimensions: report every bucket
        // in fixed order, zero counts included.
        let levels = CourseLevel::ALL
            .iter()
            .map(|level| FacetBucket {
                label: level.as_str().to_string(),
                count: level_counts.get(level).copied().unwrap_or(0),
            })
            .collect();
        let price_ranges = PRICE_BUCKET_LABELS
            .iter()
            .map(|label| FacetBucket {
                label: label.to_string(),
                count: price_counts.get(label).copied().unwrap_or(0),
            })
            .collect();

        debug!(
            universe = universe.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "computed course facets"
        );

        Ok(CourseFacets {
            categories: category_buckets,
            levels,
            price_ranges,
        })
    }

    pub async fn mentor_facets(&self, query: &MentorQuery) -> Result<MentorFacets, CatalogError> {
        let start = std::time::Instant::now();

        let mut scan = query.clone();
        scan.offset = 0;
        scan.limit = self.scan_limit;
        let universe = self.store.query_mentors(&scan).await?;

        let mut expertise_counts: HashMap<String, u64> = HashMap::new();
        let mut experience_counts: HashMap<&'static str, u64> = HashMap::new();
        for mentor in &universe {
            for skill in &mentor.expertise {
                *expertise_counts.entry(skill.to_lowercase()).or_default() += 1;
            }
            *experience_counts
                .entry(experience_bucket_label(mentor.experience_years))
                .or_default() += 1;
        }

        let mut expertise: Vec<FacetBucket> = expertise_counts
            .into_iter()
            .map(|(label, count)| FacetBucket { label, count })
            .collect();
        expertise.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

        let experience_ranges = EXPERIENCE_BUCKET_LABELS
            .iter()
            .map(|label| FacetBucket {
                label: label.to_string(),
                count: experience_counts.get(label).copied().unwrap_or(0),
            })
            .collect();

        debug!(
            universe = universe.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "computed mentor facets"
        );

        Ok(MentorFacets {
            expertise,
            experience_ranges,
        })
    }
}
