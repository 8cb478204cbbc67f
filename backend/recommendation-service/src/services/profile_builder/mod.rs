use std::sync::Arc;

use catalog_core::{CatalogError, CatalogStore, CourseSignal, UserId};
use tracing::{debug, warn};

use crate::error::{RecommendationError, Result};
use crate::models::AffinityProfile;

// Committed actions (enrolling) weigh stronger than passive intent
// (wishlisting): 3/3/2 vs 2/2/1 per category/level/tag signal.
const ENROLLMENT_CATEGORY_WEIGHT: f64 = 3.0;
const ENROLLMENT_LEVEL_WEIGHT: f64 = 3.0;
const ENROLLMENT_TAG_WEIGHT: f64 = 2.0;
const WISHLIST_CATEGORY_WEIGHT: f64 = 2.0;
const WISHLIST_LEVEL_WEIGHT: f64 = 2.0;
const WISHLIST_TAG_WEIGHT: f64 = 1.0;

/// A positive review reinforces the reviewed (enrolled) course's signals at
/// wishlist strength.
const POSITIVE_REVIEW_THRESHOLD: f64 = 4.0;

/// Builds the transient [`AffinityProfile`] from four independent history
/// queries, fanned out concurrently and folded after all branches return.
pub struct ProfileBuilder {
    store: Arc<dyn CatalogStore>,
    view_history_limit: usize,
}

impl ProfileBuilder {
    pub fn new(store: Arc<dyn CatalogStore>, view_history_limit: usize) -> Self {
        Self {
            store,
            view_history_limit,
        }
    }

    /// A failed sub-query degrades that signal to empty; only all four
    /// failing yields an error (the orchestrator then treats the user as
    /// having no personalization available).
    pub async fn build(&self, user_id: UserId) -> Result<AffinityProfile> {
        let (enrollments, reviews, wishlist, views) = tokio::join!(
            self.store.enrollments_for_user(user_id),
            self.store.reviews_by_user(user_id),
            self.store.wishlist_for_user(user_id),
            self.store.recent_course_views(user_id, self.view_history_limit),
        );

        if enrollments.is_err() && reviews.is_err() && wishlist.is_err() && views.is_err() {
            warn!(%user_id, "all profile sub-queries failed");
            return Err(RecommendationError::ProfileUnavailable);
        }

        let enrollments = recover(enrollments, "enrollments", user_id);
        let reviews = recover(reviews, "reviews", user_id);
        let wishlist = recover(wishlist, "wishlist", user_id);
        let views = recover(views, "activity_log", user_id);

        let mut profile = AffinityProfile::default();

        for record in &enrollments {
            profile.enrolled_course_ids.insert(record.course.id);
            fold_signal(
                &mut profile,
                &record.course,
                ENROLLMENT_CATEGORY_WEIGHT,
                ENROLLMENT_LEVEL_WEIGHT,
                ENROLLMENT_TAG_WEIGHT,
            );
        }

        for review in &reviews {
            if review.rating < POSITIVE_REVIEW_THRESHOLD {
                continue;
            }
            // Reviews carry only course_id + rating; resolve the signal
            // against the enrollment projection.
            if let Some(record) = enrollments
                .iter()
                .find(|e| e.course.id == review.course_id)
            {
                fold_signal(
                    &mut profile,
                    &record.course,
                    WISHLIST_CATEGORY_WEIGHT,
                    WISHLIST_LEVEL_WEIGHT,
                    WISHLIST_TAG_WEIGHT,
                );
            }
        }

        for record in &wishlist {
            fold_signal(
                &mut profile,
                &record.course,
                WISHLIST_CATEGORY_WEIGHT,
                WISHLIST_LEVEL_WEIGHT,
                WISHLIST_TAG_WEIGHT,
            );
        }

        profile.recently_viewed = views.into_iter().map(|event| event.entity_id).collect();

        debug!(
            %user_id,
            enrolled = profile.enrolled_course_ids.len(),
            categories = profile.category_affinity.len(),
            tags = profile.tag_affinity.len(),
            recently_viewed = profile.recently_viewed.len(),
            "affinity profile built"
        );

        Ok(profile)
    }
}

fn recover<T>(
    result: std::result::Result<Vec<T>, CatalogError>,
    signal: &'static str,
    user_id: UserId,
) -> Vec<T> {
    match result {
        Ok(records) => records,
        Err(e) => {
            warn!(%user_id, signal, error = %e, "profile sub-query failed, signal degraded to empty");
            Vec::new()
        }
    }
}

fn fold_signal(
    profile: &mut AffinityProfile,
    signal: &CourseSignal,
    category_weight: f64,
    level_weight: f64,
    tag_weight: f64,
) {
    *profile
        .category_affinity
        .entry(signal.category_id)
        .or_default() += category_weight;
    *profile.level_affinity.entry(signal.level).or_default() += level_weight;
    for tag in &signal.tags {
        *profile.tag_affinity.entry(tag.clone()).or_default() += tag_weight;
    }
}
