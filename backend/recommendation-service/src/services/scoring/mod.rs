//! Deterministic, side-effect-free scoring. All five variants share the
//! additive model `score = sum(weight x feature)` and differ only in which
//! features apply. Results are always sorted descending by score and
//! truncated; ties keep retrieval order (stable sort).

pub mod features;

use catalog_core::Course;
use tracing::warn;

use crate::models::{reason, AffinityProfile, ScoredCourse};
use features::{log_students, quality_bonus, shared_tag_count};

const PERSONAL_CATEGORY_WEIGHT: f64 = 5.0;
const PERSONAL_LEVEL_WEIGHT: f64 = 3.0;
const PERSONAL_TAG_WEIGHT: f64 = 2.0;
const PERSONAL_RATING_WEIGHT: f64 = 2.0;
const PERSONAL_STUDENTS_WEIGHT: f64 = 3.0;
const RECENCY_BONUS: f64 = 10.0;

const SIMILAR_CATEGORY_BONUS: f64 = 10.0;
const SIMILAR_LEVEL_BONUS: f64 = 5.0;
const SIMILAR_TAG_BONUS: f64 = 3.0;
const SAME_MENTOR_BONUS: f64 = 8.0;

const CATEGORY_RATING_WEIGHT: f64 = 10.0;

const VIEWED_CATEGORY_BONUS: f64 = 10.0;
const VIEWED_TAG_BONUS: f64 = 3.0;
const VIEWED_RATING_WEIGHT: f64 = 10.0;

/// Minimum combined category+tag contribution for the interests reason.
const STRONG_AFFINITY_THRESHOLD: f64 = 6.0;

/// Inputs to the ordered reason rule list. Exactly one reason is attached
/// per candidate: the first rule that holds, in priority order
/// recency > same-mentor > category/tag affinity > quality > default.
struct ReasonSignals {
    recently_viewed: bool,
    same_mentor: bool,
    affinity: f64,
    affinity_label: &'static str,
    quality: f64,
}

fn pick_reason(signals: &ReasonSignals) -> &'static str {
    let rules = [
        (signals.recently_viewed, reason::RECENTLY_VIEWED),
        (signals.same_mentor, reason::SAME_MENTOR),
        (
            signals.affinity >= STRONG_AFFINITY_THRESHOLD,
            signals.affinity_label,
        ),
        (signals.quality > 0.0, reason::HIGHLY_RATED),
    ];
    rules
        .iter()
        .find(|(hit, _)| *hit)
        .map(|(_, label)| *label)
        .unwrap_or(reason::DEFAULT)
}

pub fn score_personalized(
    candidates: Vec<Course>,
    profile: &AffinityProfile,
    limit: usize,
) -> Vec<ScoredCourse> {
    let scored = candidates
        .into_iter()
        .map(|course| {
            let category_part =
                profile.category_weight(course.category_id) * PERSONAL_CATEGORY_WEIGHT;
            let level_part = profile.level_weight(course.level) * PERSONAL_LEVEL_WEIGHT;
            let tag_part: f64 = course
                .tags
                .iter()
                .map(|tag| profile.tag_weight(tag))
                .sum::<f64>()
                * PERSONAL_TAG_WEIGHT;
            let popularity = course.average_rating * PERSONAL_RATING_WEIGHT
                + log_students(course.total_students) * PERSONAL_STUDENTS_WEIGHT;
            let recently_viewed = profile.recently_viewed.contains(&course.id);
            let recency = if recently_viewed { RECENCY_BONUS } else { 0.0 };
            let quality = quality_bonus(&course);

            let score = category_part + level_part + tag_part + popularity + recency + quality;
            let label = pick_reason(&ReasonSignals {
                recently_viewed,
                same_mentor: false,
                affinity: category_part + tag_part,
                affinity_label: reason::MATCHES_INTERESTS,
                quality,
            });
            ScoredCourse {
                course,
                score,
                reason: label.to_string(),
            }
        })
        .collect();
    sort_and_truncate(scored, limit)
}

pub fn score_similar(
    reference: &Course,
    candidates: Vec<Course>,
    limit: usize,
) -> Vec<ScoredCourse> {
    let scored = candidates
        .into_iter()
        .map(|course| {
            let category_part = if course.category_id == reference.category_id {
                SIMILAR_CATEGORY_BONUS
            } else {
                0.0
            };
            let level_part = if course.level == reference.level {
                SIMILAR_LEVEL_BONUS
            } else {
                0.0
            };
            let tag_part =
                shared_tag_count(&course.tags, &reference.tags) as f64 * SIMILAR_TAG_BONUS;
            let same_mentor = course.mentor_id == reference.mentor_id;
            let mentor_part = if same_mentor { SAME_MENTOR_BONUS } else { 0.0 };
            let popularity = course.average_rating * PERSONAL_RATING_WEIGHT
                + log_students(course.total_students);
            let quality = quality_bonus(&course);

            let score = category_part + level_part + tag_part + mentor_part + popularity + quality;
            let label = pick_reason(&ReasonSignals {
                recently_viewed: false,
                same_mentor,
                affinity: category_part + tag_part,
                affinity_label: reason::SIMILAR_TOPICS,
                quality,
            });
            ScoredCourse {
                course,
                score,
                reason: label.to_string(),
            }
        })
        .collect();
    sort_and_truncate(scored, limit)
}

/// Fallback ranking: the student count is the sort key. Candidates arrive
/// pre-ordered by the popularity tie-break chain; the stable sort keeps it.
pub fn score_trending(candidates: Vec<Course>, limit: usize) -> Vec<ScoredCourse> {
    let scored = candidates
        .into_iter()
        .map(|course| {
            let score = course.total_students as f64;
            ScoredCourse {
                course,
                score,
                reason: reason::TRENDING.to_string(),
            }
        })
        .collect();
    sort_and_truncate(scored, limit)
}

pub fn score_in_category(candidates: Vec<Course>, limit: usize) -> Vec<ScoredCourse> {
    let scored = candidates
        .into_iter()
        .map(|course| {
            let score = course.average_rating * CATEGORY_RATING_WEIGHT
                + log_students(course.total_students);
            ScoredCourse {
                course,
                score,
                reason: reason::IN_CATEGORY.to_string(),
            }
        })
        .collect();
    sort_and_truncate(scored, limit)
}

/// Scores against the categories and tags of the viewer's last few viewed
/// courses.
pub fn score_because_viewed(
    basis: &[Course],
    candidates: Vec<Course>,
    limit: usize,
) -> Vec<ScoredCourse> {
    let basis_categories: Vec<_> = basis.iter().map(|c| c.category_id).collect();
    let basis_tags: Vec<String> = basis.iter().flat_map(|c| c.tags.iter().cloned()).collect();

    let scored = candidates
        .into_iter()
        .map(|course| {
            let category_part = if basis_categories.contains(&course.category_id) {
                VIEWED_CATEGORY_BONUS
            } else {
                0.0
            };
            let tag_part = shared_tag_count(&course.tags, &basis_tags) as f64 * VIEWED_TAG_BONUS;
            let score = category_part + tag_part + course.average_rating * VIEWED_RATING_WEIGHT;
            ScoredCourse {
                course,
                score,
                reason: reason::BECAUSE_VIEWED.to_string(),
            }
        })
        .collect();
    sort_and_truncate(scored, limit)
}

fn sort_and_truncate(mut scored: Vec<ScoredCourse>, limit: usize) -> Vec<ScoredCourse> {
    scored.sort_by(|a, b| match b.score.partial_cmp(&a.score) {
        Some(ordering) => ordering,
        None => {
            warn!(
                course_a = %a.course.id,
                course_b = %b.course.id,
                "encountered NaN score, treating as equal"
            );
            std::cmp::Ordering::Equal
        }
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::CourseLevel;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn course(rating: f64, students: u64) -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Test course".to_string(),
            slug: "test-course".to_string(),
            thumbnail: None,
            short_description: "short".to_string(),
            description: "long".to_string(),
            level: CourseLevel::Beginner,
            price: 150_000,
            discount_price: None,
            is_free: false,
            category_id: Uuid::new_v4(),
            tags: vec!["rust".to_string()],
            mentor_id: Uuid::new_v4(),
            average_rating: rating,
            total_students: students,
            total_reviews: 12,
            language: "en".to_string(),
            is_published: true,
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn empty_profile_scores_pure_popularity() {
        // rating 4.8, 999 students: 4.8*2 + log10(1000)*3 + 5 = 23.6
        // (+5 quality for rating >= 4.5; no +3 since students < 1000)
        let profile = AffinityProfile::default();
        let scored = score_personalized(vec![course(4.8, 999)], &profile, 10);
        assert_eq!(scored.len(), 1);
        assert!((scored[0].score - 23.6).abs() < 1e-9);
        assert_eq!(scored[0].reason, reason::HIGHLY_RATED);
    }

    #[test]
    fn scores_sorted_descending() {
        let profile = AffinityProfile::default();
        let scored = score_personalized(
            vec![course(3.0, 10), course(4.9, 5000), course(4.0, 100)],
            &profile,
            10,
        );
        for pair in scored.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn truncates_to_limit() {
        let profile = AffinityProfile::default();
        let scored = score_personalized(
            vec![course(3.0, 10), course(4.0, 10), course(5.0, 10)],
            &profile,
            2,
        );
        assert_eq!(scored.len(), 2);
    }

    #[test]
    fn recency_reason_outranks_affinity_and_quality() {
        let mut profile = AffinityProfile::default();
        let candidate = course(4.9, 5000);
        profile
            .category_affinity
            .insert(candidate.category_id, 9.0);
        profile.recently_viewed.push(candidate.id);

        let scored = score_personalized(vec![candidate], &profile, 10);
        assert_eq!(scored[0].reason, reason::RECENTLY_VIEWED);
    }

    #[test]
    fn strong_affinity_reason_outranks_quality() {
        let mut profile = AffinityProfile::default();
        let candidate = course(4.9, 5000);
        profile
            .category_affinity
            .insert(candidate.category_id, 3.0);

        let scored = score_personalized(vec![candidate], &profile, 10);
        // category contribution 3.0 * 5 = 15 >= threshold
        assert_eq!(scored[0].reason, reason::MATCHES_INTERESTS);
    }

    #[test]
    fn similar_same_mentor_gets_mentor_reason_and_bonus() {
        let reference = course(4.0, 100);
        let mut candidate = course(3.0, 50);
        candidate.mentor_id = reference.mentor_id;
        candidate.category_id = reference.category_id;
        candidate.tags = vec!["other".to_string()];

        let scored = score_similar(&reference, vec![candidate], 10);
        assert_eq!(scored[0].reason, reason::SAME_MENTOR);
        // category 10 + level 5 + mentor 8 + rating 3*2 + log10(51)
        let expected = 10.0 + 5.0 + 8.0 + 6.0 + (51f64).log10();
        assert!((scored[0].score - expected).abs() < 1e-9);
    }

    #[test]
    fn trending_scores_by_students_only() {
        let a = course(1.0, 500);
        let b = course(5.0, 200);
        let scored = score_trending(vec![b.clone(), a.clone()], 10);
        assert_eq!(scored[0].course.id, a.id);
        assert_eq!(scored[0].score, 500.0);
        assert!(scored.iter().all(|s| s.reason == reason::TRENDING));
    }

    #[test]
    fn because_viewed_rewards_category_and_tags() {
        let viewed = course(4.0, 100);
        let mut related = course(4.5, 100);
        related.category_id = viewed.category_id;
        related.tags = viewed.tags.clone();
        let unrelated = course(4.5, 100);

        let scored = score_because_viewed(
            std::slice::from_ref(&viewed),
            vec![unrelated.clone(), related.clone()],
            10,
        );
        assert_eq!(scored[0].course.id, related.id);
        // category 10 + one shared tag 3 + rating 4.5*10
        assert!((scored[0].score - 58.0).abs() < 1e-9);
    }

    #[test]
    fn ties_keep_retrieval_order() {
        let a = course(4.0, 100);
        let b = course(4.0, 100);
        let profile = AffinityProfile::default();
        let scored = score_personalized(vec![a.clone(), b.clone()], &profile, 10);
        assert_eq!(scored[0].course.id, a.id);
        assert_eq!(scored[1].course.id, b.id);
    }
}
