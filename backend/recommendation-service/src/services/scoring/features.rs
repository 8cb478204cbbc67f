//! Pure feature extractors shared by the scoring variants.

use catalog_core::Course;

pub const HIGH_RATING_THRESHOLD: f64 = 4.5;
pub const HIGH_RATING_BONUS: f64 = 5.0;
pub const POPULAR_STUDENTS_THRESHOLD: u64 = 1000;
pub const POPULAR_STUDENTS_BONUS: f64 = 3.0;

/// `log10(students + 1)`; the +1 smooths the singularity at zero so an
/// unenrolled course contributes exactly 0.
pub fn log_students(total_students: u64) -> f64 {
    ((total_students + 1) as f64).log10()
}

pub fn shared_tag_count(a: &[String], b: &[String]) -> usize {
    a.iter()
        .filter(|tag| b.iter().any(|other| tag.eq_ignore_ascii_case(other)))
        .count()
}

/// +5 for an excellent rating, +3 for a large student body.
pub fn quality_bonus(course: &Course) -> f64 {
    let mut bonus = 0.0;
    if course.average_rating >= HIGH_RATING_THRESHOLD {
        bonus += HIGH_RATING_BONUS;
    }
    if course.total_students >= POPULAR_STUDENTS_THRESHOLD {
        bonus += POPULAR_STUDENTS_BONUS;
    }
    bonus
}
