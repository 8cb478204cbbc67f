use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use catalog_core::{
    CatalogError, CatalogStore, Category, CategoryId, Course, CourseId, CourseLevel, CourseQuery,
    EnrollmentRecord, MemoryCatalog, Mentor, MentorFilters, MentorQuery, ReviewRecord,
    SearchFilters, UserId, ViewEvent, WishlistRecord,
};
use search_service::{
    CourseSearchService, MentorSearchService, SearchConfig, SearchError, SuggestionService,
};

use async_trait::async_trait;

/// Delegating store that counts every catalog read, used to verify the
/// short-query suggestion short-circuit.
struct CountingCatalog {
    inner: MemoryCatalog,
    reads: AtomicUsize,
}

impl CountingCatalog {
    fn new(inner: MemoryCatalog) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.reads.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl CatalogStore for CountingCatalog {
    async fn query_courses(&self, query: &CourseQuery) -> Result<Vec<Course>, CatalogError> {
        self.bump();
        self.inner.query_courses(query).await
    }

    async fn count_courses(&self, query: &CourseQuery) -> Result<u64, CatalogError> {
        self.bump();
        self.inner.count_courses(query).await
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, CatalogError> {
        self.bump();
        self.inner.get_course(id).await
    }

    async fn query_mentors(&self, query: &MentorQuery) -> Result<Vec<Mentor>, CatalogError> {
        self.bump();
        self.inner.query_mentors(query).await
    }

    async fn count_mentors(&self, query: &MentorQuery) -> Result<u64, CatalogError> {
        self.bump();
        self.inner.count_mentors(query).await
    }

    async fn get_categories(&self, ids: &[CategoryId]) -> Result<Vec<Category>, CatalogError> {
        self.bump();
        self.inner.get_categories(ids).await
    }

    async fn enrollments_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<EnrollmentRecord>, CatalogError> {
        self.bump();
        self.inner.enrollments_for_user(user_id).await
    }

    async fn reviews_by_user(&self, user_id: UserId) -> Result<Vec<ReviewRecord>, CatalogError> {
        self.bump();
        self.inner.reviews_by_user(user_id).await
    }

    async fn wishlist_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<WishlistRecord>, CatalogError> {
        self.bump();
        self.inner.wishlist_for_user(user_id).await
    }

    async fn recent_course_views(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> Result<Vec<ViewEvent>, CatalogError> {
        self.bump();
        self.inner.recent_course_views(user_id, limit).await
    }
}

fn course(
    title: &str,
    category_id: CategoryId,
    level: CourseLevel,
    price: i64,
    tags: &[&str],
) -> Course {
    Course {
        id: Uuid::new_v4(),
        title: title.to_string(),
        slug: title.to_lowercase().replace(' ', "-"),
        thumbnail: None,
        short_description: format!("{} short", title),
        description: format!("{} long", title),
        level,
        price,
        discount_price: None,
        is_free: price == 0,
        category_id,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        mentor_id: Uuid::new_v4(),
        average_rating: 4.2,
        total_students: 500,
        total_reviews: 40,
        language: "en".to_string(),
        is_published: true,
        published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn mentor(name: &str, expertise: &[&str], years: u32) -> Mentor {
    Mentor {
        id: Uuid::new_v4(),
        display_name: name.to_string(),
        avatar: None,
        headline: format!("{}, instructor", name),
        expertise: expertise.iter().map(|s| s.to_string()).collect(),
        experience_years: years,
        average_rating: 4.5,
        total_students: 2000,
        total_courses: 5,
    }
}

struct Fixture {
    catalog: MemoryCatalog,
}

fn fixture() -> Fixture {
    let web_dev = Uuid::new_v4();
    let data_science = Uuid::new_v4();

    let mut catalog = MemoryCatalog::new();
    catalog.insert_category(Category {
        id: web_dev,
        name: "Web Development".to_string(),
        slug: "web-development".to_string(),
    });
    catalog.insert_category(Category {
        id: data_science,
        name: "Data Science".to_string(),
        slug: "data-science".to_string(),
    });

    catalog.insert_course(course(
        "HTML for Everyone",
        web_dev,
        CourseLevel::Beginner,
        0,
        &["html", "web"],
    ));
    catalog.insert_course(course(
        "Rust Web Services",
        web_dev,
        CourseLevel::Advanced,
        450_000,
        &["rust", "web"],
    ));
    catalog.insert_course(course(
        "Intro to Python",
        data_science,
        CourseLevel::Beginner,
        0,
        &["python"],
    ));
    catalog.insert_course(course(
        "Pandas in Depth",
        data_science,
        CourseLevel::Intermediate,
        120_000,
        &["python", "pandas"],
    ));

    catalog.insert_mentor(mentor("Ayu Lestari", &["rust", "web"], 8));
    catalog.insert_mentor(mentor("Budi Santoso", &["python"], 2));
    catalog.insert_mentor(mentor("Citra Dewi", &["python", "statistics"], 12));

    Fixture { catalog }
}

#[tokio::test]
async fn free_beginner_filter_combines_with_and() {
    let f = fixture();
    let service = CourseSearchService::new(Arc::new(f.catalog), SearchConfig::default());

    let filters = SearchFilters {
        is_free: Some(true),
        level: Some(CourseLevel::Beginner),
        ..Default::default()
    };
    let response = service.search(&filters).await.unwrap();

    assert_eq!(response.total, 2);
    assert_eq!(response.courses.len(), 2);
    assert!(response
        .courses
        .iter()
        .all(|c| c.is_free && c.level == CourseLevel::Beginner));
}

#[tokio::test]
async fn total_reflects_universe_not_page() {
    let f = fixture();
    let service = CourseSearchService::new(Arc::new(f.catalog), SearchConfig::default());

    let filters = SearchFilters {
        limit: 1,
        page: 2,
        ..Default::default()
    };
    let response = service.search(&filters).await.unwrap();

    assert_eq!(response.courses.len(), 1);
    assert_eq!(response.total, 4);
}

#[tokio::test]
async fn course_facets_resolve_labels_and_count_buckets() {
    let f = fixture();
    let service = CourseSearchService::new(Arc::new(f.catalog), SearchConfig::default());

    let response = service.search(&SearchFilters::default()).await.unwrap();
    let facets = response.facets;

    // Both categories count 2; the tie breaks alphabetically.
    assert_eq!(facets.categories[0].label, "Data Science");

    let web = facets
        .categories
        .iter()
        .find(|b| b.label == "Web Development")
        .unwrap();
    assert_eq!(web.count, 2);

    let beginner = facets
        .levels
        .iter()
        .find(|b| b.label == "beginner")
        .unwrap();
    assert_eq!(beginner.count, 2);

    let free = facets
        .price_ranges
        .iter()
        .find(|b| b.label == "Free")
        .unwrap();
    assert_eq!(free.count, 2);
    let mid = facets
        .price_ranges
        .iter()
        .find(|b| b.label == "100K - 250K")
        .unwrap();
    assert_eq!(mid.count, 1);
    let high = facets
        .price_ranges
        .iter()
        .find(|b| b.label == "250K - 500K")
        .unwrap();
    assert_eq!(high.count, 1);
}

#[tokio::test]
async fn facets_follow_the_filtered_universe() {
    let f = fixture();
    let service = CourseSearchService::new(Arc::new(f.catalog), SearchConfig::default());

    let filters = SearchFilters {
        is_free: Some(true),
        ..Default::default()
    };
    let response = service.search(&filters).await.unwrap();

    let free = response
        .facets
        .price_ranges
        .iter()
        .find(|b| b.label == "Free")
        .unwrap();
    assert_eq!(free.count, 2);
    assert!(response
        .facets
        .price_ranges
        .iter()
        .filter(|b| b.label != "Free")
        .all(|b| b.count == 0));
}

#[tokio::test]
async fn invalid_filters_propagate() {
    let f = fixture();
    let service = CourseSearchService::new(Arc::new(f.catalog), SearchConfig::default());

    let filters = SearchFilters {
        limit: 0,
        ..Default::default()
    };
    assert!(matches!(
        service.search(&filters).await,
        Err(SearchError::InvalidFilter(_))
    ));
}

#[tokio::test]
async fn mentor_search_filters_and_buckets_experience() {
    let f = fixture();
    let service = MentorSearchService::new(Arc::new(f.catalog), SearchConfig::default());

    let filters = MentorFilters {
        expertise: vec!["python".to_string()],
        ..Default::default()
    };
    let response = service.search(&filters).await.unwrap();

    assert_eq!(response.total, 2);
    let python = response
        .facets
        .expertise
        .iter()
        .find(|b| b.label == "python")
        .unwrap();
    assert_eq!(python.count, 2);

    let junior = response
        .facets
        .experience_ranges
        .iter()
        .find(|b| b.label == "0-2 years")
        .unwrap();
    assert_eq!(junior.count, 1);
    let senior = response
        .facets
        .experience_ranges
        .iter()
        .find(|b| b.label == "10+ years")
        .unwrap();
    assert_eq!(senior.count, 1);
}

#[tokio::test]
async fn short_query_suggestions_skip_the_store() {
    let f = fixture();
    let store = Arc::new(CountingCatalog::new(f.catalog));
    let service = SuggestionService::new(store.clone(), SearchConfig::default());

    let suggestions = service.suggest("a", 10).await.unwrap();

    assert!(suggestions.courses.is_empty());
    assert!(suggestions.mentors.is_empty());
    assert!(suggestions.tags.is_empty());
    assert_eq!(store.read_count(), 0);
}

#[tokio::test]
async fn suggestions_match_courses_mentors_and_tags() {
    let f = fixture();
    let service = SuggestionService::new(Arc::new(f.catalog), SearchConfig::default());

    let suggestions = service.suggest("py", 10).await.unwrap();

    assert!(suggestions
        .courses
        .iter()
        .any(|c| c.title == "Intro to Python"));
    assert!(suggestions
        .mentors
        .iter()
        .any(|m| m.display_name == "Budi Santoso"));
    assert!(suggestions.tags.iter().any(|t| t == "python"));
}
