use std::env;

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Upper bound on a caller-supplied page size.
    pub max_limit: usize,
    /// Cap on the unpaginated universe scanned for facet counts.
    pub facet_scan_limit: usize,
    /// Upper bound on suggestion entries per group.
    pub max_suggestions: usize,
}

impl SearchConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        SearchConfig {
            max_limit: env::var("SEARCH_MAX_LIMIT")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("SEARCH_MAX_LIMIT must be a valid usize"),
            facet_scan_limit: env::var("FACET_SCAN_LIMIT")
                .unwrap_or_else(|_| "1000".to_string())
                .parse()
                .expect("FACET_SCAN_LIMIT must be a valid usize"),
            max_suggestions: env::var("MAX_SUGGESTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .expect("MAX_SUGGESTIONS must be a valid usize"),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_limit: 100,
            facet_scan_limit: 1000,
            max_suggestions: 10,
        }
    }
}
