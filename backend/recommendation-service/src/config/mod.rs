use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub redis: RedisConfig,
    pub cache: CacheConfig,
    pub recommend: RecommendConfig,
}

#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached personalized recommendation lists.
    pub ttl_secs: u64,
}

#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Cap on candidates fed into a scoring pass.
    pub candidate_limit: usize,
    /// How many course-view events feed the affinity profile.
    pub view_history_limit: usize,
    /// How many recently viewed courses seed the because-you-viewed variant.
    pub viewed_basis_limit: usize,
    /// Deadline for a personalized computation before falling back.
    pub deadline_ms: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Config {
            redis: RedisConfig {
                url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            },
            cache: CacheConfig {
                ttl_secs: env::var("RECOMMENDATION_CACHE_TTL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .expect("RECOMMENDATION_CACHE_TTL_SECS must be a valid u64"),
            },
            recommend: RecommendConfig {
                candidate_limit: env::var("RECOMMENDATION_CANDIDATE_LIMIT")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .expect("RECOMMENDATION_CANDIDATE_LIMIT must be a valid usize"),
                view_history_limit: env::var("VIEW_HISTORY_LIMIT")
                    .unwrap_or_else(|_| "50".to_string())
                    .parse()
                    .expect("VIEW_HISTORY_LIMIT must be a valid usize"),
                viewed_basis_limit: env::var("VIEWED_BASIS_LIMIT")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("VIEWED_BASIS_LIMIT must be a valid usize"),
                deadline_ms: env::var("RECOMMENDATION_DEADLINE_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .expect("RECOMMENDATION_DEADLINE_MS must be a valid u64"),
            },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
            },
            cache: CacheConfig { ttl_secs: 3600 },
            recommend: RecommendConfig {
                candidate_limit: 100,
                view_history_limit: 50,
                viewed_basis_limit: 5,
                deadline_ms: 2000,
            },
        }
    }
}
