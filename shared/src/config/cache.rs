//! Cache selection configuration
//!
//! The catalog core carries no cache layer of its own; this flag only
//! selects between an in-process and a distributed cache in deployments
//! that add one in front of the API.

use serde::{Deserialize, Serialize};

/// Cache backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Use a distributed (Redis) cache instead of an in-process one
    pub use_distributed: bool,

    /// Redis connection URL, consulted only when `use_distributed` is set
    pub redis_url: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            use_distributed: false,
            redis_url: String::from("redis://127.0.0.1:6379"),
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            use_distributed: std::env::var("USE_DISTRIBUTED_CACHE")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.use_distributed),
            redis_url: std::env::var("REDIS_URL").unwrap_or(defaults.redis_url),
        }
    }
}
