//! JWT signing and validation configuration

use serde::{Deserialize, Serialize};

/// Configuration for token issuance and validation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric signing key material
    pub secret: String,

    /// Expected token issuer
    pub issuer: String,

    /// Expected token audience
    pub audience: String,

    /// Access token lifetime in hours
    pub expiry_hours: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-secret-change-me"),
            issuer: String::from("storefront"),
            audience: String::from("storefront-api"),
            expiry_hours: 100,
        }
    }
}

impl JwtConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or(defaults.audience),
            expiry_hours: std::env::var("JWT_EXPIRY_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.expiry_hours),
        }
    }
}
