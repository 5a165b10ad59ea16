//! JWT token service

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sf_shared::JwtConfig;

use crate::domain::entities::User;
use crate::errors::{DomainResult, TokenError};

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub email: String,
    pub permissions: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    /// Unique token id
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> DomainResult<i64> {
        self.sub
            .parse()
            .map_err(|_| TokenError::InvalidToken.into())
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// Issues and verifies HS256-signed access tokens.
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a token for a verified user with their effective permissions.
    pub fn generate(&self, user: &User, permissions: Vec<String>) -> DomainResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.expiry_hours as i64);

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            permissions,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed.into())
    }

    /// Verify a token's signature, expiry, issuer, and audience.
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    TokenError::TokenExpired.into()
                }
                _ => TokenError::InvalidToken.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{UserStatus, SYSTEM_ACTOR};

    fn test_user() -> User {
        let mut user = User::new(
            "alice",
            "alice@example.com",
            "hash",
            "Alice",
            "A",
            SYSTEM_ACTOR,
        );
        user.id = 7;
        user.business_status = UserStatus::Active;
        user
    }

    fn service() -> TokenService {
        TokenService::new(JwtConfig {
            secret: "test-secret".into(),
            issuer: "storefront".into(),
            audience: "storefront-api".into(),
            expiry_hours: 100,
        })
    }

    #[test]
    fn issued_tokens_verify_and_carry_claims() {
        let svc = service();
        let token = svc
            .generate(&test_user(), vec!["category_view".into()])
            .unwrap();

        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.username, "alice");
        assert!(claims.has_permission("category_view"));
        assert!(!claims.has_permission("category_manage"));
    }

    #[test]
    fn wrong_secret_fails_verification() {
        let token = service()
            .generate(&test_user(), vec![])
            .unwrap();

        let other = TokenService::new(JwtConfig {
            secret: "different-secret".into(),
            ..JwtConfig::default()
        });
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn wrong_audience_fails_verification() {
        let token = service().generate(&test_user(), vec![]).unwrap();

        let other = TokenService::new(JwtConfig {
            secret: "test-secret".into(),
            issuer: "storefront".into(),
            audience: "another-api".into(),
            expiry_hours: 100,
        });
        assert!(other.verify(&token).is_err());
    }
}
