// ABOUTME: JWT-based user authentication and password hashing
// ABOUTME: Handles token generation, validation and per-request bearer auth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Authentication
//!
//! JWT-based authentication for the FitTrack server. Sessions are stateless:
//! every request carries a bearer token which is validated against the
//! configured signing secret; no session state lives in the process.

use crate::errors::{AppError, AppResult};
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims carried by every issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user id
    pub sub: String,
    /// User email, for log correlation
    pub email: String,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiry timestamp (seconds since epoch)
    pub exp: i64,
}

/// Generate a random 64-byte JWT signing secret
///
/// Used by development and test setups when no `JWT_SECRET` is configured.
#[must_use]
pub fn generate_jwt_secret() -> [u8; 64] {
    let mut secret = [0u8; 64];
    rand::thread_rng().fill(&mut secret[..]);
    secret
}

/// Hash a password for storage
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str) -> AppResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a stored hash
///
/// # Errors
///
/// Returns an error if the hash is malformed.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
}

/// Token issuance and validation
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_hours: i64,
}

impl AuthManager {
    /// Create a new auth manager from a signing secret
    #[must_use]
    pub fn new(jwt_secret: &[u8], expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            expiry_hours,
        }
    }

    /// Generate a token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails.
    pub fn generate_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))
    }

    /// Validate a token and return its claims
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if the token is expired, malformed or carries a
    /// bad signature.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::auth_invalid(format!("Invalid token: {e}")))
    }

    /// Validate a token and return the authenticated user id
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` if validation fails or the subject is not a
    /// valid user id.
    pub fn user_id_from_token(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.validate_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid token subject: {e}")))
    }
}

/// Extract and validate the bearer token from request headers
///
/// # Errors
///
/// Returns `AuthRequired` if the authorization header is missing and
/// `AuthInvalid` if it is not a valid bearer token.
pub fn authenticate_request(
    headers: &http::HeaderMap,
    auth_manager: &AuthManager,
) -> AppResult<Uuid> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::auth_invalid("Authorization header must be a bearer token"))?;

    auth_manager.user_id_from_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user() -> User {
        User::new(
            "test@example.com".into(),
            "hashed_password_123".into(),
            "Test User".into(),
        )
    }

    #[test]
    fn test_generate_and_validate_token() {
        let secret = generate_jwt_secret();
        let auth_manager = AuthManager::new(&secret, 24);
        let user = test_user();

        let token = auth_manager.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = auth_manager.validate_token(&token).unwrap();
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.sub, user.id.to_string());
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_token_rejected_by_other_secret() {
        let user = test_user();
        let token = AuthManager::new(&generate_jwt_secret(), 24)
            .generate_token(&user)
            .unwrap();

        let other = AuthManager::new(&generate_jwt_secret(), 24);
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_bearer_extraction() {
        let secret = generate_jwt_secret();
        let auth_manager = AuthManager::new(&secret, 24);
        let user = test_user();
        let token = auth_manager.generate_token(&user).unwrap();

        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        let user_id = authenticate_request(&headers, &auth_manager).unwrap();
        assert_eq!(user_id, user.id);

        let empty = http::HeaderMap::new();
        assert!(authenticate_request(&empty, &auth_manager).is_err());
    }

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert!(verify_password("hunter2", &hash).unwrap());
        assert!(!verify_password("hunter3", &hash).unwrap());
    }
}
