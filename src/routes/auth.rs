// ABOUTME: User authentication route handlers for registration, login and profiles
// ABOUTME: Provides REST endpoints for account management with JWT issuance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Authentication routes for user management
//!
//! Handlers are thin wrappers delegating to [`AuthService`]; tokens are
//! issued here and validated per request elsewhere; no server-side
//! session state exists.

use crate::{
    auth::{self, authenticate_request},
    database::ProfileUpdate,
    errors::{AppError, AppResult},
    models::User,
    resources::ServerResources,
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile update request
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub password: Option<String>,
}

/// User payload returned by auth endpoints
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub avatar_url: String,
    pub is_onboarded: bool,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            is_onboarded: user.is_onboarded,
        }
    }
}

/// Login/registration response with token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: UserInfo,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` on blank fields,
    /// `ResourceAlreadyExists` on a duplicate email.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AuthResponse> {
        info!("user registration attempt for email: {}", request.email);

        for (field, value) in [
            ("name", &request.name),
            ("email", &request.email),
            ("password", &request.password),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::missing_field(field));
            }
        }
        if !request.email.contains('@') {
            return Err(AppError::invalid_input("Invalid email address"));
        }

        let password_hash = auth::hash_password(&request.password)?;
        let user = User::new(request.email, password_hash, request.name);
        self.resources.database.create_user(&user).await?;

        let token = self.resources.auth_manager.generate_token(&user)?;
        Ok(AuthResponse {
            token,
            user: UserInfo::from(&user),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` on unknown email or wrong password; the two
    /// cases are indistinguishable to the caller.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        let user = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::auth_invalid("Invalid credentials"))?;

        if !auth::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::auth_invalid("Invalid credentials"));
        }

        let token = self.resources.auth_manager.generate_token(&user)?;
        Ok(AuthResponse {
            token,
            user: UserInfo::from(&user),
        })
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users", post(Self::handle_register))
            .route("/api/users/login", post(Self::handle_login))
            .route("/api/users/profile", get(Self::handle_get_profile))
            .route("/api/users/profile", put(Self::handle_update_profile))
            .with_state(resources)
    }

    /// Handle user registration
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).register(request).await?;
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle user login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(request): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let response = AuthService::new(resources).login(request).await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle profile read, refreshing the caller's token
    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;
        let user = resources
            .database
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        let token = resources.auth_manager.generate_token(&user)?;
        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                token,
                user: UserInfo::from(&user),
            }),
        )
            .into_response())
    }

    /// Handle profile update
    async fn handle_update_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<UpdateProfileRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;

        let password_hash = request
            .password
            .as_deref()
            .map(auth::hash_password)
            .transpose()?;

        let user = resources
            .database
            .update_profile(
                user_id,
                ProfileUpdate {
                    display_name: request.name,
                    avatar_url: request.avatar_url,
                    password_hash,
                },
            )
            .await?;

        let token = resources.auth_manager.generate_token(&user)?;
        Ok((
            StatusCode::OK,
            Json(AuthResponse {
                token,
                user: UserInfo::from(&user),
            }),
        )
            .into_response())
    }
}
