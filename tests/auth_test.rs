// ABOUTME: Integration tests for registration, login and token validation
// ABOUTME: Validates the auth service round trip and its failure modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fittrack_server::{
    errors::ErrorCode,
    routes::auth::{AuthService, LoginRequest, RegisterRequest},
};
use uuid::Uuid;

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        name: "Jane Doe".into(),
        email: email.into(),
        password: "correct horse battery staple".into(),
    }
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let (resources, _mailer) = common::create_test_resources().await;
    let service = AuthService::new(resources.clone());

    let registered = service
        .register(register_request("jane@example.com"))
        .await
        .unwrap();
    assert!(!registered.token.is_empty());
    assert!(!registered.user.is_onboarded);

    let logged_in = service
        .login(LoginRequest {
            email: "jane@example.com".into(),
            password: "correct horse battery staple".into(),
        })
        .await
        .unwrap();
    assert_eq!(logged_in.user.email, "jane@example.com");
    assert_eq!(logged_in.user.display_name, "Jane Doe");

    // The issued token validates and names the same user
    let user_id = resources
        .auth_manager
        .user_id_from_token(&logged_in.token)
        .unwrap();
    assert_eq!(user_id, Uuid::parse_str(&logged_in.user.user_id).unwrap());
}

#[tokio::test]
async fn test_register_rejects_blank_fields() {
    let (resources, _mailer) = common::create_test_resources().await;
    let service = AuthService::new(resources);

    let mut request = register_request("jane@example.com");
    request.name = "  ".into();
    let err = service.register(request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let mut request = register_request("jane@example.com");
    request.password = String::new();
    let err = service.register(request).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (resources, _mailer) = common::create_test_resources().await;
    let service = AuthService::new(resources);

    service
        .register(register_request("jane@example.com"))
        .await
        .unwrap();
    let err = service
        .register(register_request("jane@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (resources, _mailer) = common::create_test_resources().await;
    let service = AuthService::new(resources);

    service
        .register(register_request("jane@example.com"))
        .await
        .unwrap();

    // Wrong password and unknown email are indistinguishable
    let err = service
        .login(LoginRequest {
            email: "jane@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);

    let err = service
        .login(LoginRequest {
            email: "nobody@example.com".into(),
            password: "correct horse battery staple".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthInvalid);
}
