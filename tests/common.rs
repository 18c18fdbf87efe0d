// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, auth, resource and mailer helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

//! Shared test utilities for `fittrack_server`
//!
//! Common setup functions to reduce duplication across integration tests.

use async_trait::async_trait;
use fittrack_server::{
    auth::{generate_jwt_secret, hash_password, AuthManager},
    config::{
        AppBehaviorConfig, AuthConfig, CorsConfig, DatabaseConfig, MailerConfig, ServerConfig,
    },
    database::Database,
    errors::{AppError, AppResult},
    models::User,
    notifications::{EmailMessage, Mailer},
    resources::ServerResources,
};
use std::sync::{Arc, Mutex, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Arc<Database> {
    init_test_logging();
    Arc::new(Database::new("sqlite::memory:").await.unwrap())
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(&generate_jwt_secret(), 24)
}

/// Server configuration suitable for tests (mailer disabled, UTC)
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_expiry_hours: 24,
        },
        mailer: MailerConfig {
            enabled: false,
            endpoint: String::new(),
            api_token: String::new(),
            from_address: "coach@fittrack.local".into(),
            dashboard_url: "http://localhost:3000".into(),
        },
        app: AppBehaviorConfig {
            default_utc_offset_minutes: 0,
            reminder_hour: 9,
        },
        cors: CorsConfig {
            allowed_origins: "*".into(),
        },
    }
}

/// A mailer that records every message and can simulate failures for
/// specific recipient addresses
#[derive(Default)]
pub struct RecordingMailer {
    /// Messages accepted so far
    pub sent: Mutex<Vec<EmailMessage>>,
    /// Addresses whose deliveries fail
    pub failing_addresses: Vec<String>,
}

impl RecordingMailer {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_addresses: addresses.iter().map(|&a| a.to_owned()).collect(),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        if self.failing_addresses.contains(&message.to) {
            return Err(AppError::external_service("mail relay", "simulated failure"));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Full resource bundle over an in-memory database and recording mailer
pub async fn create_test_resources() -> (Arc<ServerResources>, Arc<RecordingMailer>) {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await.unwrap();
    let mailer = Arc::new(RecordingMailer::default());
    let resources = Arc::new(ServerResources::new(
        database,
        create_test_auth_manager(),
        Arc::new(test_config()),
        mailer.clone(),
    ));
    (resources, mailer)
}

/// Create and persist a user with a hashed password
pub async fn create_test_user(database: &Database, email: &str, name: &str) -> User {
    let user = User::new(
        email.to_owned(),
        hash_password("correct horse battery staple").unwrap(),
        name.to_owned(),
    );
    database.create_user(&user).await.unwrap();
    user
}
