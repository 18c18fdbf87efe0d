// ABOUTME: Environment-based server configuration loading and validation
// ABOUTME: Defines ServerConfig and nested config sections sourced from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Environment-based configuration
//!
//! Configuration is environment-only: every setting has a development
//! default and can be overridden through an environment variable. A `.env`
//! file is honored when present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{info, warn};

/// Default HTTP port, matching the original deployment
const DEFAULT_HTTP_PORT: u16 = 5001;

/// Default local hour (0-23) at which daily reminders are sent
const DEFAULT_REMINDER_HOUR: u8 = 9;

/// Read an environment variable with a fallback default
fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Outbound mail relay configuration
    pub mailer: MailerConfig,
    /// Application behavior settings
    pub app: AppBehaviorConfig,
    /// CORS settings
    pub cors: CorsConfig,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT expiry time in hours
    pub jwt_expiry_hours: i64,
}

/// Outbound mail relay settings
///
/// Delivery goes through an HTTP relay service; the server never speaks
/// SMTP itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    /// Whether reminder delivery is enabled
    pub enabled: bool,
    /// Relay endpoint accepting JSON mail submissions
    pub endpoint: String,
    /// Bearer token for the relay
    pub api_token: String,
    /// From address for outbound mail
    pub from_address: String,
    /// Dashboard URL included in reminder messages
    pub dashboard_url: String,
}

/// Application behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppBehaviorConfig {
    /// Fallback UTC offset in minutes east, used when a request does not
    /// carry the caller's offset (also drives the reminder job's clock)
    pub default_utc_offset_minutes: i32,
    /// Local hour (0-23) at which the daily reminder job fires
    pub reminder_hour: u8,
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated allowed origins, or "*" for any
    pub allowed_origins: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but fails to parse, or if
    /// `JWT_SECRET` is unset outside development.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();

        let config = Self {
            http_port: env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", "sqlite:./data/fittrack.db"),
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_var_or("JWT_EXPIRY_HOURS", "720")
                    .parse()
                    .context("Invalid JWT_EXPIRY_HOURS value")?,
            },
            mailer: MailerConfig {
                enabled: env_var_or("MAILER_ENABLED", "false")
                    .parse()
                    .context("Invalid MAILER_ENABLED value")?,
                endpoint: env_var_or("MAILER_ENDPOINT", ""),
                api_token: env_var_or("MAILER_API_TOKEN", ""),
                from_address: env_var_or("MAILER_FROM", "FitTrack Coach <coach@fittrack.local>"),
                dashboard_url: env_var_or("DASHBOARD_URL", "http://localhost:3000"),
            },
            app: AppBehaviorConfig {
                default_utc_offset_minutes: env_var_or("APP_DEFAULT_UTC_OFFSET_MINUTES", "0")
                    .parse()
                    .context("Invalid APP_DEFAULT_UTC_OFFSET_MINUTES value")?,
                reminder_hour: env_var_or("REMINDER_HOUR", &DEFAULT_REMINDER_HOUR.to_string())
                    .parse()
                    .context("Invalid REMINDER_HOUR value")?,
            },
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.app.reminder_hour < 24,
            "REMINDER_HOUR must be in 0..=23, got {}",
            self.app.reminder_hour
        );
        anyhow::ensure!(
            self.app.default_utc_offset_minutes.abs() <= 14 * 60,
            "APP_DEFAULT_UTC_OFFSET_MINUTES out of range: {}",
            self.app.default_utc_offset_minutes
        );
        if self.mailer.enabled {
            anyhow::ensure!(
                !self.mailer.endpoint.is_empty(),
                "MAILER_ENDPOINT must be set when MAILER_ENABLED=true"
            );
        }
        Ok(())
    }

    /// One-line startup summary, safe to log (no secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database={} mailer_enabled={} reminder_hour={:02}:00 utc_offset_min={}",
            self.http_port,
            self.database.url,
            self.mailer.enabled,
            self.app.reminder_hour,
            self.app.default_utc_offset_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reminder_hour_validation() {
        let mut config = ServerConfig {
            http_port: 5001,
            database: DatabaseConfig {
                url: "sqlite::memory:".into(),
            },
            auth: AuthConfig {
                jwt_secret: "s".into(),
                jwt_expiry_hours: 720,
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
        };
        assert!(config.validate().is_ok());

        config.app.reminder_hour = 24;
        assert!(config.validate().is_err());

        config.app.reminder_hour = 9;
        config.mailer.enabled = true;
        assert!(config.validate().is_err());
    }
}
