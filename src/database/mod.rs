// ABOUTME: Database management and schema migration orchestration
// ABOUTME: Owns the SQLite pool and fans out to per-domain repository files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Database Management
//!
//! SQLite-backed persistence for users, workout templates and schedule
//! entries. Repository methods live in per-domain files; this module owns
//! the pool and runs migrations.
//!
//! Calendar dates are stored as `YYYY-MM-DD` TEXT values, never instants,
//! so a schedule entry can never drift across a day boundary after the
//! fact.

mod schedules;
mod users;
mod workouts;

pub use schedules::PendingReminder;
pub use users::ProfileUpdate;

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

/// Database manager for user, workout and schedule storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails.
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let in_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") && !in_memory {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        // An in-memory database exists per connection; the pool must hold
        // exactly one or later checkouts see a fresh empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(&connection_options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_workouts().await?;
        self.migrate_schedules().await?;
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp column
pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::storage(format!("Malformed timestamp {value:?}: {e}")))
}

/// Parse a `YYYY-MM-DD` calendar-date column
pub(crate) fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| AppError::storage(format!("Malformed date {value:?}: {e}")))
}
