// ABOUTME: Schedule entry database operations and onboarding idempotency guarantee
// ABOUTME: Handles calendar reads, completion toggling, owner-checked deletion and reminder queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use super::{parse_date, parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{ScheduleEntry, ScheduleSource, ScheduleWithWorkout, Workout};
use chrono::{NaiveDate, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// A pending reminder: an incomplete entry for a given day joined to its
/// owner's contact details
#[derive(Debug, Clone)]
pub struct PendingReminder {
    /// The schedule entry awaiting completion
    pub schedule_id: Uuid,
    /// Name of the scheduled workout
    pub workout_name: String,
    /// Owner's email address (may be blank if the record is damaged)
    pub email: String,
    /// Owner's display name
    pub display_name: String,
}

impl Database {
    /// Create schedules table
    ///
    /// The partial unique index is what makes onboarding plan generation
    /// idempotent per (user, calendar date) under concurrency: duplicate
    /// inserts are refused by the storage layer, not by a check-then-create
    /// sequence.
    pub(super) async fn migrate_schedules(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS schedules (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                workout_id TEXT NOT NULL REFERENCES workouts(id),
                scheduled_on TEXT NOT NULL,
                is_completed BOOLEAN NOT NULL DEFAULT 0,
                source TEXT NOT NULL DEFAULT 'manual' CHECK (source IN ('onboarding', 'manual')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_schedules_user_date ON schedules(user_id, scheduled_on)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_schedules_onboarding_daily
            ON schedules(user_id, scheduled_on)
            WHERE source = 'onboarding'
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Create a manually scheduled entry
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn create_schedule_entry(&self, entry: &ScheduleEntry) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO schedules (
                id, user_id, workout_id, scheduled_on, is_completed, source,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.workout_id.to_string())
        .bind(entry.scheduled_on.format("%Y-%m-%d").to_string())
        .bind(entry.is_completed)
        .bind(entry.source.as_str())
        .bind(entry.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create schedule entry: {e}")))?;

        Ok(())
    }

    /// Atomically create an onboarding workout and its schedule entry for a
    /// calendar date, unless one already exists for that (user, date)
    ///
    /// Both inserts run in one transaction; when the partial unique index
    /// refuses the schedule insert the workout is rolled back and `None`
    /// is returned, leaving no orphan template behind.
    ///
    /// # Errors
    ///
    /// Returns a database error if the transaction fails for any reason
    /// other than the idempotency conflict.
    pub async fn create_onboarding_plan(
        &self,
        workout: &Workout,
        scheduled_on: NaiveDate,
    ) -> AppResult<Option<ScheduleEntry>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        let exercises_json = serde_json::to_string(&workout.exercises)?;
        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, name, workout_type, exercises, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(workout.id.to_string())
        .bind(workout.user_id.to_string())
        .bind(&workout.name)
        .bind(&workout.workout_type)
        .bind(&exercises_json)
        .bind(workout.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create onboarding workout: {e}")))?;

        let now = Utc::now();
        let entry = ScheduleEntry {
            id: Uuid::new_v4(),
            user_id: workout.user_id,
            workout_id: workout.id,
            scheduled_on,
            is_completed: false,
            source: ScheduleSource::Onboarding,
            created_at: now,
            updated_at: now,
        };

        let inserted = sqlx::query(
            r"
            INSERT INTO schedules (
                id, user_id, workout_id, scheduled_on, is_completed, source,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, 0, 'onboarding', $5, $5)
            ON CONFLICT DO NOTHING
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.workout_id.to_string())
        .bind(scheduled_on.format("%Y-%m-%d").to_string())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to create onboarding entry: {e}")))?;

        if inserted.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| AppError::database(format!("Failed to roll back: {e}")))?;
            return Ok(None);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit onboarding plan: {e}")))?;

        Ok(Some(entry))
    }

    /// Get the onboarding-sourced entry for a (user, date), if any
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_onboarding_entry(
        &self,
        user_id: Uuid,
        scheduled_on: NaiveDate,
    ) -> AppResult<Option<ScheduleEntry>> {
        let row = sqlx::query(
            r"
            SELECT * FROM schedules
            WHERE user_id = $1 AND scheduled_on = $2 AND source = 'onboarding'
            ",
        )
        .bind(user_id.to_string())
        .bind(scheduled_on.format("%Y-%m-%d").to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get onboarding entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    /// Get a schedule entry by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_schedule_entry(&self, schedule_id: Uuid) -> AppResult<Option<ScheduleEntry>> {
        let row = sqlx::query("SELECT * FROM schedules WHERE id = $1")
            .bind(schedule_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get schedule entry: {e}")))?;

        row.map(|r| row_to_entry(&r)).transpose()
    }

    /// Get a schedule entry with its workout embedded
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_schedule_with_workout(
        &self,
        schedule_id: Uuid,
    ) -> AppResult<Option<ScheduleWithWorkout>> {
        let row = sqlx::query(&joined_select("WHERE s.id = $1"))
            .bind(schedule_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get schedule entry: {e}")))?;

        row.map(|r| row_to_entry_with_workout(&r)).transpose()
    }

    /// List a user's schedule entries with workouts embedded, optionally
    /// restricted to a single calendar date, ordered by date ascending
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_schedule(
        &self,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> AppResult<Vec<ScheduleWithWorkout>> {
        let rows = if let Some(date) = date {
            sqlx::query(&joined_select(
                "WHERE s.user_id = $1 AND s.scheduled_on = $2 ORDER BY s.scheduled_on",
            ))
            .bind(user_id.to_string())
            .bind(date.format("%Y-%m-%d").to_string())
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(&joined_select("WHERE s.user_id = $1 ORDER BY s.scheduled_on"))
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await
        }
        .map_err(|e| AppError::database(format!("Failed to list schedule: {e}")))?;

        rows.iter().map(row_to_entry_with_workout).collect()
    }

    /// Distinct calendar dates on which the user completed a workout
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn completed_dates(&self, user_id: Uuid) -> AppResult<Vec<NaiveDate>> {
        let rows = sqlx::query(
            r"
            SELECT DISTINCT scheduled_on FROM schedules
            WHERE user_id = $1 AND is_completed = 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list completed dates: {e}")))?;

        rows.iter()
            .map(|row| {
                let date: String = row.try_get("scheduled_on")?;
                parse_date(&date)
            })
            .collect()
    }

    /// Count of completed entries for a user
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn completed_count(&self, user_id: Uuid) -> AppResult<u32> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM schedules WHERE user_id = $1 AND is_completed = 1",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to count completions: {e}")))?;

        let total: i64 = row.try_get("total")?;
        Ok(u32::try_from(total).unwrap_or(0))
    }

    /// Flip a schedule entry's completion flag
    ///
    /// This is deliberately a toggle (two calls restore the original
    /// value); callers wanting idempotent "mark complete" semantics go
    /// through this single method, so a future change is local.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the entry does not exist.
    pub async fn toggle_completion(&self, schedule_id: Uuid) -> AppResult<ScheduleEntry> {
        let result = sqlx::query(
            r"
            UPDATE schedules
            SET is_completed = NOT is_completed, updated_at = $1
            WHERE id = $2
            ",
        )
        .bind(Utc::now().to_rfc3339())
        .bind(schedule_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to toggle completion: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Schedule entry"));
        }

        self.get_schedule_entry(schedule_id)
            .await?
            .ok_or_else(|| AppError::storage("Schedule entry vanished during toggle"))
    }

    /// Delete a schedule entry after verifying ownership
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the entry does not exist,
    /// `PermissionDenied` if `requesting_user` does not own it, and
    /// `StorageError` if the delete does not confirm removal.
    pub async fn delete_schedule_entry(
        &self,
        schedule_id: Uuid,
        requesting_user: Uuid,
    ) -> AppResult<Uuid> {
        let entry = self
            .get_schedule_entry(schedule_id)
            .await?
            .ok_or_else(|| AppError::not_found("Schedule entry"))?;

        if entry.user_id != requesting_user {
            return Err(AppError::permission_denied(
                "Not authorized to delete this schedule entry",
            ));
        }

        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(schedule_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete schedule entry: {e}")))?;

        if result.rows_affected() != 1 {
            return Err(AppError::storage("Delete did not confirm removal"));
        }

        Ok(schedule_id)
    }

    /// All incomplete entries for a calendar date, joined to their owners'
    /// contact details, for the reminder job
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn pending_reminders(&self, date: NaiveDate) -> AppResult<Vec<PendingReminder>> {
        let rows = sqlx::query(
            r"
            SELECT s.id AS schedule_id, w.name AS workout_name,
                   u.email AS email, u.display_name AS display_name
            FROM schedules s
            JOIN workouts w ON w.id = s.workout_id
            JOIN users u ON u.id = s.user_id
            WHERE s.scheduled_on = $1 AND s.is_completed = 0
            ",
        )
        .bind(date.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to query pending reminders: {e}")))?;

        rows.iter()
            .map(|row| {
                let schedule_id: String = row.try_get("schedule_id")?;
                Ok(PendingReminder {
                    schedule_id: Uuid::parse_str(&schedule_id).map_err(|e| {
                        AppError::storage(format!("Malformed schedule id {schedule_id:?}: {e}"))
                    })?,
                    workout_name: row.try_get("workout_name")?,
                    email: row.try_get("email")?,
                    display_name: row.try_get("display_name")?,
                })
            })
            .collect()
    }
}

/// Joined schedule+workout select with aliased workout columns
fn joined_select(suffix: &str) -> String {
    format!(
        r"
        SELECT s.id, s.user_id, s.workout_id, s.scheduled_on, s.is_completed,
               s.source, s.created_at, s.updated_at,
               w.id AS w_id, w.user_id AS w_user_id, w.name AS w_name,
               w.workout_type AS w_workout_type, w.exercises AS w_exercises,
               w.created_at AS w_created_at
        FROM schedules s
        JOIN workouts w ON w.id = s.workout_id
        {suffix}
        "
    )
}

fn row_to_entry(row: &SqliteRow) -> AppResult<ScheduleEntry> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let workout_id: String = row.try_get("workout_id")?;
    let scheduled_on: String = row.try_get("scheduled_on")?;
    let source: String = row.try_get("source")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(ScheduleEntry {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::storage(format!("Malformed schedule id {id:?}: {e}")))?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::storage(format!("Malformed user id {user_id:?}: {e}")))?,
        workout_id: Uuid::parse_str(&workout_id)
            .map_err(|e| AppError::storage(format!("Malformed workout id {workout_id:?}: {e}")))?,
        scheduled_on: parse_date(&scheduled_on)?,
        is_completed: row.try_get("is_completed")?,
        source: ScheduleSource::parse_or_default(&source),
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}

fn row_to_entry_with_workout(row: &SqliteRow) -> AppResult<ScheduleWithWorkout> {
    let entry = row_to_entry(row)?;

    let w_id: String = row.try_get("w_id")?;
    let w_user_id: String = row.try_get("w_user_id")?;
    let w_exercises: String = row.try_get("w_exercises")?;
    let w_created_at: String = row.try_get("w_created_at")?;

    let workout = Workout {
        id: Uuid::parse_str(&w_id)
            .map_err(|e| AppError::storage(format!("Malformed workout id {w_id:?}: {e}")))?,
        user_id: Uuid::parse_str(&w_user_id)
            .map_err(|e| AppError::storage(format!("Malformed user id {w_user_id:?}: {e}")))?,
        name: row.try_get("w_name")?,
        workout_type: row.try_get("w_workout_type")?,
        exercises: serde_json::from_str(&w_exercises)?,
        created_at: parse_timestamp(&w_created_at)?,
    };

    Ok(ScheduleWithWorkout { entry, workout })
}
