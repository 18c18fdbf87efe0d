// ABOUTME: Workout template database operations
// ABOUTME: Handles creation and retrieval of user-owned exercise templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use super::{parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::Workout;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

impl Database {
    /// Create workouts table
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                workout_type TEXT NOT NULL,
                exercises TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_workouts_user ON workouts(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a new workout template
    ///
    /// # Errors
    ///
    /// Returns a database error if the insert fails.
    pub async fn create_workout(&self, workout: &Workout) -> AppResult<()> {
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
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Ok(())
    }

    /// Get a workout by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_workout(&self, workout_id: Uuid) -> AppResult<Option<Workout>> {
        let row = sqlx::query(
            "SELECT id, user_id, name, workout_type, exercises, created_at FROM workouts WHERE id = $1",
        )
        .bind(workout_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get workout: {e}")))?;

        row.map(|r| row_to_workout(&r)).transpose()
    }

    /// List all workout templates owned by a user, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, name, workout_type, exercises, created_at
            FROM workouts
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_workout).collect()
    }
}

fn row_to_workout(row: &SqliteRow) -> AppResult<Workout> {
    let id: String = row.try_get("id")?;
    let user_id: String = row.try_get("user_id")?;
    let exercises_json: String = row.try_get("exercises")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(Workout {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::storage(format!("Malformed workout id {id:?}: {e}")))?,
        user_id: Uuid::parse_str(&user_id)
            .map_err(|e| AppError::storage(format!("Malformed user id {user_id:?}: {e}")))?,
        name: row.try_get("name")?,
        workout_type: row.try_get("workout_type")?,
        exercises: serde_json::from_str(&exercises_json)?,
        created_at: parse_timestamp(&created_at)?,
    })
}
