// ABOUTME: User management database operations
// ABOUTME: Handles user registration, lookup, profile updates and onboarding answers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use super::{parse_timestamp, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessGoal, FitnessLevel, OnboardingAnswers, User};
use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row};
use uuid::Uuid;

/// Profile fields a user may change after registration
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    /// New display name, if changing
    pub display_name: Option<String>,
    /// New avatar URL, if changing
    pub avatar_url: Option<String>,
    /// New password hash, if changing
    pub password_hash: Option<String>,
}

impl Database {
    /// Create users table
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                avatar_url TEXT NOT NULL,
                age INTEGER,
                weight_kg REAL,
                goal TEXT,
                fitness_level TEXT,
                equipment TEXT NOT NULL DEFAULT '[]',
                is_onboarded BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create a new user
    ///
    /// # Errors
    ///
    /// Returns `ResourceAlreadyExists` if the email is already registered,
    /// or a database error if the insert fails.
    pub async fn create_user(&self, user: &User) -> AppResult<Uuid> {
        if self.get_user_by_email(&user.email).await?.is_some() {
            return Err(AppError::already_exists("Email already in use"));
        }

        let equipment_json = serde_json::to_string(&user.equipment)?;
        sqlx::query(
            r"
            INSERT INTO users (
                id, email, display_name, password_hash, avatar_url,
                age, weight_kg, goal, fitness_level, equipment,
                is_onboarded, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.email)
        .bind(&user.display_name)
        .bind(&user.password_hash)
        .bind(&user.avatar_url)
        .bind(user.age.map(i64::from))
        .bind(user.weight_kg)
        .bind(user.goal.map(FitnessGoal::as_str))
        .bind(user.fitness_level.map(FitnessLevel::as_str))
        .bind(&equipment_json)
        .bind(user.is_onboarded)
        .bind(user.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        Ok(user.id)
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails.
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Update mutable profile fields, returning the fresh record
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist.
    pub async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> AppResult<User> {
        let user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User"))?;

        sqlx::query(
            r"
            UPDATE users
            SET display_name = $1, avatar_url = $2, password_hash = $3, updated_at = $4
            WHERE id = $5
            ",
        )
        .bind(update.display_name.as_deref().unwrap_or(&user.display_name))
        .bind(update.avatar_url.as_deref().unwrap_or(&user.avatar_url))
        .bind(update.password_hash.as_deref().unwrap_or(&user.password_hash))
        .bind(Utc::now().to_rfc3339())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;

        self.get_user(user_id)
            .await?
            .ok_or_else(|| AppError::storage("User vanished during profile update"))
    }

    /// Persist onboarding answers onto the user record and mark onboarding
    /// complete
    ///
    /// Idempotent: re-running overwrites the stored answers.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user does not exist.
    pub async fn save_onboarding_answers(
        &self,
        user_id: Uuid,
        answers: &OnboardingAnswers,
    ) -> AppResult<()> {
        let goal = answers
            .goal
            .as_deref()
            .map(FitnessGoal::parse_or_default)
            .unwrap_or_default();
        let level = answers
            .fitness_level
            .as_deref()
            .map(FitnessLevel::parse_or_default)
            .unwrap_or_default();
        let equipment_json = serde_json::to_string(&answers.equipment)?;

        let result = sqlx::query(
            r"
            UPDATE users
            SET age = $1, weight_kg = $2, goal = $3, fitness_level = $4,
                equipment = $5, is_onboarded = 1, updated_at = $6
            WHERE id = $7
            ",
        )
        .bind(answers.age.map(i64::from))
        .bind(answers.weight)
        .bind(goal.as_str())
        .bind(level.as_str())
        .bind(&equipment_json)
        .bind(Utc::now().to_rfc3339())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save onboarding answers: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User"));
        }
        Ok(())
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.try_get("id")?;
    let equipment_json: String = row.try_get("equipment")?;
    let goal: Option<String> = row.try_get("goal")?;
    let fitness_level: Option<String> = row.try_get("fitness_level")?;
    let age: Option<i64> = row.try_get("age")?;
    let created_at: String = row.try_get("created_at")?;
    let updated_at: String = row.try_get("updated_at")?;

    Ok(User {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::storage(format!("Malformed user id {id:?}: {e}")))?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        password_hash: row.try_get("password_hash")?,
        avatar_url: row.try_get("avatar_url")?,
        age: age.and_then(|a| u16::try_from(a).ok()),
        weight_kg: row.try_get("weight_kg")?,
        goal: goal.as_deref().map(FitnessGoal::parse_or_default),
        fitness_level: fitness_level.as_deref().map(FitnessLevel::parse_or_default),
        equipment: serde_json::from_str(&equipment_json)?,
        is_onboarded: row.try_get("is_onboarded")?,
        created_at: parse_timestamp(&created_at)?,
        updated_at: parse_timestamp(&updated_at)?,
    })
}
