// ABOUTME: Workout, scheduling, onboarding and stats route handlers
// ABOUTME: REST endpoints for templates, the calendar, completion and streaks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Workout domain routes
//!
//! Covers workout templates, calendar scheduling, completion toggling,
//! owner-checked deletion, onboarding plan generation and derived stats.

use crate::{
    auth::authenticate_request,
    errors::AppError,
    localtime,
    models::{Exercise, OnboardingAnswers, ScheduleEntry, ScheduleSource, Workout},
    onboarding::OnboardingService,
    resources::ServerResources,
    streaks,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Workout template creation request
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub workout_type: String,
    pub exercises: Vec<Exercise>,
}

/// Manual scheduling request
#[derive(Debug, Deserialize)]
pub struct ScheduleWorkoutRequest {
    pub workout_id: Uuid,
    pub date: NaiveDate,
}

/// Onboarding plan generation request
#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    #[serde(flatten)]
    pub answers: OnboardingAnswers,
    /// Caller's UTC offset in minutes east, for local "today" derivation
    pub utc_offset_minutes: Option<i32>,
}

/// Response for onboarding plan generation
#[derive(Debug, Serialize)]
pub struct GeneratePlanResponse {
    pub message: String,
    pub entry: ScheduleEntry,
}

/// Response for schedule deletion
#[derive(Debug, Serialize)]
pub struct DeleteScheduleResponse {
    pub id: String,
    pub message: String,
}

/// Optional calendar-date filter for schedule reads
#[derive(Debug, Deserialize, Default)]
pub struct ScheduleQuery {
    pub date: Option<NaiveDate>,
}

/// Optional caller offset for stats reads
#[derive(Debug, Deserialize, Default)]
pub struct StatsQuery {
    pub utc_offset_minutes: Option<i32>,
}

/// Workout domain routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout domain routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(Self::handle_create_workout))
            .route("/api/workouts", get(Self::handle_list_workouts))
            .route(
                "/api/workouts/generate-onboarding",
                post(Self::handle_generate_onboarding),
            )
            .route("/api/workouts/schedule", post(Self::handle_schedule_workout))
            .route("/api/workouts/schedule", get(Self::handle_get_schedule))
            .route(
                "/api/workouts/schedule/:id",
                get(Self::handle_get_schedule_entry),
            )
            .route(
                "/api/workouts/schedule/:id",
                put(Self::handle_toggle_completion),
            )
            .route(
                "/api/workouts/schedule/:id",
                delete(Self::handle_delete_schedule),
            )
            .route("/api/workouts/stats", get(Self::handle_get_stats))
            .with_state(resources)
    }

    /// Create a workout template
    async fn handle_create_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<CreateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;

        if request.name.trim().is_empty() {
            return Err(AppError::missing_field("name"));
        }
        if request.exercises.is_empty() {
            return Err(AppError::invalid_input("exercises must not be empty"));
        }

        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            name: request.name,
            workout_type: request.workout_type,
            exercises: request.exercises,
            created_at: Utc::now(),
        };
        resources.database.create_workout(&workout).await?;

        Ok((StatusCode::CREATED, Json(workout)).into_response())
    }

    /// List the caller's workout templates
    async fn handle_list_workouts(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;
        let workouts = resources.database.list_workouts(user_id).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }

    /// Generate the onboarding starter plan
    ///
    /// 201 when a plan was created, 200 when today was already covered.
    async fn handle_generate_onboarding(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<GeneratePlanRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;

        let offset = request
            .utc_offset_minutes
            .unwrap_or(resources.config.app.default_utc_offset_minutes);

        let service = OnboardingService::new(resources.database.clone());
        let outcome = service
            .generate_plan(user_id, &request.answers, offset)
            .await?;

        let status = if outcome.created() {
            StatusCode::CREATED
        } else {
            StatusCode::OK
        };
        let message = if outcome.created() {
            "Plan generated successfully"
        } else {
            "Plan already scheduled for today"
        };

        Ok((
            status,
            Json(GeneratePlanResponse {
                message: message.to_owned(),
                entry: outcome.entry().clone(),
            }),
        )
            .into_response())
    }

    /// Schedule a workout for a specific date
    async fn handle_schedule_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Json(request): Json<ScheduleWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;

        resources
            .database
            .get_workout(request.workout_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout"))?;

        let now = Utc::now();
        let entry = ScheduleEntry {
            id: Uuid::new_v4(),
            user_id,
            workout_id: request.workout_id,
            scheduled_on: request.date,
            is_completed: false,
            source: ScheduleSource::Manual,
            created_at: now,
            updated_at: now,
        };
        resources.database.create_schedule_entry(&entry).await?;

        Ok((StatusCode::CREATED, Json(entry)).into_response())
    }

    /// Read the caller's schedule, optionally filtered to one date
    async fn handle_get_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Query(query): Query<ScheduleQuery>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;
        let schedule = resources
            .database
            .list_schedule(user_id, query.date)
            .await?;
        Ok((StatusCode::OK, Json(schedule)).into_response())
    }

    /// Read a single schedule entry with its workout embedded
    async fn handle_get_schedule_entry(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        authenticate_request(&headers, &resources.auth_manager)?;
        let entry = resources
            .database
            .get_schedule_with_workout(id)
            .await?
            .ok_or_else(|| AppError::not_found("Schedule entry"))?;
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    /// Toggle a schedule entry's completion flag
    async fn handle_toggle_completion(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        authenticate_request(&headers, &resources.auth_manager)?;
        let entry = resources.database.toggle_completion(id).await?;
        Ok((StatusCode::OK, Json(entry)).into_response())
    }

    /// Delete a schedule entry (owner only)
    async fn handle_delete_schedule(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Path(id): Path<Uuid>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;
        let deleted = resources
            .database
            .delete_schedule_entry(id, user_id)
            .await?;

        Ok((
            StatusCode::OK,
            Json(DeleteScheduleResponse {
                id: deleted.to_string(),
                message: "Schedule deleted".to_owned(),
            }),
        )
            .into_response())
    }

    /// Derived streak, totals and badge stats
    async fn handle_get_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: http::HeaderMap,
        Query(query): Query<StatsQuery>,
    ) -> Result<Response, AppError> {
        let user_id = authenticate_request(&headers, &resources.auth_manager)?;

        let offset = query
            .utc_offset_minutes
            .unwrap_or(resources.config.app.default_utc_offset_minutes);
        let today = localtime::local_today(offset);

        let completed_dates = resources.database.completed_dates(user_id).await?;
        let total_completed = resources.database.completed_count(user_id).await?;

        let summary = streaks::summarize(&completed_dates, total_completed, today);
        Ok((StatusCode::OK, Json(summary)).into_response())
    }
}
