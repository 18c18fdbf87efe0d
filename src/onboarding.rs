// ABOUTME: Onboarding orchestrator generating a starter plan for new users
// ABOUTME: Validates answers, persists them and creates today's workout idempotently
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Onboarding Orchestration
//!
//! Turns onboarding answers into a starter plan: the answers land on the
//! user record, the goal picks a template via [`crate::plan::select_plan`],
//! and a workout plus a schedule entry for the caller's local "today" are
//! created at most once per (user, calendar date), enforced by the
//! storage layer rather than a check-then-create sequence.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::localtime::local_today;
use crate::models::{FitnessGoal, OnboardingAnswers, ScheduleEntry, Workout};
use crate::plan::select_plan;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Result of a plan generation request
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    /// A new workout and schedule entry were created
    Created(ScheduleEntry),
    /// An onboarding entry already existed for today; nothing was written
    AlreadyScheduled(ScheduleEntry),
}

impl PlanOutcome {
    /// The schedule entry for today, whether fresh or pre-existing
    #[must_use]
    pub const fn entry(&self) -> &ScheduleEntry {
        match self {
            Self::Created(entry) | Self::AlreadyScheduled(entry) => entry,
        }
    }

    /// Whether this call created the entry
    #[must_use]
    pub const fn created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Onboarding plan generation service
#[derive(Clone)]
pub struct OnboardingService {
    database: Arc<Database>,
}

impl OnboardingService {
    /// Create the service
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// Generate a starter plan from onboarding answers
    ///
    /// Re-running on the same local calendar day is a no-op for the
    /// schedule (the answers are still overwritten, so corrections stick).
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when a required answer is absent,
    /// `ResourceNotFound` if the user does not exist, and a database error
    /// if persistence fails.
    pub async fn generate_plan(
        &self,
        user_id: Uuid,
        answers: &OnboardingAnswers,
        utc_offset_minutes: i32,
    ) -> AppResult<PlanOutcome> {
        validate_answers(answers)?;

        self.database
            .save_onboarding_answers(user_id, answers)
            .await?;

        let goal = answers
            .goal
            .as_deref()
            .map(FitnessGoal::parse_or_default)
            .unwrap_or_default();
        let today = local_today(utc_offset_minutes);

        // Fast path: skip template creation when today is already covered.
        // The unique index still guards the slow path against races.
        if let Some(existing) = self.database.get_onboarding_entry(user_id, today).await? {
            info!(%user_id, %today, "onboarding plan already scheduled");
            return Ok(PlanOutcome::AlreadyScheduled(existing));
        }

        let template = select_plan(goal);
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id,
            name: template.workout_name.to_owned(),
            workout_type: goal.as_str().to_owned(),
            exercises: template.exercises,
            created_at: Utc::now(),
        };

        match self
            .database
            .create_onboarding_plan(&workout, today)
            .await?
        {
            Some(entry) => {
                info!(%user_id, %today, workout = %workout.name, "onboarding plan created");
                Ok(PlanOutcome::Created(entry))
            }
            // Lost the race to a concurrent call; surface the winner's entry
            None => {
                let existing = self
                    .database
                    .get_onboarding_entry(user_id, today)
                    .await?
                    .ok_or_else(|| AppError::storage("Onboarding entry vanished after conflict"))?;
                Ok(PlanOutcome::AlreadyScheduled(existing))
            }
        }
    }
}

/// Reject answers with missing required fields
fn validate_answers(answers: &OnboardingAnswers) -> AppResult<()> {
    if answers.age.is_none() {
        return Err(AppError::missing_field("age"));
    }
    if answers.weight.is_none() {
        return Err(AppError::missing_field("weight"));
    }
    if is_blank(answers.goal.as_deref()) {
        return Err(AppError::missing_field("goal"));
    }
    if is_blank(answers.fitness_level.as_deref()) {
        return Err(AppError::missing_field("fitness_level"));
    }
    Ok(())
}

/// Absent or whitespace-only string field
fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |s| s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_answers() -> OnboardingAnswers {
        OnboardingAnswers {
            age: Some(30),
            weight: Some(72.5),
            goal: Some("Weight Loss".into()),
            fitness_level: Some("beginner".into()),
            equipment: vec!["dumbbells".into()],
        }
    }

    #[test]
    fn test_validate_accepts_full_answers() {
        assert!(validate_answers(&full_answers()).is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut missing_age = full_answers();
        missing_age.age = None;
        assert!(validate_answers(&missing_age).is_err());

        let mut blank_goal = full_answers();
        blank_goal.goal = Some("  ".into());
        assert!(validate_answers(&blank_goal).is_err());

        let mut missing_level = full_answers();
        missing_level.fitness_level = None;
        assert!(validate_answers(&missing_level).is_err());
    }

    #[test]
    fn test_equipment_is_optional() {
        let mut answers = full_answers();
        answers.equipment.clear();
        assert!(validate_answers(&answers).is_ok());
    }
}
