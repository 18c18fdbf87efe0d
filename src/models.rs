// ABOUTME: Core data models for users, workouts and schedule entries
// ABOUTME: Defines User, Workout, Exercise, ScheduleEntry and their enums
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Data Models
//!
//! Core data structures shared by the persistence layer, the services, and
//! the HTTP API.
//!
//! ## Design Principles
//!
//! - **Calendar dates, not instants**: schedule entries carry a
//!   [`chrono::NaiveDate`]; the time-of-day never enters the data model, so
//!   timezone conversion happens exactly once (at the edge).
//! - **Total enums**: goal and fitness-level parsing never fails; unknown
//!   values map to a defined fallback.
//! - **Serializable**: all models serialize to JSON for the REST API.

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default avatar for newly registered users
pub const DEFAULT_AVATAR_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=Felix";

/// Training goal selected during onboarding
///
/// Parsing is total: any unrecognized or missing goal becomes
/// [`FitnessGoal::General`], so plan selection always has a defined input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FitnessGoal {
    /// Fat loss focused training
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    /// Hypertrophy and strength focused training
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    /// Cardiovascular endurance focused training
    Endurance,
    /// General fitness and mobility (also the fallback)
    #[default]
    General,
}

impl FitnessGoal {
    /// Database / display string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WeightLoss => "Weight Loss",
            Self::MuscleGain => "Muscle Gain",
            Self::Endurance => "Endurance",
            Self::General => "General",
        }
    }

    /// Parse a goal string, falling back to `General` for unknown values
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "Weight Loss" => Self::WeightLoss,
            "Muscle Gain" => Self::MuscleGain,
            "Endurance" => Self::Endurance,
            _ => Self::General,
        }
    }
}

impl Display for FitnessGoal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Self-reported training experience collected during onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    /// New to structured training (also the fallback)
    #[default]
    Beginner,
    /// Trains regularly
    Intermediate,
    /// Multiple years of consistent training
    Advanced,
}

impl FitnessLevel {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Parse a level string, falling back to `Beginner` for unknown values
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "intermediate" => Self::Intermediate,
            "advanced" => Self::Advanced,
            _ => Self::Beginner,
        }
    }
}

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (unique, used for login and reminders)
    pub email: String,
    /// Display name
    pub display_name: String,
    /// Hashed password for authentication
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Avatar image URL
    pub avatar_url: String,
    /// Age in years (set during onboarding)
    pub age: Option<u16>,
    /// Body weight in kilograms (set during onboarding)
    pub weight_kg: Option<f64>,
    /// Training goal (set during onboarding)
    pub goal: Option<FitnessGoal>,
    /// Self-reported training experience (set during onboarding)
    pub fitness_level: Option<FitnessLevel>,
    /// Available equipment (set during onboarding)
    pub equipment: Vec<String>,
    /// Whether the onboarding flow has completed
    pub is_onboarded: bool,
    /// When the account was created
    pub created_at: DateTime<Utc>,
    /// When the account was last modified
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with defaults applied
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            avatar_url: DEFAULT_AVATAR_URL.to_owned(),
            age: None,
            weight_kg: None,
            goal: None,
            fitness_level: None,
            equipment: Vec::new(),
            is_onboarded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// First name for personalized messages (display name up to the first space)
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.display_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.display_name)
    }
}

/// Repetition target for an exercise: either a plain count or a
/// duration/free-form string such as `"45 sec"` or `"15 min"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    /// A repetition count, e.g. `12`
    Count(u32),
    /// A duration or free-form target, e.g. `"45 sec"`
    Text(String),
}

impl Display for Reps {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u32> for Reps {
    fn from(count: u32) -> Self {
        Self::Count(count)
    }
}

impl From<&str> for Reps {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

/// A single exercise within a workout template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name, e.g. "Burpees"
    pub name: String,
    /// Number of sets
    pub sets: u32,
    /// Repetition target per set
    pub reps: Reps,
    /// Optional overall duration in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

impl Exercise {
    /// Create an exercise with no duration component
    #[must_use]
    pub fn new(name: &str, sets: u32, reps: impl Into<Reps>) -> Self {
        Self {
            name: name.to_owned(),
            sets,
            reps: reps.into(),
            duration_minutes: None,
        }
    }
}

/// A named, reusable workout template owned by a user
///
/// A template describes *planned* exercises; it is not a log of what was
/// actually performed. Templates are immutable once scheduled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique workout identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Template name, e.g. "Fat Burner Starter"
    pub name: String,
    /// Category string, e.g. "Weight Loss" or "Strength"
    pub workout_type: String,
    /// Ordered exercise sequence
    pub exercises: Vec<Exercise>,
    /// When the template was created
    pub created_at: DateTime<Utc>,
}

/// How a schedule entry came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleSource {
    /// Auto-generated by the onboarding orchestrator (at most one per
    /// user per calendar date)
    Onboarding,
    /// Explicitly scheduled by the user
    Manual,
}

impl ScheduleSource {
    /// Database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Manual => "manual",
        }
    }

    /// Parse a source string, defaulting unknown values to `Manual`
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        if value == "onboarding" {
            Self::Onboarding
        } else {
            Self::Manual
        }
    }
}

/// A single planned occurrence of a workout on a calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// The workout template this entry schedules
    pub workout_id: Uuid,
    /// Calendar date of the planned session (no time component)
    pub scheduled_on: NaiveDate,
    /// Whether the session has been completed
    pub is_completed: bool,
    /// How this entry was created
    pub source: ScheduleSource,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
    /// When the entry was last modified
    pub updated_at: DateTime<Utc>,
}

/// A schedule entry with its workout embedded, as returned by calendar reads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleWithWorkout {
    /// The schedule entry itself
    #[serde(flatten)]
    pub entry: ScheduleEntry,
    /// The owning workout template
    pub workout: Workout,
}

/// Answers collected by the onboarding flow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingAnswers {
    /// Age in years
    pub age: Option<u16>,
    /// Body weight in kilograms
    pub weight: Option<f64>,
    /// Training goal string, e.g. "Weight Loss"
    pub goal: Option<String>,
    /// Training experience string, e.g. "beginner"
    pub fitness_level: Option<String>,
    /// Available equipment
    #[serde(default)]
    pub equipment: Vec<String>,
}
