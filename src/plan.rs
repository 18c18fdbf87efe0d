// ABOUTME: Goal-to-template plan selection table
// ABOUTME: Pure mapping from a fitness goal to a named starter workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Plan Selection
//!
//! The single place that encodes the goal → exercise mapping. Selection is
//! a pure, total lookup: every [`FitnessGoal`] (including the `General`
//! fallback that unrecognized goals parse into) maps to a fixed, non-empty
//! template. No side effects, no failure modes.

use crate::models::{Exercise, FitnessGoal};

/// A named starter template produced by plan selection
#[derive(Debug, Clone)]
pub struct PlanTemplate {
    /// Workout name, e.g. "Fat Burner Starter"
    pub workout_name: &'static str,
    /// Ordered exercise sequence (never empty)
    pub exercises: Vec<Exercise>,
}

/// Select the starter workout template for a goal
#[must_use]
pub fn select_plan(goal: FitnessGoal) -> PlanTemplate {
    match goal {
        FitnessGoal::WeightLoss => PlanTemplate {
            workout_name: "Fat Burner Starter",
            exercises: vec![
                Exercise::new("Jumping Jacks", 3, 30),
                Exercise::new("Burpees", 3, 10),
                Exercise::new("Mountain Climbers", 3, 20),
                Exercise::new("High Knees", 3, 30),
            ],
        },
        FitnessGoal::MuscleGain => PlanTemplate {
            workout_name: "Full Body Strength",
            exercises: vec![
                Exercise::new("Push-ups", 3, 12),
                Exercise::new("Bodyweight Squats", 4, 15),
                Exercise::new("Lunges", 3, 12),
                Exercise::new("Plank", 3, "45 sec"),
            ],
        },
        FitnessGoal::Endurance => PlanTemplate {
            workout_name: "Stamina Builder",
            exercises: vec![
                Exercise::new("Run / Jog", 1, "15 min"),
                Exercise::new("Jump Rope", 3, "1 min"),
                Exercise::new("Box Jumps", 3, 12),
            ],
        },
        FitnessGoal::General => PlanTemplate {
            workout_name: "Mobility & Flow",
            exercises: vec![
                Exercise::new("Yoga Flow", 1, "10 min"),
                Exercise::new("Cat-Cow Stretch", 3, 10),
                Exercise::new("Child's Pose", 3, "30 sec"),
            ],
        },
    }
}
