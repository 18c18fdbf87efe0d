// ABOUTME: Route module organization for FitTrack HTTP endpoints
// ABOUTME: Provides route definitions organized by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Route modules for the FitTrack server
//!
//! Each domain module contains route definitions and thin handler
//! functions that delegate to the service and persistence layers.

/// User registration, login and profile routes
pub mod auth;
/// Health check and readiness routes
pub mod health;
/// Workout templates, scheduling, stats and onboarding routes
pub mod workouts;

pub use auth::AuthRoutes;
pub use health::HealthRoutes;
pub use workouts::WorkoutRoutes;
