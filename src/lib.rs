// ABOUTME: Main library entry point for the FitTrack server
// ABOUTME: Exposes the fitness planning, scheduling, streak and reminder modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![deny(unsafe_code)]

//! # FitTrack Server
//!
//! A personal fitness-tracking backend: users register, receive a generated
//! starter plan from onboarding answers, schedule workout sessions on a
//! calendar, mark them complete, and read streaks and badges. A daily
//! reminder job nudges users with pending sessions.
//!
//! ## Architecture
//!
//! - **Plan selection** ([`plan`]): pure goal → template lookup
//! - **Onboarding** ([`onboarding`]): answers → plan + idempotent
//!   schedule creation for the caller's local "today"
//! - **Schedule store** ([`database`]): SQLite persistence with
//!   calendar-date semantics
//! - **Streaks and badges** ([`streaks`]): derived, recomputed on read
//! - **Reminders** ([`reminders`]): timer-driven scan with per-entry
//!   failure isolation
//! - **HTTP API** ([`routes`], [`server`]): thin axum handlers over the
//!   above

/// JWT authentication and password hashing
pub mod auth;

/// Configuration management
pub mod config;

/// SQLite persistence layer
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Local calendar-date derivation
pub mod localtime;

/// Logging configuration
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Core data models
pub mod models;

/// Outbound notification transports
pub mod notifications;

/// Onboarding plan generation
pub mod onboarding;

/// Goal → workout template selection
pub mod plan;

/// Daily reminder job
pub mod reminders;

/// Shared server resources
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Streak and badge computation
pub mod streaks;
