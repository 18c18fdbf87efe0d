// ABOUTME: Configuration module for the FitTrack server
// ABOUTME: Re-exports environment-driven server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Configuration management
//!
//! All configuration comes from environment variables (with `.env` support
//! in development); there is no configuration file format.

/// Environment-driven server configuration
pub mod environment;

pub use environment::{
    AppBehaviorConfig, AuthConfig, CorsConfig, DatabaseConfig, MailerConfig, ServerConfig,
};
