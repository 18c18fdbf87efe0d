// ABOUTME: HTTP middleware for cross-origin access
// ABOUTME: Re-exports the CORS layer configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
