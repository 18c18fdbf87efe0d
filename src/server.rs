// ABOUTME: HTTP server assembly binding routes, middleware and background jobs
// ABOUTME: Composes domain routers and spawns the reminder scheduler before serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # HTTP Server
//!
//! Composes the domain routers into one axum application, attaches
//! tracing and CORS layers, spawns the reminder job and serves until
//! shutdown. Requests share nothing but `Arc<ServerResources>`.

use crate::middleware::setup_cors;
use crate::reminders::ReminderJob;
use crate::resources::ServerResources;
use crate::routes::{AuthRoutes, HealthRoutes, WorkoutRoutes};
use anyhow::{Context, Result};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// FitTrack HTTP server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create the server from shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> axum::Router {
        axum::Router::new()
            .merge(HealthRoutes::routes())
            .merge(AuthRoutes::routes(self.resources.clone()))
            .merge(WorkoutRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(setup_cors(&self.resources.config))
    }

    /// Start the reminder job and serve the API
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server fails.
    pub async fn run(self, port: u16) -> Result<()> {
        let job = Arc::new(ReminderJob::new(
            self.resources.database.clone(),
            self.resources.mailer.clone(),
            self.resources.config.mailer.dashboard_url.clone(),
            self.resources.config.app.clone(),
        ));
        if self.resources.config.mailer.enabled {
            job.start();
        } else {
            info!("mailer disabled; reminder job not started");
        }

        let app = self.router();

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
            .await
            .with_context(|| format!("Failed to bind port {port}"))?;
        info!("FitTrack server listening on port {port}");

        axum::serve(listener, app)
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
