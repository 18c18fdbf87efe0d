// ABOUTME: Shared server resources passed to all route handlers
// ABOUTME: Aggregates database, auth manager, config and mail transport behind Arcs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! Shared server resources
//!
//! One `Arc<ServerResources>` is the only state route handlers see; there
//! is no other cross-request state in the process.

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::notifications::Mailer;
use std::sync::Arc;

/// Dependency bundle shared by every route handler and the reminder job
pub struct ServerResources {
    /// Persistence layer
    pub database: Arc<Database>,
    /// Token issuance and validation
    pub auth_manager: Arc<AuthManager>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Outbound mail transport
    pub mailer: Arc<dyn Mailer>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        config: Arc<ServerConfig>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            database: Arc::new(database),
            auth_manager: Arc::new(auth_manager),
            config,
            mailer,
        }
    }
}
