// ABOUTME: FitTrack server binary entry point
// ABOUTME: Loads configuration, initializes logging and storage, then serves
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # FitTrack Server Binary
//!
//! Starts the fitness-tracking API with JWT authentication, SQLite storage
//! and the daily reminder job.

use anyhow::Result;
use clap::Parser;
use fittrack_server::{
    auth::{generate_jwt_secret, AuthManager},
    config::environment::ServerConfig,
    database::Database,
    logging,
    notifications::{HttpMailer, Mailer},
    resources::ServerResources,
    server::HttpServer,
};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fittrack-server")]
#[command(about = "FitTrack - personal fitness tracking API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting FitTrack server");
    info!("{}", config.summary());

    // An ephemeral secret keeps development working but invalidates tokens
    // on restart; production must configure JWT_SECRET.
    let auth_manager = if config.auth.jwt_secret.is_empty() {
        warn!("JWT_SECRET not set; generating an ephemeral signing secret");
        AuthManager::new(&generate_jwt_secret(), config.auth.jwt_expiry_hours)
    } else {
        AuthManager::new(
            config.auth.jwt_secret.as_bytes(),
            config.auth.jwt_expiry_hours,
        )
    };

    let database = Database::new(&config.database.url).await?;
    info!("Database initialized: {}", config.database.url);

    let config = Arc::new(config);
    let mailer: Arc<dyn Mailer> = Arc::new(HttpMailer::new(config.mailer.clone())?);

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        config.clone(),
        mailer,
    ));

    let port = config.http_port;
    HttpServer::new(resources).run(port).await
}
