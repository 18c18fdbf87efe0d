// ABOUTME: HTTP mail relay client implementing the Mailer trait
// ABOUTME: Posts JSON mail submissions to a configured relay endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! HTTP mail relay client
//!
//! The server never speaks SMTP. Messages are submitted as JSON to a relay
//! endpoint (any transactional-mail HTTP API shaped like
//! `POST {endpoint}` with `{from, to, subject, html}`), authenticated with
//! a bearer token.

use super::{EmailMessage, Mailer};
use crate::config::MailerConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Request timeout for relay submissions
const SEND_TIMEOUT_SECS: u64 = 10;

/// JSON submission body accepted by the relay
#[derive(Debug, Serialize)]
struct MailSubmission<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Mailer backed by an HTTP relay service
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailerConfig,
}

impl HttpMailer {
    /// Create a relay client from mailer configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the underlying HTTP client cannot be built.
    pub fn new(config: MailerConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEND_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build mail client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let submission = MailSubmission {
            from: &self.config.from_address,
            to: &message.to,
            subject: &message.subject,
            html: &message.html_body,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_token)
            .json(&submission)
            .send()
            .await
            .map_err(|e| AppError::external_service("mail relay", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "mail relay",
                format!("relay returned {}", response.status()),
            ));
        }

        Ok(())
    }
}
