// ABOUTME: Notification transport module for outbound user messages
// ABOUTME: Defines the Mailer trait and the reminder message template
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Notifications
//!
//! Outbound delivery is an external collaborator: the server renders a
//! message and hands it to a [`Mailer`]. The production implementation
//! posts to an HTTP mail relay; tests substitute a recording mock.

/// HTTP mail relay client
pub mod email;

pub use email::HttpMailer;

use crate::errors::AppResult;
use async_trait::async_trait;

/// A rendered outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns `ExternalServiceError` when the transport refuses or fails
    /// the delivery. Callers treat failures as per-message, never fatal.
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;
}

/// Render the daily workout reminder for one schedule entry
#[must_use]
pub fn reminder_email(
    to: &str,
    first_name: &str,
    workout_name: &str,
    dashboard_url: &str,
) -> EmailMessage {
    let html_body = format!(
        "<div style=\"font-family: Arial, sans-serif; padding: 20px;\">\
         <h2>Hey {first_name}!</h2>\
         <p>Don't forget to crush your goals today.</p>\
         <p><strong>Today's Mission:</strong> {workout_name}</p>\
         <p><a href=\"{dashboard_url}\">Go to Dashboard</a></p>\
         <p>Keep pushing! - The FitTrack Team</p>\
         </div>"
    );

    EmailMessage {
        to: to.to_owned(),
        subject: format!("Workout Reminder: {workout_name}"),
        html_body,
    }
}
