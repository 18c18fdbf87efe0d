// ABOUTME: Daily reminder job scanning incomplete schedule entries
// ABOUTME: Sends one notification per pending entry with per-entry failure isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Reminder Job
//!
//! A time-triggered scan of today's incomplete schedule entries. Each
//! pending entry produces one reminder message; a bad contact address or a
//! failed delivery affects only that entry, never the run, and a failed
//! run never takes down the scheduler task.

use crate::config::AppBehaviorConfig;
use crate::database::Database;
use crate::localtime::{local_hour, local_today};
use crate::notifications::{reminder_email, Mailer};
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};

/// Seconds between scheduler wake-ups
const TICK_SECONDS: u64 = 3600;

/// Outcome counts for one reminder run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReminderReport {
    /// Messages handed to the transport successfully
    pub sent: u32,
    /// Entries skipped for a missing or malformed contact address
    pub skipped: u32,
    /// Entries whose delivery failed
    pub failed: u32,
}

/// Daily workout reminder job
pub struct ReminderJob {
    database: Arc<Database>,
    mailer: Arc<dyn Mailer>,
    dashboard_url: String,
    app: AppBehaviorConfig,
    /// Local date of the last completed run, so an hourly tick never
    /// fires twice in one day
    last_run: Mutex<Option<NaiveDate>>,
}

impl ReminderJob {
    /// Create the job
    #[must_use]
    pub fn new(
        database: Arc<Database>,
        mailer: Arc<dyn Mailer>,
        dashboard_url: String,
        app: AppBehaviorConfig,
    ) -> Self {
        Self {
            database,
            mailer,
            dashboard_url,
            app,
            last_run: Mutex::new(None),
        }
    }

    /// Spawn the scheduler task
    ///
    /// Wakes hourly; when the configured local hour arrives and the job has
    /// not yet run for the local date, it executes one run. Errors are
    /// logged and the loop continues.
    pub fn start(self: Arc<Self>) {
        info!(
            hour = self.app.reminder_hour,
            "reminder scheduler is active"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(TICK_SECONDS));

            loop {
                interval.tick().await;

                let offset = self.app.default_utc_offset_minutes;
                if local_hour(offset) != self.app.reminder_hour {
                    continue;
                }

                let today = local_today(offset);
                {
                    let mut last_run = self.last_run.lock().await;
                    if *last_run == Some(today) {
                        continue;
                    }
                    *last_run = Some(today);
                }

                match self.run_once(today).await {
                    Ok(report) => info!(
                        sent = report.sent,
                        skipped = report.skipped,
                        failed = report.failed,
                        %today,
                        "reminder run complete"
                    ),
                    Err(e) => error!("reminder run failed: {e}"),
                }
            }
        });
    }

    /// Execute one reminder run for a calendar date
    ///
    /// # Errors
    ///
    /// Returns an error only if the pending-entry query itself fails;
    /// per-entry delivery problems are counted, logged and swallowed.
    pub async fn run_once(&self, date: NaiveDate) -> crate::errors::AppResult<ReminderReport> {
        debug!(%date, "running daily workout reminder check");

        let pending = self.database.pending_reminders(date).await?;
        if pending.is_empty() {
            debug!(%date, "no pending workouts found");
            return Ok(ReminderReport::default());
        }

        info!(count = pending.len(), %date, "found pending workout reminders");

        let mut report = ReminderReport::default();
        for reminder in &pending {
            if !is_plausible_email(&reminder.email) {
                warn!(
                    schedule_id = %reminder.schedule_id,
                    "skipping reminder: missing or malformed contact address"
                );
                report.skipped += 1;
                continue;
            }

            let first_name = reminder
                .display_name
                .split_whitespace()
                .next()
                .unwrap_or("there");
            let message = reminder_email(
                &reminder.email,
                first_name,
                &reminder.workout_name,
                &self.dashboard_url,
            );

            match self.mailer.send(&message).await {
                Ok(()) => {
                    debug!(to = %reminder.email, "reminder sent");
                    report.sent += 1;
                }
                Err(e) => {
                    error!(
                        schedule_id = %reminder.schedule_id,
                        "reminder delivery failed: {e}"
                    );
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }
}

/// Cheap plausibility check; real validation is the relay's job
fn is_plausible_email(address: &str) -> bool {
    let trimmed = address.trim();
    !trimmed.is_empty() && trimmed.contains('@') && !trimmed.starts_with('@')
}
