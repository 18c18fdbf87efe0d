// ABOUTME: Integration tests for the daily reminder job
// ABOUTME: Validates pending scans, skip/failure isolation and the no-op path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{NaiveDate, Utc};
use common::RecordingMailer;
use fittrack_server::{
    database::Database,
    models::{Exercise, ScheduleEntry, ScheduleSource, User, Workout},
    reminders::{ReminderJob, ReminderReport},
};
use std::sync::Arc;
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn seed_entry(
    database: &Database,
    user: &User,
    on: NaiveDate,
    completed: bool,
) -> ScheduleEntry {
    let workout = Workout {
        id: Uuid::new_v4(),
        user_id: user.id,
        name: "Stamina Builder".into(),
        workout_type: "Endurance".into(),
        exercises: vec![Exercise::new("Jump Rope", 3, "1 min")],
        created_at: Utc::now(),
    };
    database.create_workout(&workout).await.unwrap();

    let now = Utc::now();
    let entry = ScheduleEntry {
        id: Uuid::new_v4(),
        user_id: user.id,
        workout_id: workout.id,
        scheduled_on: on,
        is_completed: false,
        source: ScheduleSource::Manual,
        created_at: now,
        updated_at: now,
    };
    database.create_schedule_entry(&entry).await.unwrap();
    if completed {
        database.toggle_completion(entry.id).await.unwrap();
    }
    entry
}

fn job_over(database: Arc<Database>, mailer: Arc<RecordingMailer>) -> ReminderJob {
    let config = common::test_config();
    ReminderJob::new(
        database,
        mailer,
        config.mailer.dashboard_url.clone(),
        config.app,
    )
}

#[tokio::test]
async fn test_reminds_each_pending_entry_once() {
    let database = common::create_test_database().await;
    let jane = common::create_test_user(&database, "jane@example.com", "Jane Doe").await;
    let john = common::create_test_user(&database, "john@example.com", "John").await;
    let today = date(2025, 6, 10);

    seed_entry(&database, &jane, today, false).await;
    seed_entry(&database, &john, today, false).await;
    // Completed and off-day entries are not reminded
    seed_entry(&database, &jane, today, true).await;
    seed_entry(&database, &jane, date(2025, 6, 11), false).await;

    let mailer = Arc::new(RecordingMailer::default());
    let report = job_over(database, mailer.clone())
        .run_once(today)
        .await
        .unwrap();

    assert_eq!(
        report,
        ReminderReport {
            sent: 2,
            skipped: 0,
            failed: 0
        }
    );
    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().any(|m| m.to == "jane@example.com"));
    assert!(sent.iter().any(|m| m.to == "john@example.com"));
    assert!(sent[0].subject.contains("Stamina Builder"));
    assert!(sent
        .iter()
        .find(|m| m.to == "jane@example.com")
        .unwrap()
        .html_body
        .contains("Hey Jane!"));
}

#[tokio::test]
async fn test_empty_day_is_a_noop() {
    let database = common::create_test_database().await;
    let mailer = Arc::new(RecordingMailer::default());

    let report = job_over(database, mailer.clone())
        .run_once(date(2025, 6, 10))
        .await
        .unwrap();

    assert_eq!(report, ReminderReport::default());
    assert_eq!(mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_delivery_failure_does_not_abort_the_run() {
    let database = common::create_test_database().await;
    let jane = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let john = common::create_test_user(&database, "john@example.com", "John").await;
    let today = date(2025, 6, 10);
    seed_entry(&database, &jane, today, false).await;
    seed_entry(&database, &john, today, false).await;

    let mailer = Arc::new(RecordingMailer::failing_for(&["jane@example.com"]));
    let report = job_over(database, mailer.clone())
        .run_once(today)
        .await
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.sent, 1);
    assert_eq!(mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_malformed_address_is_skipped_not_fatal() {
    let database = common::create_test_database().await;
    // Deliberately damaged contact address
    let broken = common::create_test_user(&database, "not-an-address", "Broken").await;
    let jane = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let today = date(2025, 6, 10);
    seed_entry(&database, &broken, today, false).await;
    seed_entry(&database, &jane, today, false).await;

    let mailer = Arc::new(RecordingMailer::default());
    let report = job_over(database, mailer.clone())
        .run_once(today)
        .await
        .unwrap();

    assert_eq!(
        report,
        ReminderReport {
            sent: 1,
            skipped: 1,
            failed: 0
        }
    );
    assert_eq!(mailer.sent.lock().unwrap()[0].to, "jane@example.com");
}
