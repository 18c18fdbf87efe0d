// ABOUTME: Integration tests for onboarding plan generation
// ABOUTME: Validates idempotence, validation errors and the end-to-end scenario
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fittrack_server::{
    errors::ErrorCode,
    localtime::local_today,
    models::OnboardingAnswers,
    onboarding::{OnboardingService, PlanOutcome},
    streaks,
};

fn weight_loss_answers() -> OnboardingAnswers {
    OnboardingAnswers {
        age: Some(28),
        weight: Some(80.0),
        goal: Some("Weight Loss".into()),
        fitness_level: Some("beginner".into()),
        equipment: vec![],
    }
}

#[tokio::test]
async fn test_generate_plan_creates_workout_and_entry() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "jane@example.com", "Jane Doe").await;
    let service = OnboardingService::new(database.clone());

    let outcome = service
        .generate_plan(user.id, &weight_loss_answers(), 0)
        .await
        .unwrap();

    assert!(outcome.created());
    let entry = outcome.entry();
    assert_eq!(entry.user_id, user.id);
    assert_eq!(entry.scheduled_on, local_today(0));
    assert!(!entry.is_completed);

    let workout = database
        .get_workout(entry.workout_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(workout.name, "Fat Burner Starter");
    assert_eq!(workout.workout_type, "Weight Loss");
    assert_eq!(workout.exercises.len(), 4);

    // Answers landed on the user record
    let stored = database.get_user(user.id).await.unwrap().unwrap();
    assert!(stored.is_onboarded);
    assert_eq!(stored.age, Some(28));
}

#[tokio::test]
async fn test_generate_plan_is_idempotent_per_day() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let service = OnboardingService::new(database.clone());

    let first = service
        .generate_plan(user.id, &weight_loss_answers(), 0)
        .await
        .unwrap();
    let second = service
        .generate_plan(user.id, &weight_loss_answers(), 0)
        .await
        .unwrap();

    assert!(first.created());
    assert!(matches!(second, PlanOutcome::AlreadyScheduled(_)));
    assert_eq!(first.entry().id, second.entry().id);

    // Exactly one entry for today exists
    let schedule = database
        .list_schedule(user.id, Some(local_today(0)))
        .await
        .unwrap();
    assert_eq!(schedule.len(), 1);
}

#[tokio::test]
async fn test_rerun_overwrites_answers_without_new_entry() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let service = OnboardingService::new(database.clone());

    service
        .generate_plan(user.id, &weight_loss_answers(), 0)
        .await
        .unwrap();

    let mut corrected = weight_loss_answers();
    corrected.age = Some(29);
    let outcome = service.generate_plan(user.id, &corrected, 0).await.unwrap();
    assert!(!outcome.created());

    let stored = database.get_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.age, Some(29));
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let service = OnboardingService::new(database.clone());

    let mut missing_goal = weight_loss_answers();
    missing_goal.goal = None;
    let err = service
        .generate_plan(user.id, &missing_goal, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    let mut missing_weight = weight_loss_answers();
    missing_weight.weight = None;
    let err = service
        .generate_plan(user.id, &missing_weight, 0)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);

    // Nothing was scheduled
    let schedule = database.list_schedule(user.id, None).await.unwrap();
    assert!(schedule.is_empty());
}

#[tokio::test]
async fn test_unknown_goal_falls_back_to_default_template() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let service = OnboardingService::new(database.clone());

    let mut answers = weight_loss_answers();
    answers.goal = Some("Parkour".into());
    let outcome = service.generate_plan(user.id, &answers, 0).await.unwrap();

    let workout = database
        .get_workout(outcome.entry().workout_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(workout.name, "Mobility & Flow");
    assert_eq!(workout.workout_type, "General");
}

#[tokio::test]
async fn test_end_to_end_weight_loss_streak() {
    let database = common::create_test_database().await;
    let user = common::create_test_user(&database, "jane@example.com", "Jane").await;
    let service = OnboardingService::new(database.clone());

    let outcome = service
        .generate_plan(user.id, &weight_loss_answers(), 0)
        .await
        .unwrap();
    let entry = database
        .toggle_completion(outcome.entry().id)
        .await
        .unwrap();
    assert!(entry.is_completed);

    let today = local_today(0);
    let completed = database.completed_dates(user.id).await.unwrap();
    let total = database.completed_count(user.id).await.unwrap();
    let summary = streaks::summarize(&completed, total, today);

    assert_eq!(summary.streak, 1);
    assert_eq!(summary.total_completed, 1);
    let first_step = summary
        .badges
        .iter()
        .find(|b| b.id == "first-step")
        .unwrap();
    assert!(first_step.is_unlocked);
}
