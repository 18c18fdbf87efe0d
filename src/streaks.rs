// ABOUTME: Streak and badge computation over completed schedule entries
// ABOUTME: Pure, derived on every read; nothing here is ever persisted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Streaks and Badges
//!
//! Derived, read-only statistics over a user's completed schedule entries.
//! Both the streak count and badge unlocks are recomputed from history on
//! every read, so editing or deleting history can never strand stale
//! "unlocked" state.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Badge unlock state, evaluated against completion history
#[derive(Debug, Clone, Serialize)]
pub struct Badge {
    /// Stable identifier
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// What it takes to unlock
    pub description: &'static str,
    /// Whether the current history unlocks it
    pub is_unlocked: bool,
}

/// Derived statistics returned by the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
    /// Consecutive-day streak ending today or yesterday
    pub streak: u32,
    /// Total completed entries
    pub total_completed: u32,
    /// Full badge catalog with unlock flags
    pub badges: Vec<Badge>,
}

/// Count consecutive calendar days with a completion, ending at `today`
/// or yesterday
///
/// A broken streak resets to zero immediately: if the most recent
/// completion is older than yesterday the result is 0, not a countdown
/// from the last active day.
#[must_use]
pub fn compute_streak(completed_dates: &[NaiveDate], today: NaiveDate) -> u32 {
    // Collapse to distinct dates, newest first
    let mut dates: Vec<NaiveDate> = completed_dates.to_vec();
    dates.sort_unstable();
    dates.dedup();
    dates.reverse();

    let Some(&most_recent) = dates.first() else {
        return 0;
    };

    let yesterday = today.pred_opt().unwrap_or(today);
    if most_recent != today && most_recent != yesterday {
        return 0;
    }

    let mut streak = 1;
    for pair in dates.windows(2) {
        if pair[0].pred_opt() == Some(pair[1]) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Evaluate the badge catalog against completion history
///
/// `completed_dates` are local calendar dates, so the weekend check needs
/// no further timezone handling. `total_completed` counts entries, not
/// distinct dates: two completed sessions on one day both count toward
/// "Iron Will".
#[must_use]
pub fn evaluate_badges(
    completed_dates: &[NaiveDate],
    total_completed: u32,
    today: NaiveDate,
) -> Vec<Badge> {
    let total = total_completed;
    let streak = compute_streak(completed_dates, today);
    let has_weekend = completed_dates
        .iter()
        .any(|d| matches!(d.weekday(), Weekday::Sat | Weekday::Sun));

    vec![
        Badge {
            id: "first-step",
            name: "First Step",
            description: "Complete your first workout",
            is_unlocked: total >= 1,
        },
        Badge {
            id: "on-fire",
            name: "On Fire",
            description: "Achieve a 3-day streak",
            is_unlocked: streak >= 3,
        },
        Badge {
            id: "iron-will",
            name: "Iron Will",
            description: "Complete 10 total workouts",
            is_unlocked: total >= 10,
        },
        Badge {
            id: "weekend-warrior",
            name: "Weekend Warrior",
            description: "Workout on a Saturday or Sunday",
            is_unlocked: has_weekend,
        },
    ]
}

/// Build the full stats summary for a user's history
#[must_use]
pub fn summarize(
    completed_dates: &[NaiveDate],
    total_completed: u32,
    today: NaiveDate,
) -> StatsSummary {
    StatsSummary {
        streak: compute_streak(completed_dates, today),
        total_completed,
        badges: evaluate_badges(completed_dates, total_completed, today),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(compute_streak(&[], d(2025, 6, 10)), 0);
    }

    #[test]
    fn test_three_consecutive_days() {
        let today = d(2025, 6, 10);
        let dates = [d(2025, 6, 10), d(2025, 6, 9), d(2025, 6, 8)];
        assert_eq!(compute_streak(&dates, today), 3);
    }

    #[test]
    fn test_gap_breaks_immediately() {
        let today = d(2025, 6, 10);
        let dates = [d(2025, 6, 10), d(2025, 6, 7)];
        assert_eq!(compute_streak(&dates, today), 1);
    }

    #[test]
    fn test_yesterday_only_still_counts() {
        let today = d(2025, 6, 10);
        assert_eq!(compute_streak(&[d(2025, 6, 9)], today), 1);
    }

    #[test]
    fn test_stale_streak_resets_to_zero() {
        // Last completion two days ago: the streak is dead, not counting
        // down from the last active day
        let today = d(2025, 6, 10);
        let dates = [d(2025, 6, 8), d(2025, 6, 7), d(2025, 6, 6)];
        assert_eq!(compute_streak(&dates, today), 0);
    }

    #[test]
    fn test_duplicate_dates_collapse() {
        let today = d(2025, 6, 10);
        let dates = [d(2025, 6, 10), d(2025, 6, 10), d(2025, 6, 9)];
        assert_eq!(compute_streak(&dates, today), 2);
    }

    #[test]
    fn test_badges_first_step_and_on_fire() {
        let today = d(2025, 6, 10);
        let dates = [d(2025, 6, 10), d(2025, 6, 9), d(2025, 6, 8)];
        let badges = evaluate_badges(&dates, 3, today);

        let by_id = |id: &str| badges.iter().find(|b| b.id == id).unwrap();
        assert!(by_id("first-step").is_unlocked);
        assert!(by_id("on-fire").is_unlocked);
        assert!(!by_id("iron-will").is_unlocked);
    }

    #[test]
    fn test_weekend_warrior() {
        let today = d(2025, 6, 9); // a Monday
        // 2025-06-07 is a Saturday
        let badges = evaluate_badges(&[d(2025, 6, 7)], 1, today);
        assert!(
            badges
                .iter()
                .find(|b| b.id == "weekend-warrior")
                .unwrap()
                .is_unlocked
        );

        // A Tuesday completion alone does not unlock it
        let badges = evaluate_badges(&[d(2025, 6, 3)], 1, today);
        assert!(
            !badges
                .iter()
                .find(|b| b.id == "weekend-warrior")
                .unwrap()
                .is_unlocked
        );
    }

    #[test]
    fn test_iron_will_requires_ten() {
        let today = d(2025, 6, 20);
        let dates: Vec<NaiveDate> = (1..=10).map(|day| d(2025, 6, day)).collect();
        let badges = evaluate_badges(&dates, 10, today);
        assert!(
            badges
                .iter()
                .find(|b| b.id == "iron-will")
                .unwrap()
                .is_unlocked
        );
    }
}
