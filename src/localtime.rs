// ABOUTME: Local calendar-date derivation from UTC instants and offsets
// ABOUTME: The single place timezone correction happens before truncating to a date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Local Time Handling
//!
//! Calendar "today" must be computed in the caller's local zone: naive UTC
//! truncation shifts the day near midnight for anyone east or west of
//! Greenwich. Every date truncation in the server goes through this module,
//! and persisted values are calendar dates only.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};

/// Largest representable UTC offset (UTC+14:00)
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Clamp an offset (minutes east of UTC) to the representable range
#[must_use]
pub fn clamp_offset(offset_minutes: i32) -> i32 {
    offset_minutes.clamp(-MAX_OFFSET_MINUTES, MAX_OFFSET_MINUTES)
}

/// Calendar date of `instant` in a zone `offset_minutes` east of UTC
#[must_use]
pub fn local_date_at(instant: DateTime<Utc>, offset_minutes: i32) -> NaiveDate {
    (instant + Duration::minutes(i64::from(clamp_offset(offset_minutes)))).date_naive()
}

/// Today's calendar date in a zone `offset_minutes` east of UTC
#[must_use]
pub fn local_today(offset_minutes: i32) -> NaiveDate {
    local_date_at(Utc::now(), offset_minutes)
}

/// Current hour of day (0-23) in a zone `offset_minutes` east of UTC
#[must_use]
pub fn local_hour(offset_minutes: i32) -> u8 {
    let shifted = Utc::now() + Duration::minutes(i64::from(clamp_offset(offset_minutes)));
    u8::try_from(shifted.hour()).unwrap_or(0)
}
