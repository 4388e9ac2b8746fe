// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calories-burned estimate from activity type and duration.

/// Per-minute burn rate for activity types without a table entry.
pub const DEFAULT_RATE_PER_MINUTE: f64 = 5.0;

/// Per-minute burn rates keyed by lower-cased activity type.
const RATES_PER_MINUTE: &[(&str, f64)] = &[
    ("running", 10.0),
    ("cycling", 8.0),
    ("swimming", 9.0),
    ("walking", 4.0),
    ("hiking", 6.0),
    ("yoga", 3.0),
    ("weightlifting", 6.0),
    ("hiit", 12.0),
    ("rowing", 7.0),
    ("dancing", 5.5),
];

/// Burn rate for an activity type. Matching is case-insensitive and exact;
/// unknown types get [`DEFAULT_RATE_PER_MINUTE`].
pub fn rate_per_minute(activity_type: &str) -> f64 {
    let key = activity_type.to_lowercase();
    RATES_PER_MINUTE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_RATE_PER_MINUTE)
}

/// Estimated calories burned. Total: never fails, never negative.
pub fn calories_burned(activity_type: &str, duration_minutes: u32) -> f64 {
    rate_per_minute(activity_type) * f64::from(duration_minutes)
}
