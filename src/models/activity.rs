// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity model for storage and API.

use crate::db::{collections, OwnedRecord};
use crate::services::calories::calories_burned;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// Stored activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activity {
    pub id: Uuid,
    /// Owner identity
    pub user_id: String,
    /// Activity type label (Running, Yoga, ...)
    pub activity_type: String,
    pub duration_minutes: u32,
    /// Derived from type and duration; never accepted from input
    pub calories_burned: f64,
    pub date: NaiveDate,
    pub distance_km: Option<f64>,
    /// Average heart rate (bpm)
    pub heart_rate: Option<u32>,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Client-supplied activity fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ActivityInput {
    #[validate(length(min = 1, max = 50))]
    pub activity_type: String,
    #[validate(range(min = 1, max = 1440))]
    pub duration_minutes: u32,
    pub date: NaiveDate,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub distance_km: Option<f64>,
    #[validate(range(min = 40, max = 220))]
    pub heart_rate: Option<u32>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

impl Activity {
    /// Build a new record owned by `user_id`.
    pub fn new(user_id: &str, input: ActivityInput, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            calories_burned: calories_burned(&input.activity_type, input.duration_minutes),
            activity_type: input.activity_type,
            duration_minutes: input.duration_minutes,
            date: input.date,
            distance_km: input.distance_km,
            heart_rate: input.heart_rate,
            notes: input.notes,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Replace the client-editable fields, re-deriving calories.
    pub fn apply(&mut self, input: ActivityInput, now: &str) {
        self.calories_burned = calories_burned(&input.activity_type, input.duration_minutes);
        self.activity_type = input.activity_type;
        self.duration_minutes = input.duration_minutes;
        self.date = input.date;
        self.distance_km = input.distance_km;
        self.heart_rate = input.heart_rate;
        self.notes = input.notes;
        self.updated_at = now.to_string();
    }
}

impl OwnedRecord for Activity {
    const COLLECTION: &'static str = collections::ACTIVITIES;

    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
