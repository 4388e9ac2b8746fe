// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Sleep log model for storage and API.

use crate::db::{collections, OwnedRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::{Validate, ValidationError};

const MAX_SLEEP_HOURS: i64 = 24;

/// Stored sleep record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Sleep {
    pub id: Uuid,
    pub user_id: String,
    pub sleep_start: DateTime<Utc>,
    pub sleep_end: DateTime<Utc>,
    /// Self-reported quality, 1 (poor) to 5 (excellent)
    pub quality: u8,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Client-supplied sleep fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_sleep_window"))]
pub struct SleepInput {
    pub sleep_start: DateTime<Utc>,
    pub sleep_end: DateTime<Utc>,
    #[validate(range(min = 1, max = 5))]
    pub quality: u8,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn validate_sleep_window(input: &SleepInput) -> Result<(), ValidationError> {
    let span = input.sleep_end.signed_duration_since(input.sleep_start);
    if span <= chrono::Duration::zero() {
        return Err(ValidationError::new("sleep_end_before_start"));
    }
    if span > chrono::Duration::hours(MAX_SLEEP_HOURS) {
        return Err(ValidationError::new("sleep_window_too_long"));
    }
    Ok(())
}

/// Sleep record with its computed duration.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SleepResponse {
    #[serde(flatten)]
    pub sleep: Sleep,
    pub duration_hours: f64,
}

impl From<Sleep> for SleepResponse {
    fn from(sleep: Sleep) -> Self {
        Self {
            duration_hours: sleep.duration_hours(),
            sleep,
        }
    }
}

impl Sleep {
    pub fn new(user_id: &str, input: SleepInput, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            sleep_start: input.sleep_start,
            sleep_end: input.sleep_end,
            quality: input.quality,
            notes: input.notes,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    pub fn apply(&mut self, input: SleepInput, now: &str) {
        self.sleep_start = input.sleep_start;
        self.sleep_end = input.sleep_end;
        self.quality = input.quality;
        self.notes = input.notes;
        self.updated_at = now.to_string();
    }

    /// Hours between falling asleep and waking.
    pub fn duration_hours(&self) -> f64 {
        let minutes = self
            .sleep_end
            .signed_duration_since(self.sleep_start)
            .num_minutes()
            .max(0);
        minutes as f64 / 60.0
    }
}

impl OwnedRecord for Sleep {
    const COLLECTION: &'static str = collections::SLEEP;

    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
