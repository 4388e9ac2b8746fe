// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Water intake model for storage and API.

use crate::db::{collections, OwnedRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// Stored water intake record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Water {
    pub id: Uuid,
    pub user_id: String,
    pub amount_ml: u32,
    pub logged_at: DateTime<Utc>,
    pub created_at: String,
    pub updated_at: String,
}

/// Client-supplied water intake fields. `logged_at` defaults to now.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct WaterInput {
    #[validate(range(min = 1, max = 5000))]
    pub amount_ml: u32,
    pub logged_at: Option<DateTime<Utc>>,
}

impl Water {
    pub fn new(user_id: &str, input: WaterInput, now: DateTime<Utc>) -> Self {
        let stamp = crate::time_utils::format_utc_rfc3339(now);
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            amount_ml: input.amount_ml,
            logged_at: input.logged_at.unwrap_or(now),
            created_at: stamp.clone(),
            updated_at: stamp,
        }
    }

    pub fn apply(&mut self, input: WaterInput, now: DateTime<Utc>) {
        self.amount_ml = input.amount_ml;
        if let Some(logged_at) = input.logged_at {
            self.logged_at = logged_at;
        }
        self.updated_at = crate::time_utils::format_utc_rfc3339(now);
    }
}

impl OwnedRecord for Water {
    const COLLECTION: &'static str = collections::WATER;

    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
