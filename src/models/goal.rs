// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Goal model for storage and API.
//!
//! A goal's `status` is set by its owner; it is not derived from progress
//! or from the deadline passing.

use crate::db::{collections, OwnedRecord};
use crate::services::progress::goal_progress;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum GoalStatus {
    #[default]
    InProgress,
    Completed,
    Failed,
}

/// Stored goal record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Goal {
    pub id: Uuid,
    pub user_id: String,
    /// Goal type label (Weight, Distance, ...)
    pub goal_type: String,
    pub description: Option<String>,
    pub target_value: f64,
    /// Running progress, updated as the user reports it
    pub current_value: f64,
    /// Baseline for goals that decrease toward the target
    pub initial_value: Option<f64>,
    pub deadline: NaiveDate,
    pub status: GoalStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Client-supplied goal fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GoalInput {
    #[validate(length(min = 1, max = 50))]
    pub goal_type: String,
    #[validate(length(max = 500))]
    pub description: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub initial_value: Option<f64>,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub status: GoalStatus,
}

/// Progress report for an existing goal.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalProgressInput {
    pub current_value: f64,
}

/// Goal with its computed progress.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalResponse {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress_percentage: f64,
}

impl From<Goal> for GoalResponse {
    fn from(goal: Goal) -> Self {
        Self {
            progress_percentage: goal.progress_percentage(),
            goal,
        }
    }
}

impl Goal {
    pub fn new(user_id: &str, input: GoalInput, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            goal_type: input.goal_type,
            description: input.description,
            target_value: input.target_value,
            current_value: input.current_value,
            initial_value: input.initial_value,
            deadline: input.deadline,
            status: input.status,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    pub fn apply(&mut self, input: GoalInput, now: &str) {
        self.goal_type = input.goal_type;
        self.description = input.description;
        self.target_value = input.target_value;
        self.current_value = input.current_value;
        self.initial_value = input.initial_value;
        self.deadline = input.deadline;
        self.status = input.status;
        self.updated_at = now.to_string();
    }

    /// Record a new running value. Status is left as the owner set it.
    pub fn record_progress(&mut self, current_value: f64, now: &str) {
        self.current_value = current_value;
        self.updated_at = now.to_string();
    }

    /// Progress toward the target, in [0, 100].
    pub fn progress_percentage(&self) -> f64 {
        goal_progress(self.target_value, self.current_value, self.initial_value)
    }
}

impl OwnedRecord for Goal {
    const COLLECTION: &'static str = collections::GOALS;

    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
