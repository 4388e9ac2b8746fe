// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.
//!
//! Each record kind has a stored record type (owned by exactly one user via
//! its `user_id` field) and an input type that carries the client-supplied
//! fields and their validation rules.

pub mod activity;
pub mod goal;
pub mod nutrition;
pub mod sleep;
pub mod water;

pub use activity::{Activity, ActivityInput};
pub use goal::{Goal, GoalInput, GoalProgressInput, GoalResponse, GoalStatus};
pub use nutrition::{MealType, Nutrition, NutritionInput};
pub use sleep::{Sleep, SleepInput, SleepResponse};
pub use water::{Water, WaterInput};
