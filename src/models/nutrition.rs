// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Nutrition (food log) model for storage and API.

use crate::db::{collections, OwnedRecord};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

/// Meal a food entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// Stored nutrition record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Nutrition {
    pub id: Uuid,
    pub user_id: String,
    pub food_name: String,
    pub calories: u32,
    pub meal_type: MealType,
    pub date: NaiveDate,
    pub time_of_day: NaiveTime,
    pub protein_g: Option<f64>,
    pub carbs_g: Option<f64>,
    pub fat_g: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Client-supplied nutrition fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NutritionInput {
    #[validate(length(min = 1, max = 100))]
    pub food_name: String,
    #[validate(range(max = 10000))]
    pub calories: u32,
    pub meal_type: MealType,
    pub date: NaiveDate,
    pub time_of_day: NaiveTime,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub protein_g: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub carbs_g: Option<f64>,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub fat_g: Option<f64>,
}

impl Nutrition {
    pub fn new(user_id: &str, input: NutritionInput, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            food_name: input.food_name,
            calories: input.calories,
            meal_type: input.meal_type,
            date: input.date,
            time_of_day: input.time_of_day,
            protein_g: input.protein_g,
            carbs_g: input.carbs_g,
            fat_g: input.fat_g,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    pub fn apply(&mut self, input: NutritionInput, now: &str) {
        self.food_name = input.food_name;
        self.calories = input.calories;
        self.meal_type = input.meal_type;
        self.date = input.date;
        self.time_of_day = input.time_of_day;
        self.protein_g = input.protein_g;
        self.carbs_g = input.carbs_g;
        self.fat_g = input.fat_g;
        self.updated_at = now.to_string();
    }
}

impl OwnedRecord for Nutrition {
    const COLLECTION: &'static str = collections::NUTRITION;

    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }
}
