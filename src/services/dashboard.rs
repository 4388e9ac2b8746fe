// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user dashboard aggregation.
//!
//! Computed from the user's records on every request; nothing is cached or
//! written back.

use crate::models::{Activity, Goal, GoalResponse, GoalStatus, Nutrition, Sleep, Water};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Dashboard summary for one user.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Dashboard {
    // ─── Energy ──────────────────────────────────────────────────
    pub total_calories_burned: f64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_calories_consumed: u64,
    /// Consumed minus burned
    pub net_calories: f64,
    pub activity_count: u32,

    // ─── Wellness ────────────────────────────────────────────────
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_water_ml: u64,
    /// Mean hours per sleep record; absent when nothing is logged
    pub average_sleep_hours: Option<f64>,

    // ─── Goals ───────────────────────────────────────────────────
    pub active_goal_count: u32,
    /// Goals with computed progress, latest deadline first
    pub goals: Vec<GoalResponse>,
}

/// Aggregate one user's records into a dashboard.
pub fn build_dashboard(
    activities: &[Activity],
    nutrition: &[Nutrition],
    goals: Vec<Goal>,
    sleep: &[Sleep],
    water: &[Water],
) -> Dashboard {
    let total_calories_burned: f64 = activities.iter().map(|a| a.calories_burned).sum();
    let total_calories_consumed: u64 = nutrition.iter().map(|n| u64::from(n.calories)).sum();
    let total_water_ml: u64 = water.iter().map(|w| u64::from(w.amount_ml)).sum();

    let average_sleep_hours = if sleep.is_empty() {
        None
    } else {
        let total: f64 = sleep.iter().map(Sleep::duration_hours).sum();
        Some(total / sleep.len() as f64)
    };

    let active_goal_count = goals
        .iter()
        .filter(|g| g.status == GoalStatus::InProgress)
        .count() as u32;

    let mut goals: Vec<GoalResponse> = goals.into_iter().map(GoalResponse::from).collect();
    goals.sort_by(|a, b| b.goal.deadline.cmp(&a.goal.deadline));

    Dashboard {
        total_calories_burned,
        total_calories_consumed,
        net_calories: total_calories_consumed as f64 - total_calories_burned,
        activity_count: activities.len() as u32,
        total_water_ml,
        average_sleep_hours,
        active_goal_count,
        goals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityInput, GoalInput, MealType, NutritionInput, SleepInput, WaterInput};
    use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};

    fn make_activity(activity_type: &str, duration_minutes: u32) -> Activity {
        Activity::new(
            "user-1",
            ActivityInput {
                activity_type: activity_type.to_string(),
                duration_minutes,
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                distance_km: None,
                heart_rate: None,
                notes: None,
            },
            "now",
        )
    }

    fn make_meal(calories: u32) -> Nutrition {
        Nutrition::new(
            "user-1",
            NutritionInput {
                food_name: "Meal".to_string(),
                calories,
                meal_type: MealType::Lunch,
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                time_of_day: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                protein_g: None,
                carbs_g: None,
                fat_g: None,
            },
            "now",
        )
    }

    fn make_goal(deadline: (i32, u32, u32), target: f64, current: f64, status: GoalStatus) -> Goal {
        Goal::new(
            "user-1",
            GoalInput {
                goal_type: "Distance".to_string(),
                description: None,
                target_value: target,
                current_value: current,
                initial_value: None,
                deadline: NaiveDate::from_ymd_opt(deadline.0, deadline.1, deadline.2).unwrap(),
                status,
            },
            "now",
        )
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = build_dashboard(&[], &[], vec![], &[], &[]);

        assert_eq!(dashboard.total_calories_burned, 0.0);
        assert_eq!(dashboard.total_calories_consumed, 0);
        assert_eq!(dashboard.activity_count, 0);
        assert_eq!(dashboard.average_sleep_hours, None);
        assert!(dashboard.goals.is_empty());
    }

    #[test]
    fn test_calorie_totals() {
        let activities = vec![make_activity("Running", 30), make_activity("Pilates", 20)];
        let meals = vec![make_meal(600), make_meal(250)];

        let dashboard = build_dashboard(&activities, &meals, vec![], &[], &[]);

        assert_eq!(dashboard.total_calories_burned, 400.0);
        assert_eq!(dashboard.total_calories_consumed, 850);
        assert_eq!(dashboard.net_calories, 450.0);
        assert_eq!(dashboard.activity_count, 2);
    }

    #[test]
    fn test_goals_ordered_by_deadline_descending() {
        let goals = vec![
            make_goal((2024, 3, 1), 100.0, 10.0, GoalStatus::InProgress),
            make_goal((2024, 12, 31), 100.0, 50.0, GoalStatus::Completed),
            make_goal((2024, 6, 15), 100.0, 75.0, GoalStatus::InProgress),
        ];

        let dashboard = build_dashboard(&[], &[], goals, &[], &[]);

        let deadlines: Vec<String> = dashboard
            .goals
            .iter()
            .map(|g| g.goal.deadline.to_string())
            .collect();
        assert_eq!(deadlines, vec!["2024-12-31", "2024-06-15", "2024-03-01"]);

        let progress: Vec<f64> = dashboard.goals.iter().map(|g| g.progress_percentage).collect();
        assert_eq!(progress, vec![50.0, 75.0, 10.0]);
        assert_eq!(dashboard.active_goal_count, 2);
    }

    #[test]
    fn test_water_and_sleep() {
        let water = vec![
            Water::new(
                "user-1",
                WaterInput {
                    amount_ml: 500,
                    logged_at: None,
                },
                Utc::now(),
            ),
            Water::new(
                "user-1",
                WaterInput {
                    amount_ml: 250,
                    logged_at: None,
                },
                Utc::now(),
            ),
        ];
        let sleep = vec![
            Sleep::new(
                "user-1",
                SleepInput {
                    sleep_start: Utc.with_ymd_and_hms(2024, 1, 14, 23, 0, 0).unwrap(),
                    sleep_end: Utc.with_ymd_and_hms(2024, 1, 15, 7, 0, 0).unwrap(),
                    quality: 4,
                    notes: None,
                },
                "now",
            ),
            Sleep::new(
                "user-1",
                SleepInput {
                    sleep_start: Utc.with_ymd_and_hms(2024, 1, 15, 23, 0, 0).unwrap(),
                    sleep_end: Utc.with_ymd_and_hms(2024, 1, 16, 5, 0, 0).unwrap(),
                    quality: 2,
                    notes: None,
                },
                "now",
            ),
        ];

        let dashboard = build_dashboard(&[], &[], vec![], &sleep, &water);

        assert_eq!(dashboard.total_water_ml, 750);
        assert_eq!(dashboard.average_sleep_hours, Some(7.0));
    }
}
