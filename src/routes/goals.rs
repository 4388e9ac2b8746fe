// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal routes.
//!
//! Responses carry the computed `progress_percentage`; it is recomputed on
//! every read and never stored.

use super::record_not_found;
use crate::error::{AppError, Result};
use crate::middleware::auth::{require_permission, AuthUser};
use crate::models::{Goal, GoalInput, GoalProgressInput, GoalResponse};
use crate::permissions::Permission;
use crate::services::{Notification, NotificationKind};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::{get, patch},
    Extension, Json, Router,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    let require = |permission: Permission| from_fn_with_state(permission, require_permission);

    Router::new()
        .route(
            "/api/goals",
            get(list_goals)
                .post(create_goal.layer(require(Permission::GoalsCreate))),
        )
        .route(
            "/api/goals/{id}",
            get(get_goal)
                .put(update_goal.layer(require(Permission::GoalsEdit)))
                .delete(delete_goal),
        )
        .route(
            "/api/goals/{id}/progress",
            patch(update_goal_progress.layer(require(Permission::GoalsEdit))),
        )
}

fn check_finite(input: &GoalInput) -> Result<()> {
    let values = [Some(input.target_value), Some(input.current_value), input.initial_value];
    if values.iter().flatten().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(AppError::BadRequest("Goal values must be finite numbers".to_string()))
    }
}

/// List the caller's goals, latest deadline first.
async fn list_goals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<GoalResponse>>> {
    user.require(Permission::GoalsView)?;

    let mut goals: Vec<Goal> = state.db.list(&user.user_id).await?;
    goals.sort_by(|a, b| b.deadline.cmp(&a.deadline));

    Ok(Json(goals.into_iter().map(GoalResponse::from).collect()))
}

async fn get_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<GoalResponse>> {
    user.require(Permission::GoalsView)?;

    let goal = state
        .db
        .get::<Goal>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Goal", id))?;
    Ok(Json(goal.into()))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<GoalInput>, AppError>,
) -> Result<(StatusCode, Json<GoalResponse>)> {
    input.validate()?;
    check_finite(&input)?;

    let goal = Goal::new(&user.user_id, input, &now_rfc3339());
    state.db.create(&goal).await?;

    tracing::info!(
        user_id = %user.user_id,
        goal_id = %goal.id,
        goal_type = %goal.goal_type,
        deadline = %goal.deadline,
        "Goal created"
    );

    state.notifications.publish(
        &user.user_id,
        Notification::new(
            NotificationKind::GoalCreated,
            format!("New {} goal due {}", goal.goal_type, goal.deadline),
            Some(goal.id),
        ),
    );

    Ok((StatusCode::CREATED, Json(goal.into())))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(input), _): WithRejection<Json<GoalInput>, AppError>,
) -> Result<Json<GoalResponse>> {
    input.validate()?;
    check_finite(&input)?;

    let mut goal = state
        .db
        .get::<Goal>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Goal", id))?;

    goal.apply(input, &now_rfc3339());

    if !state.db.update(&user.user_id, &goal).await? {
        return Err(record_not_found("Goal", id));
    }

    tracing::info!(user_id = %user.user_id, goal_id = %id, status = ?goal.status, "Goal updated");

    state.notifications.publish(
        &user.user_id,
        Notification::new(
            NotificationKind::GoalUpdated,
            format!("{} goal updated", goal.goal_type),
            Some(goal.id),
        ),
    );

    Ok(Json(goal.into()))
}

/// Report a new current value for a goal.
///
/// Publishes a `goal_reached` notification when this report takes the goal
/// to 100%.
async fn update_goal_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(input), _): WithRejection<Json<GoalProgressInput>, AppError>,
) -> Result<Json<GoalResponse>> {
    if !input.current_value.is_finite() {
        return Err(AppError::BadRequest(
            "current_value must be a finite number".to_string(),
        ));
    }

    let mut goal = state
        .db
        .get::<Goal>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Goal", id))?;

    let before = goal.progress_percentage();
    goal.record_progress(input.current_value, &now_rfc3339());

    if !state.db.update(&user.user_id, &goal).await? {
        return Err(record_not_found("Goal", id));
    }

    let response = GoalResponse::from(goal);
    let reached = before < 100.0 && response.progress_percentage >= 100.0;

    tracing::info!(
        user_id = %user.user_id,
        goal_id = %id,
        progress = response.progress_percentage,
        reached,
        "Goal progress recorded"
    );

    let notification = if reached {
        Notification::new(
            NotificationKind::GoalReached,
            format!("{} goal reached!", response.goal.goal_type),
            Some(id),
        )
    } else {
        Notification::new(
            NotificationKind::GoalUpdated,
            format!(
                "{} goal at {:.0}%",
                response.goal.goal_type, response.progress_percentage
            ),
            Some(id),
        )
    };
    state.notifications.publish(&user.user_id, notification);

    Ok(Json(response))
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    user.require(Permission::GoalsDelete)?;

    if !state.db.delete::<Goal>(&user.user_id, id).await? {
        return Err(record_not_found("Goal", id));
    }

    tracing::info!(user_id = %user.user_id, goal_id = %id, "Goal deleted");
    Ok(StatusCode::NO_CONTENT)
}
