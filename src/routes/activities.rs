// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity log routes.

use super::record_not_found;
use crate::error::{AppError, Result};
use crate::middleware::auth::{require_permission, AuthUser};
use crate::models::{Activity, ActivityInput};
use crate::permissions::Permission;
use crate::services::{Notification, NotificationKind};
use crate::time_utils::now_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, State},
    handler::Handler,
    http::StatusCode,
    middleware::from_fn_with_state,
    routing::get,
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
            "/api/activities",
            get(list_activities)
                .post(create_activity.layer(require(Permission::ActivitiesCreate))),
        )
        .route(
            "/api/activities/{id}",
            get(get_activity)
                .put(update_activity.layer(require(Permission::ActivitiesEdit)))
                .delete(delete_activity),
        )
}

/// List the caller's activities, most recent first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Activity>>> {
    user.require(Permission::ActivitiesView)?;

    let mut activities: Vec<Activity> = state.db.list(&user.user_id).await?;
    activities.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    tracing::debug!(user_id = %user.user_id, count = activities.len(), "Fetched activities");
    Ok(Json(activities))
}

async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Activity>> {
    user.require(Permission::ActivitiesView)?;

    let activity = state
        .db
        .get::<Activity>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Activity", id))?;
    Ok(Json(activity))
}

/// Log an activity. Calories burned are derived, not accepted from input.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<ActivityInput>, AppError>,
) -> Result<(StatusCode, Json<Activity>)> {
    input.validate()?;

    let activity = Activity::new(&user.user_id, input, &now_rfc3339());
    state.db.create(&activity).await?;

    tracing::info!(
        user_id = %user.user_id,
        activity_id = %activity.id,
        activity_type = %activity.activity_type,
        duration_minutes = activity.duration_minutes,
        calories_burned = activity.calories_burned,
        "Activity logged"
    );

    state.notifications.publish(
        &user.user_id,
        Notification::new(
            NotificationKind::ActivityLogged,
            format!(
                "Logged {} for {} min ({:.0} kcal)",
                activity.activity_type, activity.duration_minutes, activity.calories_burned
            ),
            Some(activity.id),
        ),
    );

    Ok((StatusCode::CREATED, Json(activity)))
}

async fn update_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(input), _): WithRejection<Json<ActivityInput>, AppError>,
) -> Result<Json<Activity>> {
    input.validate()?;

    let mut activity = state
        .db
        .get::<Activity>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Activity", id))?;

    activity.apply(input, &now_rfc3339());

    if !state.db.update(&user.user_id, &activity).await? {
        return Err(record_not_found("Activity", id));
    }

    tracing::info!(user_id = %user.user_id, activity_id = %id, "Activity updated");
    Ok(Json(activity))
}

async fn delete_activity(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    user.require(Permission::ActivitiesDelete)?;

    if !state.db.delete::<Activity>(&user.user_id, id).await? {
        return Err(record_not_found("Activity", id));
    }

    tracing::info!(user_id = %user.user_id, activity_id = %id, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}
