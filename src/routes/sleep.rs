// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sleep log routes.

use super::record_not_found;
use crate::error::{AppError, Result};
use crate::middleware::auth::{require_permission, AuthUser};
use crate::models::{Sleep, SleepInput, SleepResponse};
use crate::permissions::Permission;
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
            "/api/sleep",
            get(list_sleep)
                .post(create_sleep.layer(require(Permission::SleepCreate))),
        )
        .route(
            "/api/sleep/{id}",
            get(get_sleep)
                .put(update_sleep.layer(require(Permission::SleepEdit)))
                .delete(delete_sleep),
        )
}

async fn list_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<SleepResponse>>> {
    user.require(Permission::SleepView)?;

    let mut nights: Vec<Sleep> = state.db.list(&user.user_id).await?;
    nights.sort_by(|a, b| b.sleep_start.cmp(&a.sleep_start));

    Ok(Json(nights.into_iter().map(SleepResponse::from).collect()))
}

async fn get_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<SleepResponse>> {
    user.require(Permission::SleepView)?;

    let sleep = state
        .db
        .get::<Sleep>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Sleep record", id))?;
    Ok(Json(sleep.into()))
}

async fn create_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<SleepInput>, AppError>,
) -> Result<(StatusCode, Json<SleepResponse>)> {
    input.validate()?;

    let sleep = Sleep::new(&user.user_id, input, &now_rfc3339());
    state.db.create(&sleep).await?;

    tracing::info!(
        user_id = %user.user_id,
        sleep_id = %sleep.id,
        hours = sleep.duration_hours(),
        "Sleep logged"
    );
    Ok((StatusCode::CREATED, Json(sleep.into())))
}

async fn update_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(input), _): WithRejection<Json<SleepInput>, AppError>,
) -> Result<Json<SleepResponse>> {
    input.validate()?;

    let mut sleep = state
        .db
        .get::<Sleep>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Sleep record", id))?;

    sleep.apply(input, &now_rfc3339());

    if !state.db.update(&user.user_id, &sleep).await? {
        return Err(record_not_found("Sleep record", id));
    }
    Ok(Json(sleep.into()))
}

async fn delete_sleep(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    user.require(Permission::SleepDelete)?;

    if !state.db.delete::<Sleep>(&user.user_id, id).await? {
        return Err(record_not_found("Sleep record", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
