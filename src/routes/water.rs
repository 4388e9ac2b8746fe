// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Water intake routes.

use super::record_not_found;
use crate::error::{AppError, Result};
use crate::middleware::auth::{require_permission, AuthUser};
use crate::models::{Water, WaterInput};
use crate::permissions::Permission;
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
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    let require = |permission: Permission| from_fn_with_state(permission, require_permission);

    Router::new()
        .route(
            "/api/water",
            get(list_water)
                .post(create_water.layer(require(Permission::WaterCreate))),
        )
        .route(
            "/api/water/{id}",
            get(get_water)
                .put(update_water.layer(require(Permission::WaterEdit)))
                .delete(delete_water),
        )
}

async fn list_water(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Water>>> {
    user.require(Permission::WaterView)?;

    let mut entries: Vec<Water> = state.db.list(&user.user_id).await?;
    entries.sort_by(|a, b| b.logged_at.cmp(&a.logged_at));

    Ok(Json(entries))
}

async fn get_water(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Water>> {
    user.require(Permission::WaterView)?;

    let entry = state
        .db
        .get::<Water>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Water entry", id))?;
    Ok(Json(entry))
}

async fn create_water(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<WaterInput>, AppError>,
) -> Result<(StatusCode, Json<Water>)> {
    input.validate()?;

    let entry = Water::new(&user.user_id, input, Utc::now());
    state.db.create(&entry).await?;

    tracing::info!(
        user_id = %user.user_id,
        water_id = %entry.id,
        amount_ml = entry.amount_ml,
        "Water intake logged"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_water(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(input), _): WithRejection<Json<WaterInput>, AppError>,
) -> Result<Json<Water>> {
    input.validate()?;

    let mut entry = state
        .db
        .get::<Water>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Water entry", id))?;

    entry.apply(input, Utc::now());

    if !state.db.update(&user.user_id, &entry).await? {
        return Err(record_not_found("Water entry", id));
    }
    Ok(Json(entry))
}

async fn delete_water(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    user.require(Permission::WaterDelete)?;

    if !state.db.delete::<Water>(&user.user_id, id).await? {
        return Err(record_not_found("Water entry", id));
    }
    Ok(StatusCode::NO_CONTENT)
}
