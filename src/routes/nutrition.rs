// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutrition (food log) routes.

use super::record_not_found;
use crate::error::{AppError, Result};
use crate::middleware::auth::{require_permission, AuthUser};
use crate::models::{Nutrition, NutritionInput};
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
            "/api/nutrition",
            get(list_nutrition)
                .post(create_nutrition.layer(require(Permission::NutritionCreate))),
        )
        .route(
            "/api/nutrition/{id}",
            get(get_nutrition)
                .put(update_nutrition.layer(require(Permission::NutritionEdit)))
                .delete(delete_nutrition),
        )
}

/// List the caller's food entries, most recent meal first.
async fn list_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Nutrition>>> {
    user.require(Permission::NutritionView)?;

    let mut entries: Vec<Nutrition> = state.db.list(&user.user_id).await?;
    entries.sort_by(|a, b| (b.date, b.time_of_day).cmp(&(a.date, a.time_of_day)));

    Ok(Json(entries))
}

async fn get_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Nutrition>> {
    user.require(Permission::NutritionView)?;

    let entry = state
        .db
        .get::<Nutrition>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Nutrition entry", id))?;
    Ok(Json(entry))
}

async fn create_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(input), _): WithRejection<Json<NutritionInput>, AppError>,
) -> Result<(StatusCode, Json<Nutrition>)> {
    input.validate()?;

    let entry = Nutrition::new(&user.user_id, input, &now_rfc3339());
    state.db.create(&entry).await?;

    tracing::info!(
        user_id = %user.user_id,
        nutrition_id = %entry.id,
        calories = entry.calories,
        meal_type = ?entry.meal_type,
        "Nutrition entry logged"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    WithRejection(Json(input), _): WithRejection<Json<NutritionInput>, AppError>,
) -> Result<Json<Nutrition>> {
    input.validate()?;

    let mut entry = state
        .db
        .get::<Nutrition>(&user.user_id, id)
        .await?
        .ok_or_else(|| record_not_found("Nutrition entry", id))?;

    entry.apply(input, &now_rfc3339());

    if !state.db.update(&user.user_id, &entry).await? {
        return Err(record_not_found("Nutrition entry", id));
    }
    Ok(Json(entry))
}

async fn delete_nutrition(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    user.require(Permission::NutritionDelete)?;

    if !state.db.delete::<Nutrition>(&user.user_id, id).await? {
        return Err(record_not_found("Nutrition entry", id));
    }

    tracing::info!(user_id = %user.user_id, nutrition_id = %id, "Nutrition entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
