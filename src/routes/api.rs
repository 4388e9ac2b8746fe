// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users that span record kinds.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Activity, Goal, Nutrition, Sleep, Water};
use crate::permissions::{Permission, PermissionInfo, Role};
use crate::services::{build_dashboard, Connection, Dashboard};
use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Extension, Json, Router,
};
use futures_util::stream::{self, Stream};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/notifications/stream", get(notification_stream))
        .route("/api/admin/permissions", get(list_permissions))
}

// ─── Session ─────────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MeResponse {
    pub user_id: String,
    pub role: Role,
    pub permissions: Vec<String>,
}

/// Identity and effective permissions of the caller.
async fn get_me(Extension(user): Extension<AuthUser>) -> Json<MeResponse> {
    Json(MeResponse {
        permissions: user
            .permissions
            .iter()
            .map(|p| p.as_str().to_string())
            .collect(),
        user_id: user.user_id,
        role: user.role,
    })
}

// ─── Dashboard ───────────────────────────────────────────────

/// Aggregate every record the caller owns into the dashboard summary.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Dashboard>> {
    user.require(Permission::DashboardView)?;

    let user_id = user.user_id.as_str();
    let (activities, nutrition, goals, sleep, water) = tokio::try_join!(
        state.db.list::<Activity>(user_id),
        state.db.list::<Nutrition>(user_id),
        state.db.list::<Goal>(user_id),
        state.db.list::<Sleep>(user_id),
        state.db.list::<Water>(user_id),
    )?;

    let dashboard = build_dashboard(&activities, &nutrition, goals, &sleep, &water);

    tracing::debug!(
        user_id,
        activity_count = dashboard.activity_count,
        goals = dashboard.goals.len(),
        "Built dashboard"
    );
    Ok(Json(dashboard))
}

// ─── Notifications ───────────────────────────────────────────

/// Server-Sent Events stream of the caller's notifications.
///
/// Browsers' `EventSource` cannot set headers, so clients authenticate
/// with the session cookie here.
async fn notification_stream(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, axum::Error>>>> {
    user.require(Permission::NotificationsReceive)?;

    let connection = state.notifications.connect(&user.user_id);
    tracing::info!(user_id = %user.user_id, "Notification stream opened");

    Ok(Sse::new(notification_events(connection)).keep_alive(KeepAlive::default()))
}

/// Events for one connection. The connection leaves its group when the
/// client disconnects and the stream is dropped.
fn notification_events(
    connection: Connection,
) -> impl Stream<Item = std::result::Result<Event, axum::Error>> {
    stream::unfold(connection, |mut connection| async move {
        loop {
            match connection.recv().await {
                Ok(notification) => {
                    let event = Event::default()
                        .event(notification.kind.as_str())
                        .json_data(&notification);
                    return Some((event, connection));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(
                        user_id = connection.user_id(),
                        skipped,
                        "Notification stream lagged"
                    );
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
}

// ─── Admin ───────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RolePermissions {
    pub role: Role,
    pub permissions: Vec<String>,
}

/// Permission catalog response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PermissionsResponse {
    pub permissions: Vec<PermissionInfo>,
    /// Default grants per role, for seeding the identity provider
    pub roles: Vec<RolePermissions>,
}

/// List every valid permission string and the role defaults.
async fn list_permissions(
    Extension(user): Extension<AuthUser>,
) -> Result<Json<PermissionsResponse>> {
    user.require(Permission::AdminViewPermissions)?;

    let permissions = Permission::ALL.into_iter().map(PermissionInfo::from).collect();
    let roles = Role::ALL
        .into_iter()
        .map(|role| RolePermissions {
            role,
            permissions: role
                .permissions()
                .into_iter()
                .map(|p| p.as_str().to_string())
                .collect(),
        })
        .collect();

    Ok(Json(PermissionsResponse { permissions, roles }))
}
