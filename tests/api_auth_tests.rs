// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication, authorization and CORS tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use health_tracker::permissions::{Permission, Role};
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/activities")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::api_request(
            "GET",
            "/api/activities",
            "invalid.token.here",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let (app, _) = common::create_test_app();
    let token = common::create_test_jwt("user-1", b"some_other_key_that_is_32_bytes!");

    let response = app
        .oneshot(common::api_request("GET", "/api/activities", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(common::api_request("GET", "/api/activities", &token, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_session_cookie_accepted() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::COOKIE, format!("health_token={}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["user_id"], "user-1");
    assert_eq!(body["role"], "User");
}

#[tokio::test]
async fn test_admin_catalog_requires_permission() {
    let (app, state) = common::create_test_app();
    let key = &state.config.jwt_signing_key;

    let user_token = common::create_test_jwt("user-1", key);
    let response = app
        .clone()
        .oneshot(common::api_request(
            "GET",
            "/api/admin/permissions",
            &user_token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = common::read_json(response).await;
    assert_eq!(body["error"], "forbidden");

    let admin_token = common::create_test_jwt_with("admin-1", Role::Admin, &[], key);
    let response = app
        .oneshot(common::api_request(
            "GET",
            "/api/admin/permissions",
            &admin_token,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    let names: Vec<&str> = body["permissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names.len(), Permission::ALL.len());
    assert!(names.contains(&"Permissions.Goals.Edit"));
    assert_eq!(body["roles"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_explicit_permission_claim_grants_access() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt_with(
        "user-1",
        Role::User,
        &[Permission::AdminViewPermissions],
        &state.config.jwt_signing_key,
    );

    let response = app
        .oneshot(common::api_request(
            "GET",
            "/api/admin/permissions",
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/activities")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::read_json(response).await;
    assert_eq!(body["status"], "ok");
}
