// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goal API tests: computed progress, progress reports and notifications.

use axum::http::StatusCode;
use futures_util::StreamExt;
use health_tracker::services::NotificationKind;
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

mod common;
use common::send;

fn goal(target: f64, current: f64, initial: Option<f64>, deadline: &str) -> Option<Value> {
    Some(json!({
        "goal_type": "Weight",
        "description": "Lose weight",
        "target_value": target,
        "current_value": current,
        "initial_value": initial,
        "deadline": deadline
    }))
}

fn report(current_value: f64) -> Option<Value> {
    Some(json!({ "current_value": current_value }))
}

#[tokio::test]
async fn test_goal_progress_in_responses() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let body = goal(70.0, 75.0, Some(80.0), "2024-12-31");
    let (status, created) = send(&app, "POST", "/api/goals", &token, body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["progress_percentage"], 50.0);
    assert_eq!(created["status"], "InProgress");

    let (_, created) = send(
        &app,
        "POST",
        "/api/goals",
        &token,
        Some(json!({
            "goal_type": "Distance",
            "target_value": 100.0,
            "current_value": 25.0,
            "deadline": "2024-06-30"
        })),
    )
    .await;
    assert_eq!(created["progress_percentage"], 25.0);

    let body = goal(0.0, 10.0, None, "2024-01-31");
    let (_, created) = send(&app, "POST", "/api/goals", &token, body).await;
    assert_eq!(created["progress_percentage"], 0.0);

    // Latest deadline first
    let (_, list) = send(&app, "GET", "/api/goals", &token, None).await;
    let deadlines: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["deadline"].as_str().unwrap())
        .collect();
    assert_eq!(deadlines, vec!["2024-12-31", "2024-06-30", "2024-01-31"]);
}

#[tokio::test]
async fn test_goal_progress_report_and_status() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let body = goal(70.0, 78.0, Some(80.0), "2024-12-31");
    let (_, created) = send(&app, "POST", "/api/goals", &token, body).await;
    let goal_uri = format!("/api/goals/{}", created["id"].as_str().unwrap());
    let progress_uri = format!("{}/progress", goal_uri);

    let (status, updated) = send(&app, "PATCH", &progress_uri, &token, report(72.5)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["current_value"], 72.5);
    assert_eq!(updated["progress_percentage"], 75.0);

    // Overshooting a decreasing goal still counts as done.
    let (_, updated) = send(&app, "PATCH", &progress_uri, &token, report(68.0)).await;
    assert_eq!(updated["progress_percentage"], 100.0);
    assert_eq!(updated["status"], "InProgress");

    // Status only changes when the owner sets it.
    let mut body = goal(70.0, 68.0, Some(80.0), "2024-12-31").unwrap();
    body["status"] = json!("Completed");
    let (status, updated) = send(&app, "PUT", &goal_uri, &token, Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Completed");
}

#[tokio::test]
async fn test_goal_reached_notification() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let body = goal(100.0, 40.0, None, "2024-12-31");
    let (_, created) = send(&app, "POST", "/api/goals", &token, body).await;
    let progress_uri = format!("/api/goals/{}/progress", created["id"].as_str().unwrap());

    let mut receiver = state.notifications.subscribe("user-1");
    let mut other = state.notifications.subscribe("user-2");

    send(&app, "PATCH", &progress_uri, &token, report(60.0)).await;
    send(&app, "PATCH", &progress_uri, &token, report(100.0)).await;
    // Already reached; reported again only as an update.
    send(&app, "PATCH", &progress_uri, &token, report(100.0)).await;

    let kinds: Vec<NotificationKind> = (0..3)
        .map(|_| receiver.try_recv().unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            NotificationKind::GoalUpdated,
            NotificationKind::GoalReached,
            NotificationKind::GoalUpdated,
        ]
    );
    assert!(receiver.try_recv().is_err());
    assert!(other.try_recv().is_err());
}

#[tokio::test]
async fn test_malformed_progress_report_is_bad_request() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let body = goal(100.0, 40.0, None, "2024-12-31");
    let (_, created) = send(&app, "POST", "/api/goals", &token, body).await;
    let progress_uri = format!("/api/goals/{}/progress", created["id"].as_str().unwrap());

    // JSON cannot carry NaN; a missing or mistyped value is rejected too.
    let (status, body) = send(&app, "PATCH", &progress_uri, &token, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(body["details"].as_str().unwrap().contains("current_value"));

    let mistyped = Some(json!({ "current_value": "ninety" }));
    let (status, body) = send(&app, "PATCH", &progress_uri, &token, mistyped).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_notification_stream_delivers_activity() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    let stream_request = common::api_request("GET", "/api/notifications/stream", &token, None);
    let response = app.clone().oneshot(stream_request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/event-stream"
    );
    assert_eq!(state.notifications.connection_count("user-1"), 1);

    let activity = Some(json!({
        "activity_type": "Hiking",
        "duration_minutes": 90,
        "date": "2024-03-01"
    }));
    let (status, _) = send(&app, "POST", "/api/activities", &token, activity).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut body = response.into_body().into_data_stream();
    let frame = tokio::time::timeout(Duration::from_secs(5), body.next())
        .await
        .expect("No notification within timeout")
        .expect("Stream ended")
        .expect("Stream error");
    let text = String::from_utf8(frame.to_vec()).unwrap();

    assert!(text.contains("event: activity_logged"), "{}", text);
    assert!(text.contains("\"kind\":\"activity_logged\""), "{}", text);
}

#[tokio::test]
async fn test_notification_stream_disconnect_leaves_group() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user-1", &state.config.jwt_signing_key);

    for _ in 0..10 {
        let stream_request = common::api_request("GET", "/api/notifications/stream", &token, None);
        let response = app.clone().oneshot(stream_request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.notifications.group_count(), 1);

        // Client goes away without any notification being published.
        drop(response);
        assert_eq!(state.notifications.connection_count("user-1"), 0);
        assert_eq!(state.notifications.group_count(), 0);
    }
}
