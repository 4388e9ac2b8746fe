// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health Tracker: personal fitness and wellness logging API
//!
//! This crate provides the backend API for logging activities, nutrition,
//! sleep, water intake and goals, and for deriving calories burned, goal
//! progress and a per-user dashboard from those records.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod permissions;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::NotificationHub;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub notifications: NotificationHub,
}
