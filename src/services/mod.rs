// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calories;
pub mod dashboard;
pub mod notifications;
pub mod progress;

pub use calories::calories_burned;
pub use dashboard::{build_dashboard, Dashboard};
pub use notifications::{Connection, Notification, NotificationHub, NotificationKind};
pub use progress::goal_progress;
