// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Real-time notification hub.
//!
//! Each user has one broadcast group; every open client connection of that
//! user subscribes to it. Delivery is best-effort: nothing is persisted,
//! publishing to a user with no live connections is a no-op, and a slow
//! receiver that falls more than [`GROUP_CAPACITY`] notifications behind
//! skips the ones it missed.

use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Buffered notifications per user group.
pub const GROUP_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ActivityLogged,
    GoalCreated,
    GoalUpdated,
    GoalReached,
}

impl NotificationKind {
    /// SSE event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ActivityLogged => "activity_logged",
            NotificationKind::GoalCreated => "goal_created",
            NotificationKind::GoalUpdated => "goal_updated",
            NotificationKind::GoalReached => "goal_reached",
        }
    }
}

/// A message pushed to a user's connected clients.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    /// Record the notification is about
    pub record_id: Option<Uuid>,
    pub created_at: String,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        message: impl Into<String>,
        record_id: Option<Uuid>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            record_id,
            created_at: crate::time_utils::now_rfc3339(),
        }
    }
}

/// Per-user broadcast groups, shared across requests.
#[derive(Clone, Default)]
pub struct NotificationHub {
    groups: Arc<DashMap<String, broadcast::Sender<Notification>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the user's group.
    pub fn subscribe(&self, user_id: &str) -> broadcast::Receiver<Notification> {
        let receiver = self
            .groups
            .entry(user_id.to_string())
            .or_insert_with(|| broadcast::channel(GROUP_CAPACITY).0)
            .subscribe();

        tracing::debug!(user_id, "Notification subscriber connected");
        receiver
    }

    /// Open a long-lived connection for a user.
    ///
    /// Dropping the returned [`Connection`] leaves the group, removing it
    /// when no other connection of the user remains.
    pub fn connect(&self, user_id: &str) -> Connection {
        Connection {
            receiver: self.subscribe(user_id),
            departure: Departure {
                hub: self.clone(),
                user_id: user_id.to_string(),
            },
        }
    }

    /// Send a notification to every live connection of one user.
    ///
    /// Returns the number of connections it reached. A group whose
    /// connections have all gone away is dropped.
    pub fn publish(&self, user_id: &str, notification: Notification) -> usize {
        let kind = notification.kind;
        let delivered = match self.groups.get(user_id) {
            Some(sender) => sender.send(notification).unwrap_or(0),
            None => 0,
        };

        if delivered == 0 {
            self.prune(user_id);
        }

        tracing::debug!(
            user_id,
            kind = kind.as_str(),
            delivered,
            "Notification published"
        );
        delivered
    }

    /// Number of live connections for a user.
    pub fn connection_count(&self, user_id: &str) -> usize {
        self.groups
            .get(user_id)
            .map(|sender| sender.receiver_count())
            .unwrap_or(0)
    }

    /// Number of users with a group.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    fn prune(&self, user_id: &str) {
        self.groups
            .remove_if(user_id, |_, sender| sender.receiver_count() == 0);
    }
}

/// One open client connection in a user's group.
pub struct Connection {
    // Dropped before `departure` so the group sees this receiver gone.
    receiver: broadcast::Receiver<Notification>,
    departure: Departure,
}

impl Connection {
    pub fn user_id(&self) -> &str {
        &self.departure.user_id
    }

    /// Wait for the next notification.
    pub async fn recv(&mut self) -> Result<Notification, broadcast::error::RecvError> {
        self.receiver.recv().await
    }
}

struct Departure {
    hub: NotificationHub,
    user_id: String,
}

impl Drop for Departure {
    fn drop(&mut self) {
        self.hub.prune(&self.user_id);
        tracing::debug!(user_id = %self.user_id, "Notification subscriber disconnected");
    }
}
