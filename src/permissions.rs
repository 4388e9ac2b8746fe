// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static permission catalog.
//!
//! Permissions are matched against session token claims: a caller holds a
//! permission when its role grants it or when the token lists the
//! permission string explicitly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
    ActivitiesView,
    ActivitiesCreate,
    ActivitiesEdit,
    ActivitiesDelete,
    NutritionView,
    NutritionCreate,
    NutritionEdit,
    NutritionDelete,
    GoalsView,
    GoalsCreate,
    GoalsEdit,
    GoalsDelete,
    SleepView,
    SleepCreate,
    SleepEdit,
    SleepDelete,
    WaterView,
    WaterCreate,
    WaterEdit,
    WaterDelete,
    DashboardView,
    NotificationsReceive,
    AdminViewPermissions,
}

impl Permission {
    /// Every permission, in catalog order.
    pub const ALL: [Permission; 23] = [
        Permission::ActivitiesView,
        Permission::ActivitiesCreate,
        Permission::ActivitiesEdit,
        Permission::ActivitiesDelete,
        Permission::NutritionView,
        Permission::NutritionCreate,
        Permission::NutritionEdit,
        Permission::NutritionDelete,
        Permission::GoalsView,
        Permission::GoalsCreate,
        Permission::GoalsEdit,
        Permission::GoalsDelete,
        Permission::SleepView,
        Permission::SleepCreate,
        Permission::SleepEdit,
        Permission::SleepDelete,
        Permission::WaterView,
        Permission::WaterCreate,
        Permission::WaterEdit,
        Permission::WaterDelete,
        Permission::DashboardView,
        Permission::NotificationsReceive,
        Permission::AdminViewPermissions,
    ];

    /// Claim string, e.g. `Permissions.Activities.View`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ActivitiesView => "Permissions.Activities.View",
            Permission::ActivitiesCreate => "Permissions.Activities.Create",
            Permission::ActivitiesEdit => "Permissions.Activities.Edit",
            Permission::ActivitiesDelete => "Permissions.Activities.Delete",
            Permission::NutritionView => "Permissions.Nutrition.View",
            Permission::NutritionCreate => "Permissions.Nutrition.Create",
            Permission::NutritionEdit => "Permissions.Nutrition.Edit",
            Permission::NutritionDelete => "Permissions.Nutrition.Delete",
            Permission::GoalsView => "Permissions.Goals.View",
            Permission::GoalsCreate => "Permissions.Goals.Create",
            Permission::GoalsEdit => "Permissions.Goals.Edit",
            Permission::GoalsDelete => "Permissions.Goals.Delete",
            Permission::SleepView => "Permissions.Sleep.View",
            Permission::SleepCreate => "Permissions.Sleep.Create",
            Permission::SleepEdit => "Permissions.Sleep.Edit",
            Permission::SleepDelete => "Permissions.Sleep.Delete",
            Permission::WaterView => "Permissions.Water.View",
            Permission::WaterCreate => "Permissions.Water.Create",
            Permission::WaterEdit => "Permissions.Water.Edit",
            Permission::WaterDelete => "Permissions.Water.Delete",
            Permission::DashboardView => "Permissions.Dashboard.View",
            Permission::NotificationsReceive => "Permissions.Notifications.Receive",
            Permission::AdminViewPermissions => "Permissions.Admin.ViewPermissions",
        }
    }

    /// Area the permission belongs to (`Activities`, `Goals`, ...).
    pub fn group(&self) -> &'static str {
        self.as_str().split('.').nth(1).unwrap_or_default()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Role carried in the session token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    /// Default permissions granted by the role (used for role seeding).
    pub fn permissions(&self) -> BTreeSet<Permission> {
        match self {
            Role::Admin => Permission::ALL.into_iter().collect(),
            Role::User => Permission::ALL
                .into_iter()
                .filter(|p| *p != Permission::AdminViewPermissions)
                .collect(),
        }
    }
}

/// Effective permissions of an authenticated caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// Combine the role's grants with explicit permission claims.
    /// Claim strings not in the catalog are ignored.
    pub fn from_claims(role: Role, claims: &[String]) -> Self {
        let mut granted = role.permissions();
        for claim in claims {
            match claim.parse::<Permission>() {
                Ok(permission) => {
                    granted.insert(permission);
                }
                Err(err) => tracing::debug!(error = %err, "Ignoring permission claim"),
            }
        }
        Self(granted)
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

/// Catalog entry for API responses.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PermissionInfo {
    pub name: String,
    pub group: String,
}

impl From<Permission> for PermissionInfo {
    fn from(permission: Permission) -> Self {
        Self {
            name: permission.as_str().to_string(),
            group: permission.group().to_string(),
        }
    }
}
