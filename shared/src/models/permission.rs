//! Permission Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability tag checked by the admin route guards
///
/// Serialized in kebab-case (`"manage-repairs"`). The set is closed:
/// adding a variant forces every exhaustive `match` over it to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    ViewOrders,
    ManageOrders,
    ViewRepairs,
    ManageRepairs,
    AssignRepairs,
    ViewUsers,
    ManageUsers,
    ViewContent,
    ManageContent,
    ViewReports,
    ManageSettings,
    /// Catalog, supplier and stock mutations
    ManageInventory,
}

impl Permission {
    /// Every permission, in declaration order
    pub const fn all() -> &'static [Permission] {
        &[
            Permission::ViewOrders,
            Permission::ManageOrders,
            Permission::ViewRepairs,
            Permission::ManageRepairs,
            Permission::AssignRepairs,
            Permission::ViewUsers,
            Permission::ManageUsers,
            Permission::ViewContent,
            Permission::ManageContent,
            Permission::ViewReports,
            Permission::ManageSettings,
            Permission::ManageInventory,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewOrders => "view-orders",
            Permission::ManageOrders => "manage-orders",
            Permission::ViewRepairs => "view-repairs",
            Permission::ManageRepairs => "manage-repairs",
            Permission::AssignRepairs => "assign-repairs",
            Permission::ViewUsers => "view-users",
            Permission::ManageUsers => "manage-users",
            Permission::ViewContent => "view-content",
            Permission::ManageContent => "manage-content",
            Permission::ViewReports => "view-reports",
            Permission::ManageSettings => "manage-settings",
            Permission::ManageInventory => "manage-inventory",
        }
    }

    /// Short human description for role panels
    pub const fn description(&self) -> &'static str {
        match self {
            Permission::ViewOrders => "View customer orders",
            Permission::ManageOrders => "Change order status and cancel orders",
            Permission::ViewRepairs => "View repair and fitting appointments",
            Permission::ManageRepairs => "Update repair progress, notes and costs",
            Permission::AssignRepairs => "Assign appointments to technicians",
            Permission::ViewUsers => "View staff users and roles",
            Permission::ManageUsers => "Create, edit and remove staff users",
            Permission::ViewContent => "View articles and events, including drafts",
            Permission::ManageContent => "Publish articles, announcements and events",
            Permission::ViewReports => "View sales and service reports",
            Permission::ManageSettings => "Edit store settings and loyalty coupons",
            Permission::ManageInventory => "Manage products, categories, brands, suppliers and stock",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown permission tag
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}
