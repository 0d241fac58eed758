//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Permission;

/// Staff category. Each staff user holds exactly one role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    Manager,
    Technician,
    Sales,
    Receptionist,
}

impl Role {
    /// Every role, in declaration order
    pub const fn all() -> &'static [Role] {
        &[
            Role::Admin,
            Role::Manager,
            Role::Technician,
            Role::Sales,
            Role::Receptionist,
        ]
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Technician => "technician",
            Role::Sales => "sales",
            Role::Receptionist => "receptionist",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Manager => "Store manager",
            Role::Technician => "Workshop technician",
            Role::Sales => "Sales associate",
            Role::Receptionist => "Receptionist",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::all()
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A role together with the permissions it grants (role-description panel)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleDescription {
    pub role: Role,
    pub display_name: String,
    pub permissions: Vec<Permission>,
}
