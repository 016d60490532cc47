//! Membership roles.
//!
//! Roles form a closed set with a fixed total order:
//! `Owner > Admin > Member > Viewer`. Every access-control decision in
//! Tessera reduces to comparing a membership's role against a minimum
//! under this order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TenancyError;

/// Role a user holds within a tenant.
///
/// Variants are declared in ascending order of privilege so the derived
/// `Ord` implements the documented ranking directly:
///
/// ```
/// use tessera_core::Role;
///
/// assert!(Role::Owner > Role::Admin);
/// assert!(Role::Admin > Role::Member);
/// assert!(Role::Member > Role::Viewer);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-only access.
    Viewer,
    /// Regular member. The default for new memberships.
    #[default]
    Member,
    /// Can manage memberships and tenant settings.
    Admin,
    /// Full control, including tenant deletion.
    Owner,
}

impl Role {
    /// All roles, lowest privilege first.
    pub const ALL: [Role; 4] = [Role::Viewer, Role::Member, Role::Admin, Role::Owner];

    /// Whether this role grants at least the privilege of `minimum`.
    pub fn satisfies(&self, minimum: Role) -> bool {
        *self >= minimum
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Viewer => write!(f, "viewer"),
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
            Self::Owner => write!(f, "owner"),
        }
    }
}

impl FromStr for Role {
    type Err = TenancyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "viewer" => Ok(Self::Viewer),
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            other => Err(TenancyError::Validation(format!("Unknown role: {}", other))),
        }
    }
}
