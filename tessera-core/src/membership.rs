//! Tenant membership record.
//!
//! A membership grants one user access to one tenant with a role. The
//! `(user_id, tenant_id)` pair is unique: a user joins a tenant at most
//! once but may belong to any number of distinct tenants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// The (user, tenant, role) relationship record.
///
/// Users are owned by an external identity system; only their id
/// appears here. The membership itself is owned by the store and
/// cascades away when its tenant is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// Externally-owned user identity.
    pub user_id: Uuid,
    /// The tenant this membership grants access to.
    pub tenant_id: Uuid,
    /// Role within the tenant.
    pub role: Role,
    /// When the user joined. Immutable after creation.
    pub date_joined: DateTime<Utc>,
}

impl Membership {
    /// Create a membership joined now.
    pub fn new(user_id: Uuid, tenant_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            tenant_id,
            role,
            date_joined: Utc::now(),
        }
    }

    /// Whether this membership grants at least the privilege of `minimum`.
    ///
    /// Roles rank `Owner > Admin > Member > Viewer`.
    pub fn has_role(&self, minimum: Role) -> bool {
        self.role.satisfies(minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_role() {
        let user = Uuid::new_v4();
        let tenant = Uuid::new_v4();

        let admin = Membership::new(user, tenant, Role::Admin);
        assert!(admin.has_role(Role::Member));
        assert!(admin.has_role(Role::Admin));
        assert!(!admin.has_role(Role::Owner));

        let viewer = Membership::new(user, tenant, Role::Viewer);
        assert!(!viewer.has_role(Role::Admin));
        assert!(viewer.has_role(Role::Viewer));
    }

    #[test]
    fn test_default_role_is_member() {
        let membership = Membership::new(Uuid::new_v4(), Uuid::new_v4(), Role::default());
        assert_eq!(membership.role, Role::Member);
    }
}
