//! Membership Store
//!
//! Invariant-enforcing storage for tenants and memberships. The store
//! guarantees:
//!
//! - Tenant `name` and `slug` are each unique across all tenants
//! - The `(user_id, tenant_id)` membership pair is unique
//! - Deleting a tenant removes all of its memberships in the same
//!   operation
//!
//! Every operation is a single atomic transaction: a concurrent reader
//! never observes a partially-applied mutation. Hosts back the trait
//! with their own database; [`InMemoryMembershipStore`] is the
//! reference implementation and doubles as a test store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use tessera_core::{Membership, Role, TenancyError, Tenant, validate_name, validate_slug};

/// Membership store trait (implement with your database).
///
/// All mutating operations persist synchronously before returning.
/// `user_id` is never validated against a user table; users are owned
/// by an external identity system.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Create a tenant.
    ///
    /// Fails with [`TenancyError::Validation`] on a malformed name or
    /// slug, and with [`TenancyError::Conflict`] if either is already
    /// taken.
    async fn create_tenant(&self, name: &str, slug: &str) -> Result<Tenant, TenancyError>;

    /// Rename a tenant, replacing its name and slug.
    ///
    /// Same validation and uniqueness rules as [`create_tenant`],
    /// except the tenant's own current values do not conflict.
    /// `id` and `created_at` are unchanged.
    ///
    /// [`create_tenant`]: MembershipStore::create_tenant
    async fn rename_tenant(
        &self,
        tenant_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<Tenant, TenancyError>;

    /// Find a tenant by id.
    async fn get_tenant(&self, tenant_id: Uuid) -> Result<Option<Tenant>, TenancyError>;

    /// Find a tenant by slug.
    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>, TenancyError>;

    /// List all tenants, newest first.
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenancyError>;

    /// Delete a tenant and cascade to all of its memberships.
    ///
    /// Fails with [`TenancyError::NotFound`] if the tenant does not
    /// exist.
    async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), TenancyError>;

    /// Add a user to a tenant.
    ///
    /// Fails with [`TenancyError::NotFound`] if the tenant does not
    /// exist, and with [`TenancyError::Conflict`] if the user already
    /// belongs to it. The conventional default role is
    /// [`Role::Member`] (`Role::default()`).
    async fn add_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        role: Role,
    ) -> Result<Membership, TenancyError>;

    /// Change the role of an existing membership.
    ///
    /// Fails with [`TenancyError::NotFound`] if no such membership
    /// exists. `date_joined` is unchanged.
    async fn update_role(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        new_role: Role,
    ) -> Result<Membership, TenancyError>;

    /// Remove a user from a tenant.
    ///
    /// Fails with [`TenancyError::NotFound`] if no such membership
    /// exists.
    async fn remove_membership(&self, user_id: Uuid, tenant_id: Uuid)
    -> Result<(), TenancyError>;

    /// All memberships of a user, in insertion order.
    ///
    /// The order is stable for a given store state; tenant resolution
    /// depends on it.
    async fn memberships_for_user(&self, user_id: Uuid) -> Result<Vec<Membership>, TenancyError>;

    /// Find one membership by its `(user, tenant)` pair.
    async fn find_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Membership>, TenancyError>;
}

#[derive(Debug, Default)]
struct StoreState {
    tenants: HashMap<Uuid, Tenant>,
    /// Kept in insertion order; this is the stable order that
    /// `memberships_for_user` exposes.
    memberships: Vec<Membership>,
}

/// In-memory membership store.
///
/// The reference implementation of [`MembershipStore`], also suitable
/// as a test double for hosts. One lock guards the whole state, so
/// each operation is a single serializable critical section.
#[derive(Debug, Default)]
pub struct InMemoryMembershipStore {
    state: RwLock<StoreState>,
}

impl InMemoryMembershipStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipStore for InMemoryMembershipStore {
    async fn create_tenant(&self, name: &str, slug: &str) -> Result<Tenant, TenancyError> {
        validate_name(name)?;
        validate_slug(slug)?;

        let mut state = self.state.write();
        if state.tenants.values().any(|t| t.name == name) {
            return Err(TenancyError::Conflict(format!(
                "Tenant name '{}' already exists",
                name
            )));
        }
        if state.tenants.values().any(|t| t.slug == slug) {
            return Err(TenancyError::Conflict(format!(
                "Tenant slug '{}' already exists",
                slug
            )));
        }

        let tenant = Tenant::new(name, slug);
        state.tenants.insert(tenant.id, tenant.clone());
        tracing::info!("Created tenant '{}' ({})", tenant.slug, tenant.id);
        Ok(tenant)
    }

    async fn rename_tenant(
        &self,
        tenant_id: Uuid,
        name: &str,
        slug: &str,
    ) -> Result<Tenant, TenancyError> {
        validate_name(name)?;
        validate_slug(slug)?;

        let mut state = self.state.write();
        if state
            .tenants
            .values()
            .any(|t| t.id != tenant_id && t.name == name)
        {
            return Err(TenancyError::Conflict(format!(
                "Tenant name '{}' already exists",
                name
            )));
        }
        if state
            .tenants
            .values()
            .any(|t| t.id != tenant_id && t.slug == slug)
        {
            return Err(TenancyError::Conflict(format!(
                "Tenant slug '{}' already exists",
                slug
            )));
        }

        let tenant = state
            .tenants
            .get_mut(&tenant_id)
            .ok_or_else(|| TenancyError::NotFound(format!("Tenant {}", tenant_id)))?;
        tenant.name = name.to_string();
        tenant.slug = slug.to_string();
        Ok(tenant.clone())
    }

    async fn get_tenant(&self, tenant_id: Uuid) -> Result<Option<Tenant>, TenancyError> {
        Ok(self.state.read().tenants.get(&tenant_id).cloned())
    }

    async fn find_tenant_by_slug(&self, slug: &str) -> Result<Option<Tenant>, TenancyError> {
        Ok(self
            .state
            .read()
            .tenants
            .values()
            .find(|t| t.slug == slug)
            .cloned())
    }

    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenancyError> {
        let mut tenants: Vec<_> = self.state.read().tenants.values().cloned().collect();
        tenants.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tenants)
    }

    async fn delete_tenant(&self, tenant_id: Uuid) -> Result<(), TenancyError> {
        let mut state = self.state.write();
        if state.tenants.remove(&tenant_id).is_none() {
            return Err(TenancyError::NotFound(format!("Tenant {}", tenant_id)));
        }
        let before = state.memberships.len();
        state.memberships.retain(|m| m.tenant_id != tenant_id);
        tracing::info!(
            "Deleted tenant {} and {} membership(s)",
            tenant_id,
            before - state.memberships.len()
        );
        Ok(())
    }

    async fn add_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        role: Role,
    ) -> Result<Membership, TenancyError> {
        let mut state = self.state.write();
        if !state.tenants.contains_key(&tenant_id) {
            return Err(TenancyError::NotFound(format!("Tenant {}", tenant_id)));
        }
        if state
            .memberships
            .iter()
            .any(|m| m.user_id == user_id && m.tenant_id == tenant_id)
        {
            return Err(TenancyError::Conflict(format!(
                "User {} already belongs to tenant {}",
                user_id, tenant_id
            )));
        }

        let membership = Membership::new(user_id, tenant_id, role);
        state.memberships.push(membership.clone());
        tracing::debug!(
            "Added user {} to tenant {} as {}",
            user_id,
            tenant_id,
            role
        );
        Ok(membership)
    }

    async fn update_role(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        new_role: Role,
    ) -> Result<Membership, TenancyError> {
        let mut state = self.state.write();
        let membership = state
            .memberships
            .iter_mut()
            .find(|m| m.user_id == user_id && m.tenant_id == tenant_id)
            .ok_or_else(|| {
                TenancyError::NotFound(format!(
                    "Membership of user {} in tenant {}",
                    user_id, tenant_id
                ))
            })?;
        membership.role = new_role;
        tracing::debug!(
            "Updated role of user {} in tenant {} to {}",
            user_id,
            tenant_id,
            new_role
        );
        Ok(membership.clone())
    }

    async fn remove_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<(), TenancyError> {
        let mut state = self.state.write();
        let position = state
            .memberships
            .iter()
            .position(|m| m.user_id == user_id && m.tenant_id == tenant_id)
            .ok_or_else(|| {
                TenancyError::NotFound(format!(
                    "Membership of user {} in tenant {}",
                    user_id, tenant_id
                ))
            })?;
        state.memberships.remove(position);
        tracing::debug!("Removed user {} from tenant {}", user_id, tenant_id);
        Ok(())
    }

    async fn memberships_for_user(&self, user_id: Uuid) -> Result<Vec<Membership>, TenancyError> {
        Ok(self
            .state
            .read()
            .memberships
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_membership(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Option<Membership>, TenancyError> {
        Ok(self
            .state
            .read()
            .memberships
            .iter()
            .find(|m| m.user_id == user_id && m.tenant_id == tenant_id)
            .cloned())
    }
}
