//! Tenant Resolution
//!
//! Decides the active tenant for a request from the caller's identity
//! and their memberships. Resolution never fails for a user with zero
//! or many memberships; only store faults propagate.
//!
//! Which membership wins when a user belongs to several tenants is a
//! policy decision behind the [`MembershipSelector`] seam. The shipped
//! [`FirstMembershipSelector`] takes the first membership in the
//! store's stable order; it is a placeholder until an explicit
//! active-tenant switcher exists, not a design guarantee.

use std::sync::Arc;

use tessera_core::{Identity, Membership, TenancyError, Tenant};

use crate::context::TenantContext;
use crate::store::MembershipStore;

/// Selection strategy for users with multiple memberships.
///
/// Implementations must be pure: the same membership slice always
/// yields the same choice.
pub trait MembershipSelector: Send + Sync {
    /// Pick the membership that determines the active tenant, or
    /// `None` to resolve no tenant.
    fn select<'a>(&self, memberships: &'a [Membership]) -> Option<&'a Membership>;
}

/// Picks the first membership in the store's stable order.
///
/// This reproduces the legacy single-tenant-per-user behavior for
/// users with one membership and is deterministic for everyone else.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMembershipSelector;

impl MembershipSelector for FirstMembershipSelector {
    fn select<'a>(&self, memberships: &'a [Membership]) -> Option<&'a Membership> {
        memberships.first()
    }
}

/// Resolves the active tenant for a request.
pub struct TenantResolver {
    store: Arc<dyn MembershipStore>,
    selector: Arc<dyn MembershipSelector>,
}

impl TenantResolver {
    /// Create a resolver with the default first-membership policy.
    pub fn new(store: Arc<dyn MembershipStore>) -> Self {
        Self {
            store,
            selector: Arc::new(FirstMembershipSelector),
        }
    }

    /// Replace the selection strategy.
    pub fn with_selector(mut self, selector: Arc<dyn MembershipSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// Resolve the active tenant for `identity`.
    ///
    /// Anonymous callers resolve to `None` without touching the store.
    /// Authenticated callers with no memberships also resolve to
    /// `None`; that is not an error. Store faults propagate unchanged.
    pub async fn resolve(&self, identity: &Identity) -> Result<Option<Tenant>, TenancyError> {
        Ok(self.resolve_context(identity).await?.into_tenant())
    }

    /// Resolve the full request context (tenant plus the membership it
    /// was chosen through), recomputed on every call.
    pub async fn resolve_context(
        &self,
        identity: &Identity,
    ) -> Result<TenantContext, TenancyError> {
        let Some(user_id) = identity.user_id() else {
            return Ok(TenantContext::new());
        };

        let memberships = self.store.memberships_for_user(user_id).await?;
        let Some(membership) = self.selector.select(&memberships).cloned() else {
            tracing::debug!("User {} has no memberships; no active tenant", user_id);
            return Ok(TenantContext::new());
        };

        match self.store.get_tenant(membership.tenant_id).await? {
            Some(tenant) => {
                tracing::debug!(
                    "Resolved tenant '{}' for user {}",
                    tenant.slug,
                    user_id
                );
                Ok(TenantContext::resolved(tenant, membership))
            }
            None => {
                // The store enforces referential integrity, so a
                // dangling membership means the tenant vanished
                // between the two reads. Resolve to no tenant.
                tracing::warn!(
                    "Membership of user {} references missing tenant {}",
                    user_id,
                    membership.tenant_id
                );
                Ok(TenantContext::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryMembershipStore;
    use async_trait::async_trait;
    use tessera_core::Role;
    use uuid::Uuid;

    /// Store that fails every call; proves code paths that must not
    /// touch storage.
    struct UnavailableStore;

    #[async_trait]
    impl MembershipStore for UnavailableStore {
        async fn create_tenant(&self, _: &str, _: &str) -> Result<Tenant, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn rename_tenant(&self, _: Uuid, _: &str, _: &str) -> Result<Tenant, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn get_tenant(&self, _: Uuid) -> Result<Option<Tenant>, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn find_tenant_by_slug(&self, _: &str) -> Result<Option<Tenant>, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn list_tenants(&self) -> Result<Vec<Tenant>, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn delete_tenant(&self, _: Uuid) -> Result<(), TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn add_membership(
            &self,
            _: Uuid,
            _: Uuid,
            _: Role,
        ) -> Result<Membership, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn update_role(
            &self,
            _: Uuid,
            _: Uuid,
            _: Role,
        ) -> Result<Membership, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn remove_membership(&self, _: Uuid, _: Uuid) -> Result<(), TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn memberships_for_user(&self, _: Uuid) -> Result<Vec<Membership>, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }

        async fn find_membership(
            &self,
            _: Uuid,
            _: Uuid,
        ) -> Result<Option<Membership>, TenancyError> {
            Err(TenancyError::Infrastructure("store unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn test_anonymous_resolves_none_without_store_access() {
        // An unavailable store is harmless for anonymous callers.
        let resolver = TenantResolver::new(Arc::new(UnavailableStore));
        let tenant = resolver.resolve(&Identity::Anonymous).await.unwrap();
        assert!(tenant.is_none());
    }

    #[tokio::test]
    async fn test_store_fault_propagates_for_authenticated() {
        let resolver = TenantResolver::new(Arc::new(UnavailableStore));
        let result = resolver.resolve(&Identity::User(Uuid::new_v4())).await;
        assert!(matches!(result, Err(TenancyError::Infrastructure(_))));
    }

    #[tokio::test]
    async fn test_no_memberships_resolves_none() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let resolver = TenantResolver::new(store);

        let tenant = resolver
            .resolve(&Identity::User(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(tenant.is_none());
    }

    #[tokio::test]
    async fn test_first_membership_wins() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let acme = store.create_tenant("Acme", "acme").await.unwrap();
        let globex = store.create_tenant("Globex", "globex").await.unwrap();
        let user = Uuid::new_v4();
        store.add_membership(user, acme.id, Role::Viewer).await.unwrap();
        store.add_membership(user, globex.id, Role::Owner).await.unwrap();

        let resolver = TenantResolver::new(store);
        let tenant = resolver.resolve(&Identity::User(user)).await.unwrap().unwrap();
        assert_eq!(tenant.id, acme.id);
    }

    #[tokio::test]
    async fn test_custom_selector() {
        /// Picks the membership with the highest role.
        struct HighestRoleSelector;

        impl MembershipSelector for HighestRoleSelector {
            fn select<'a>(&self, memberships: &'a [Membership]) -> Option<&'a Membership> {
                memberships.iter().max_by_key(|m| m.role)
            }
        }

        let store = Arc::new(InMemoryMembershipStore::new());
        let acme = store.create_tenant("Acme", "acme").await.unwrap();
        let globex = store.create_tenant("Globex", "globex").await.unwrap();
        let user = Uuid::new_v4();
        store.add_membership(user, acme.id, Role::Viewer).await.unwrap();
        store.add_membership(user, globex.id, Role::Owner).await.unwrap();

        let resolver =
            TenantResolver::new(store).with_selector(Arc::new(HighestRoleSelector));
        let tenant = resolver.resolve(&Identity::User(user)).await.unwrap().unwrap();
        assert_eq!(tenant.id, globex.id);
    }

    #[tokio::test]
    async fn test_resolve_context_carries_membership() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let acme = store.create_tenant("Acme", "acme").await.unwrap();
        let user = Uuid::new_v4();
        store.add_membership(user, acme.id, Role::Admin).await.unwrap();

        let resolver = TenantResolver::new(store);
        let context = resolver
            .resolve_context(&Identity::User(user))
            .await
            .unwrap();
        assert_eq!(context.tenant_id(), Some(acme.id));
        assert_eq!(context.role(), Some(Role::Admin));
        assert!(context.has_role(Role::Member));
    }

    #[tokio::test]
    async fn test_membership_change_visible_on_next_resolution() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let acme = store.create_tenant("Acme", "acme").await.unwrap();
        let user = Uuid::new_v4();
        store.add_membership(user, acme.id, Role::Member).await.unwrap();

        let resolver = TenantResolver::new(store.clone());
        assert!(resolver.resolve(&Identity::User(user)).await.unwrap().is_some());

        // Nothing is cached; removal shows up on the next call.
        store.remove_membership(user, acme.id).await.unwrap();
        assert!(resolver.resolve(&Identity::User(user)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_membership_lifecycle_end_to_end() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let acme = store.create_tenant("Acme", "acme").await.unwrap();
        let user = Uuid::new_v4();
        store
            .add_membership(user, acme.id, Role::Member)
            .await
            .unwrap();

        let resolver = TenantResolver::new(store.clone());
        let resolved = resolver
            .resolve(&Identity::User(user))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resolved.name, "Acme");

        store.update_role(user, acme.id, Role::Admin).await.unwrap();
        let membership = store.find_membership(user, acme.id).await.unwrap().unwrap();
        assert_eq!(membership.role, Role::Admin);
    }
}
