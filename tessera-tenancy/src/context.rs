//! Request-scoped tenant context.

use tessera_core::{Membership, Role, Tenant};
use uuid::Uuid;

/// The resolved tenant (and the membership it came from) for one
/// request.
///
/// A context is built fresh per request by the resolver and passed
/// explicitly to downstream handlers; it is never cached across
/// requests and never stored in process-wide state. An empty context
/// means "no tenant-scoped access", which downstream authorization
/// must treat as denial, not as a wildcard.
#[derive(Debug, Clone, Default)]
pub struct TenantContext {
    tenant: Option<Tenant>,
    membership: Option<Membership>,
}

impl TenantContext {
    /// Create an empty context (no tenant).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a resolved tenant.
    pub fn resolved(tenant: Tenant, membership: Membership) -> Self {
        Self {
            tenant: Some(tenant),
            membership: Some(membership),
        }
    }

    /// The active tenant, if any.
    pub fn tenant(&self) -> Option<&Tenant> {
        self.tenant.as_ref()
    }

    /// The membership the active tenant was resolved through.
    pub fn membership(&self) -> Option<&Membership> {
        self.membership.as_ref()
    }

    /// The active tenant's id, if any.
    pub fn tenant_id(&self) -> Option<Uuid> {
        self.tenant.as_ref().map(|t| t.id)
    }

    /// Whether a tenant was resolved.
    pub fn has_tenant(&self) -> bool {
        self.tenant.is_some()
    }

    /// The caller's role in the active tenant, if any.
    pub fn role(&self) -> Option<Role> {
        self.membership.as_ref().map(|m| m.role)
    }

    /// Whether the caller holds at least `minimum` in the active
    /// tenant. `false` when no tenant is resolved.
    pub fn has_role(&self, minimum: Role) -> bool {
        self.membership
            .as_ref()
            .is_some_and(|m| m.has_role(minimum))
    }

    /// Consume the context, returning the active tenant.
    pub fn into_tenant(self) -> Option<Tenant> {
        self.tenant
    }
}
