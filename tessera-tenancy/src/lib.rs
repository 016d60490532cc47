//! Tenant membership and resolution for Tessera
//!
//! A minimal tenant-membership directory with fixed roles: tenants,
//! the memberships that grant users access to them, and per-request
//! resolution of the active tenant.
//!
//! # Features
//!
//! - **Membership Store** - Invariant-enforcing storage for tenants
//!   and memberships behind an async trait
//! - **Tenant Resolution** - Picks the active tenant for a request
//!   from the caller's identity, with a pluggable selection strategy
//! - **Request Context** - Explicit, request-scoped tenant context for
//!   downstream role checks
//! - **Fixed Roles** - Owner > Admin > Member > Viewer, as a closed
//!   ordered enum
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tessera_core::{Identity, Role};
//! use tessera_tenancy::{InMemoryMembershipStore, MembershipStore, TenantResolver};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), tessera_core::TenancyError> {
//! let store = Arc::new(InMemoryMembershipStore::new());
//!
//! let acme = store.create_tenant("Acme", "acme").await?;
//! let user = uuid::Uuid::new_v4();
//! store.add_membership(user, acme.id, Role::Member).await?;
//!
//! let resolver = TenantResolver::new(store);
//! let tenant = resolver.resolve(&Identity::User(user)).await?;
//! assert_eq!(tenant.unwrap().slug, "acme");
//! # Ok(())
//! # }
//! ```
//!
//! Production deployments implement [`MembershipStore`] against their
//! own database; [`InMemoryMembershipStore`] is the reference
//! implementation and a ready-made test double.

pub mod context;
pub mod middleware;
pub mod resolver;
pub mod store;

pub use context::TenantContext;
pub use middleware::TenantMiddleware;
pub use resolver::{FirstMembershipSelector, MembershipSelector, TenantResolver};
pub use store::{InMemoryMembershipStore, MembershipStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::TenantContext;
    pub use crate::middleware::TenantMiddleware;
    pub use crate::resolver::{FirstMembershipSelector, MembershipSelector, TenantResolver};
    pub use crate::store::{InMemoryMembershipStore, MembershipStore};
    pub use tessera_core::{Identity, Membership, Role, TenancyError, Tenant};
}
