//! Tenant Middleware
//!
//! Per-request binding of identity to tenant context. The host
//! framework calls [`TenantMiddleware::handle`] once per request with
//! the authenticated identity and a continuation; the continuation
//! receives the freshly resolved [`TenantContext`] as an explicit
//! argument. No tenant state outlives the call.

use std::future::Future;
use std::sync::Arc;

use tessera_core::{Identity, TenancyError};

use crate::context::TenantContext;
use crate::resolver::TenantResolver;

/// Resolves the tenant context and hands it to the request handler.
///
/// Requests without a tenant (anonymous callers, users with no
/// memberships) still proceed, with an empty context; only store
/// faults short-circuit the handler.
pub struct TenantMiddleware {
    resolver: Arc<TenantResolver>,
}

impl TenantMiddleware {
    /// Create middleware around a resolver.
    pub fn new(resolver: Arc<TenantResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve the context for `identity` and run `next` with it.
    pub async fn handle<F, Fut, T>(&self, identity: Identity, next: F) -> Result<T, TenancyError>
    where
        F: FnOnce(TenantContext) -> Fut,
        Fut: Future<Output = Result<T, TenancyError>>,
    {
        let context = self.resolver.resolve_context(&identity).await?;
        next(context).await
    }
}
