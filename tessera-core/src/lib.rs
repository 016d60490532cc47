//! Core domain types for Tessera
//!
//! Tessera is a tenant-membership directory: tenants, the memberships
//! that grant users access to them, and the resolution logic that picks
//! the active tenant for a request. This crate holds the primitives
//! shared by every Tessera crate:
//!
//! - [`Tenant`] and [`Membership`] records
//! - The closed [`Role`] set with its fixed privilege order
//! - [`Identity`] of an inbound request
//! - The [`TenancyError`] taxonomy
//!
//! The behavioral pieces (the membership store and the tenant resolver)
//! live in `tessera-tenancy`.

pub mod error;
pub mod identity;
pub mod membership;
pub mod role;
pub mod tenant;

pub use error::TenancyError;
pub use identity::Identity;
pub use membership::Membership;
pub use role::Role;
pub use tenant::{MAX_NAME_LEN, Tenant, validate_name, validate_slug};
