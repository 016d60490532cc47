//! Tenant record and field validation.
//!
//! A tenant is an organization or customer account that scopes data
//! access. Both `name` and `slug` are unique across all tenants; the
//! store enforces uniqueness, this module enforces field shape.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TenancyError;

/// Maximum tenant name length.
pub const MAX_NAME_LEN: usize = 255;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:[-_][a-z0-9]+)*$").expect("valid slug pattern"));

/// An organization or customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// System-generated identifier. Opaque to callers.
    pub id: Uuid,
    /// Human-readable label, unique across all tenants.
    pub name: String,
    /// URL-safe identifier, unique across all tenants.
    pub slug: String,
    /// Creation timestamp. Immutable after creation.
    pub created_at: DateTime<Utc>,
}

impl Tenant {
    /// Create a new tenant with a generated id and the current time.
    ///
    /// Does not validate or check uniqueness; the store does both
    /// before constructing a tenant.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validate a tenant name: non-blank, at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> Result<(), TenancyError> {
    if name.trim().is_empty() {
        return Err(TenancyError::Validation(
            "Tenant name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(TenancyError::Validation(format!(
            "Tenant name exceeds {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// Validate a tenant slug: lowercase alphanumeric segments separated by
/// single hyphens or underscores (e.g. `acme`, `acme-corp`).
pub fn validate_slug(slug: &str) -> Result<(), TenancyError> {
    if SLUG_PATTERN.is_match(slug) {
        Ok(())
    } else {
        Err(TenancyError::Validation(format!(
            "Invalid slug: '{}' (expected lowercase letters, digits, '-' or '_')",
            slug
        )))
    }
}
