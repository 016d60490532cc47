//! Per-request caller identity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identity the host hands to tenant resolution for one request.
///
/// Authentication itself happens upstream; by the time Tessera runs,
/// a request is either anonymous or carries a verified user id. The
/// closed enum keeps "authenticated but no user" unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identity {
    /// No authenticated user.
    Anonymous,
    /// An authenticated user.
    User(Uuid),
}

impl Identity {
    /// Whether this identity carries an authenticated user.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::User(_))
    }

    /// The authenticated user id, if any.
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Self::Anonymous => None,
            Self::User(id) => Some(*id),
        }
    }
}
