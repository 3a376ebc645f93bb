//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use donate_bridge_core::{Email, SubjectId, UserId};

/// A local user record, created lazily on first successful login.
///
/// The subject id is the identity provider's stable identifier and is
/// unique across rows; everything else is a snapshot of the claim at
/// creation time (or at the last login, when refresh-on-login is
/// enabled).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Internal row ID.
    pub id: UserId,
    /// Identity provider's stable subject id (unique, immutable).
    pub subject_id: SubjectId,
    /// Display name from the identity claim, if the provider supplied one.
    pub display_name: Option<String>,
    /// Email address from the identity claim.
    pub email: Option<Email>,
    /// Avatar URL from the identity claim.
    pub avatar_url: Option<String>,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}
