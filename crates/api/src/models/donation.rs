//! Donation domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use donate_bridge_core::{DonationId, DonationStatus, SubjectId};

/// A donation record.
///
/// Owned by the donor's subject id (not the internal user row id) and
/// never mutated by this service after creation; the status column is
/// advanced by external tooling. Serialized in full as the wire
/// representation.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Donation {
    /// Internal row ID. Listing order is descending on this column.
    pub id: DonationId,
    /// Subject id of the donor.
    pub subject_id: SubjectId,
    /// Free-text description of the donated items.
    pub items: String,
    /// Number of items, at least 1.
    pub quantity: i32,
    /// Lifecycle status; always `pending` when created here.
    pub status: DonationStatus,
    /// When the donation was recorded.
    pub created_at: DateTime<Utc>,
}
