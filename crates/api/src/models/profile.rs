//! Contact profile domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use donate_bridge_core::SubjectId;

/// A user's contact profile, at most one per subject id.
///
/// Writes replace the whole row; there are no partial updates, so a
/// field the client omits comes back empty. All contact fields are
/// optional text - the pickup crew treats them as free-form.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Profile {
    /// Subject id of the owner (natural key).
    pub subject_id: SubjectId,
    /// Contact phone number.
    pub phone: Option<String>,
    /// First address line.
    pub address_line1: Option<String>,
    /// Second address line.
    pub address_line2: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code. Kept as `pincode` end to end - it is the wire name
    /// the frontend already uses.
    pub pincode: Option<String>,
    /// Country.
    pub country: Option<String>,
    /// When the profile was last written.
    pub updated_at: DateTime<Utc>,
}
