//! Donation status type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a donation.
///
/// This service only ever writes `pending`; later values (collected,
/// delivered, cancelled, ...) are set by external tooling directly in the
/// store. The type therefore keeps unknown values intact instead of
/// rejecting them: a row written by someone else must survive a
/// read-modify-write cycle byte for byte.
///
/// ## Examples
///
/// ```
/// use donate_bridge_core::DonationStatus;
///
/// assert_eq!(DonationStatus::default(), DonationStatus::Pending);
/// assert_eq!(DonationStatus::from("pending"), DonationStatus::Pending);
/// assert_eq!(
///     DonationStatus::from("collected"),
///     DonationStatus::Other("collected".to_owned())
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum DonationStatus {
    /// Newly created, awaiting pickup. The only value this service writes.
    #[default]
    Pending,
    /// Any other value, set externally. Preserved verbatim.
    Other(String),
}

impl DonationStatus {
    /// Returns the status as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for DonationStatus {
    fn from(s: &str) -> Self {
        if s == "pending" {
            Self::Pending
        } else {
            Self::Other(s.to_owned())
        }
    }
}

impl From<String> for DonationStatus {
    fn from(s: String) -> Self {
        if s == "pending" {
            Self::Pending
        } else {
            Self::Other(s)
        }
    }
}

impl From<DonationStatus> for String {
    fn from(status: DonationStatus) -> Self {
        match status {
            DonationStatus::Pending => "pending".to_owned(),
            DonationStatus::Other(s) => s,
        }
    }
}

// SQLx support (with postgres feature): stored as TEXT
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for DonationStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for DonationStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::from(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for DonationStatus {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}
