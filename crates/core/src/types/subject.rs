//! Identity-provider subject id type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`SubjectId`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SubjectIdError {
    /// The input string is empty or whitespace-only.
    #[error("subject id cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("subject id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The stable identifier the identity provider issues for one external
/// account.
///
/// This is the primary correlation key of the whole system: a verified
/// claim carries it, the users table is unique on it, and donations and
/// profiles are owned by it. It is opaque - nothing here assumes any
/// internal structure beyond "non-empty printable string".
///
/// ## Constraints
///
/// - Must not be empty or whitespace-only
/// - Length: at most 255 characters (providers issue far shorter ids;
///   the cap bounds the indexed column)
///
/// ## Examples
///
/// ```
/// use donate_bridge_core::SubjectId;
///
/// assert!(SubjectId::parse("x7Kp2mQv9hT3bY5w").is_ok());
/// assert!(SubjectId::parse("").is_err());
/// assert!(SubjectId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    /// Maximum length of a subject id.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `SubjectId` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, whitespace-only, or longer
    /// than 255 characters.
    pub fn parse(s: &str) -> Result<Self, SubjectIdError> {
        if s.trim().is_empty() {
            return Err(SubjectIdError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SubjectIdError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the subject id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `SubjectId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SubjectId {
    type Err = SubjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SubjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for SubjectId {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for SubjectId {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for SubjectId {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(SubjectId::parse("x7Kp2mQv9hT3bY5w").is_ok());
        assert!(SubjectId::parse("user-123").is_ok());
        assert!(SubjectId::parse("a").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(SubjectId::parse(""), Err(SubjectIdError::Empty)));
    }

    #[test]
    fn test_parse_whitespace_only() {
        assert!(matches!(
            SubjectId::parse("  \t "),
            Err(SubjectIdError::Empty)
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(256);
        assert!(matches!(
            SubjectId::parse(&long),
            Err(SubjectIdError::TooLong { .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = SubjectId::parse("x7Kp2mQv9hT3bY5w").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"x7Kp2mQv9hT3bY5w\"");

        let parsed: SubjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display() {
        let id = SubjectId::parse("abc").unwrap();
        assert_eq!(format!("{id}"), "abc");
    }

    #[test]
    fn test_from_str() {
        let id: SubjectId = "x7Kp2mQv9hT3bY5w".parse().unwrap();
        assert_eq!(id.as_str(), "x7Kp2mQv9hT3bY5w");
    }
}
