//! Profile repository for database operations.

use sqlx::PgPool;

use donate_bridge_core::SubjectId;

use super::RepositoryError;
use crate::models::Profile;

/// Full set of profile fields for an upsert.
///
/// A profile write always replaces every field; omitted values land as
/// NULL rather than keeping their previous contents.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
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
    /// Postal code.
    pub pincode: Option<String>,
    /// Country.
    pub country: Option<String>,
}

/// Repository for profile database operations.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    /// Create a new profile repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a profile by subject id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<Profile>, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            SELECT subject_id, phone, address_line1, address_line2,
                   city, state, pincode, country, updated_at
            FROM user_profiles
            WHERE subject_id = $1
            ",
        )
        .bind(subject_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Insert or replace the profile for a subject id.
    ///
    /// Idempotent: writing the same payload twice leaves one row with
    /// the latest values.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn upsert(
        &self,
        subject_id: &SubjectId,
        input: &ProfileInput,
    ) -> Result<Profile, RepositoryError> {
        let profile = sqlx::query_as::<_, Profile>(
            r"
            INSERT INTO user_profiles
                (subject_id, phone, address_line1, address_line2, city, state, pincode, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (subject_id) DO UPDATE SET
                phone = EXCLUDED.phone,
                address_line1 = EXCLUDED.address_line1,
                address_line2 = EXCLUDED.address_line2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                pincode = EXCLUDED.pincode,
                country = EXCLUDED.country,
                updated_at = NOW()
            RETURNING subject_id, phone, address_line1, address_line2,
                      city, state, pincode, country, updated_at
            ",
        )
        .bind(subject_id)
        .bind(&input.phone)
        .bind(&input.address_line1)
        .bind(&input.address_line2)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.pincode)
        .bind(&input.country)
        .fetch_one(self.pool)
        .await?;

        Ok(profile)
    }
}
