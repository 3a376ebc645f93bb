//! Donation repository for database operations.

use sqlx::PgPool;

use donate_bridge_core::SubjectId;

use super::RepositoryError;
use crate::models::Donation;

/// Parameters for recording a donation.
///
/// Status is not a parameter: every donation starts out `pending`.
#[derive(Debug, Clone)]
pub struct NewDonation {
    /// Subject id of the donor.
    pub subject_id: SubjectId,
    /// Free-text description of the donated items.
    pub items: String,
    /// Number of items, already validated to be >= 1.
    pub quantity: i32,
}

/// Repository for donation database operations.
pub struct DonationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DonationRepository<'a> {
    /// Create a new donation repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Record a new donation with status `pending`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new_donation: &NewDonation) -> Result<Donation, RepositoryError> {
        let donation = sqlx::query_as::<_, Donation>(
            r"
            INSERT INTO donations (subject_id, items, quantity, status)
            VALUES ($1, $2, $3, 'pending')
            RETURNING id, subject_id, items, quantity, status, created_at
            ",
        )
        .bind(&new_donation.subject_id)
        .bind(&new_donation.items)
        .bind(new_donation.quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(donation)
    }

    /// List all donations owned by a subject id, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Vec<Donation>, RepositoryError> {
        let donations = sqlx::query_as::<_, Donation>(
            r"
            SELECT id, subject_id, items, quantity, status, created_at
            FROM donations
            WHERE subject_id = $1
            ORDER BY id DESC
            ",
        )
        .bind(subject_id)
        .fetch_all(self.pool)
        .await?;

        Ok(donations)
    }

    /// List every donation in the system, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Donation>, RepositoryError> {
        let donations = sqlx::query_as::<_, Donation>(
            r"
            SELECT id, subject_id, items, quantity, status, created_at
            FROM donations
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(donations)
    }
}
