//! User store: find-or-create keyed by identity-provider subject id.

use async_trait::async_trait;
use sqlx::PgPool;

use donate_bridge_core::{Email, SubjectId};

use super::RepositoryError;
use crate::models::User;

/// Claim fields persisted when a user row is created or refreshed.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Identity provider's stable subject id.
    pub subject_id: SubjectId,
    /// Display name from the claim.
    pub display_name: Option<String>,
    /// Email from the claim.
    pub email: Option<Email>,
    /// Avatar URL from the claim.
    pub avatar_url: Option<String>,
}

/// Persistence port for user rows.
///
/// The reconciliation service is written against this trait so its
/// contract can be exercised without a database; [`PgUserStore`] is the
/// production implementation.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by subject id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<User>, RepositoryError>;

    /// Insert a user row unless one already exists for the subject id.
    ///
    /// Returns the row and whether this call created it. Concurrent calls
    /// for the same new subject id are safe: exactly one inserts, the
    /// rest observe the existing row. A uniqueness conflict is never
    /// surfaced as an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails for any
    /// other reason.
    async fn insert_if_absent(&self, new_user: &NewUser) -> Result<(User, bool), RepositoryError>;

    /// Overwrite the stored claim fields for an existing user.
    ///
    /// Used on repeat login when refresh-on-login is enabled.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row exists for the
    /// subject id, `RepositoryError::Database` if the statement fails.
    async fn refresh_claim_fields(&self, new_user: &NewUser) -> Result<User, RepositoryError>;
}

/// `PostgreSQL`-backed [`UserStore`].
///
/// Owns a pool handle so it can live in the process-wide state for the
/// lifetime of the server.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Create a new user store over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            SELECT id, subject_id, display_name, email, avatar_url, created_at, updated_at
            FROM users
            WHERE subject_id = $1
            ",
        )
        .bind(subject_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert_if_absent(&self, new_user: &NewUser) -> Result<(User, bool), RepositoryError> {
        // Single atomic statement; the DO NOTHING arm loses the race
        // quietly and the follow-up select picks up the winner's row.
        let inserted = match sqlx::query_as::<_, User>(
            r"
            INSERT INTO users (subject_id, display_name, email, avatar_url)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (subject_id) DO NOTHING
            RETURNING id, subject_id, display_name, email, avatar_url, created_at, updated_at
            ",
        )
        .bind(&new_user.subject_id)
        .bind(&new_user.display_name)
        .bind(&new_user.email)
        .bind(&new_user.avatar_url)
        .fetch_optional(&self.pool)
        .await
        {
            Ok(row) => row,
            // A duplicate key means someone else created the row first,
            // which is exactly the outcome we wanted.
            Err(e) if is_unique_violation(&e) => None,
            Err(e) => return Err(e.into()),
        };

        if let Some(user) = inserted {
            return Ok((user, true));
        }

        let user = self
            .find_by_subject(&new_user.subject_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok((user, false))
    }

    async fn refresh_claim_fields(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            r"
            UPDATE users
            SET display_name = $2, email = $3, avatar_url = $4, updated_at = NOW()
            WHERE subject_id = $1
            RETURNING id, subject_id, display_name, email, avatar_url, created_at, updated_at
            ",
        )
        .bind(&new_user.subject_id)
        .bind(&new_user.display_name)
        .bind(&new_user.email)
        .bind(&new_user.avatar_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(user)
    }
}

/// Whether a sqlx error is a unique-constraint violation.
fn is_unique_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        db_err.is_unique_violation()
    } else {
        false
    }
}
