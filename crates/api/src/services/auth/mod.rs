//! Authentication service.
//!
//! Reconciles verified identity claims with the local user table: the
//! first successful login for a subject id creates its user row, repeat
//! logins find it, and every gated request re-runs the same path so
//! handlers always observe a persisted user.

mod error;

pub use error::AuthError;

use std::sync::Arc;

use tracing::info;

use donate_bridge_core::{Email, SubjectId};

use crate::db::users::{NewUser, UserStore};
use crate::identity::{IdentityClaim, IdentityVerifier};

/// The authenticated request context.
///
/// Carries the verified claim fields, not the stored row: with
/// refresh-on-login disabled the row may lag the provider, and handlers
/// should see what the user just proved. Donations and profiles key on
/// the subject id, so the internal row id stays internal.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Identity provider's stable subject id.
    pub subject_id: SubjectId,
    /// Display name from the verified claim.
    pub display_name: Option<String>,
    /// Email address from the verified claim.
    pub email: Option<Email>,
    /// Avatar URL from the verified claim.
    pub avatar_url: Option<String>,
}

/// Authentication service.
///
/// Verifies bearer credentials and keeps the user table consistent with
/// the identities that present them. Generic over the store so the
/// reconciliation contract can be exercised without a database.
pub struct AuthService<S> {
    verifier: Arc<dyn IdentityVerifier>,
    users: S,
    refresh_on_login: bool,
}

impl<S: UserStore> AuthService<S> {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(verifier: Arc<dyn IdentityVerifier>, users: S, refresh_on_login: bool) -> Self {
        Self {
            verifier,
            users,
            refresh_on_login,
        }
    }

    /// Verify a credential and reconcile its identity with the user
    /// table.
    ///
    /// Exactly one user row exists per subject id afterwards, including
    /// when concurrent requests race on a first login. With
    /// refresh-on-login enabled, a repeat login also overwrites the
    /// stored claim fields.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingCredential` for a blank credential
    /// (the verifier is never consulted), `AuthError::InvalidCredential`
    /// when verification fails, and `AuthError::Store` when the user
    /// table cannot be read or written. No store write happens on any
    /// error path.
    pub async fn authenticate(&self, credential: &str) -> Result<Identity, AuthError> {
        if credential.trim().is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let claim = self
            .verifier
            .verify(credential)
            .await
            .map_err(AuthError::InvalidCredential)?;

        let new_user = claim_fields(&claim);
        let (user, created) = self.users.insert_if_absent(&new_user).await?;

        if created {
            info!(subject_id = %user.subject_id, "registered new user on first login");
        } else if self.refresh_on_login {
            self.users.refresh_claim_fields(&new_user).await?;
        }

        Ok(Identity {
            subject_id: claim.subject_id,
            display_name: claim.display_name,
            email: claim.email,
            avatar_url: claim.avatar_url,
        })
    }
}

/// Claim fields in store form.
fn claim_fields(claim: &IdentityClaim) -> NewUser {
    NewUser {
        subject_id: claim.subject_id.clone(),
        display_name: claim.display_name.clone(),
        email: claim.email.clone(),
        avatar_url: claim.avatar_url.clone(),
    }
}
