//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::identity::VerifyError;

/// Errors that can occur during authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential was presented (or it was blank).
    #[error("no credential provided")]
    MissingCredential,

    /// The credential failed verification. The source carries the exact
    /// reason for logs; callers only learn the credential was bad.
    #[error("credential rejected")]
    InvalidCredential(#[source] VerifyError),

    /// The user store failed while reconciling the verified identity.
    #[error("database error: {0}")]
    Store(#[from] RepositoryError),
}
