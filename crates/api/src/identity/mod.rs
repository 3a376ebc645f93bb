//! Identity-token verification.
//!
//! The frontend authenticates users with Firebase and sends the resulting
//! ID token as `Authorization: Bearer <token>`. This module verifies such
//! tokens locally:
//!
//! 1. Read the `kid` from the unverified token header
//! 2. Resolve the RSA decoding key from the provider's published key set
//!    (fetched over HTTPS, cached with a TTL)
//! 3. Verify the RS256 signature, expiry, audience (the Firebase project
//!    id) and issuer (`https://securetoken.google.com/<project-id>`)
//! 4. Map the claims to an [`IdentityClaim`]
//!
//! Verification is a per-request black box to the rest of the system: the
//! [`IdentityVerifier`] trait is the seam, and [`FirebaseTokenVerifier`]
//! is the production implementation. Claims are never cached; only
//! decoding keys are.

mod error;
mod firebase;

pub use error::VerifyError;
pub use firebase::FirebaseTokenVerifier;

use async_trait::async_trait;

use donate_bridge_core::{Email, SubjectId};

/// Verified identity attributes for one request.
///
/// Produced per request from a valid credential and discarded with it;
/// the subject id is the only field with any cross-request meaning.
#[derive(Debug, Clone)]
pub struct IdentityClaim {
    /// Stable subject id for the external account.
    pub subject_id: SubjectId,
    /// Display name, when the provider supplied one.
    pub display_name: Option<String>,
    /// Verified email address, when present and well-formed.
    pub email: Option<Email>,
    /// Avatar URL, when the provider supplied one.
    pub avatar_url: Option<String>,
}

/// Verifies an opaque credential string into a claim.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Verify a credential and return its claim.
    ///
    /// # Errors
    ///
    /// Returns a [`VerifyError`] when the credential is malformed, signed
    /// with an unknown key, expired, or addressed to a different project.
    async fn verify(&self, credential: &str) -> Result<IdentityClaim, VerifyError>;
}
