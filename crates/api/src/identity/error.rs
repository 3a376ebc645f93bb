//! Identity verification errors.

use thiserror::Error;

/// Errors that can occur while verifying an identity token.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The token header carries no key id, so no signing key can be
    /// selected.
    #[error("token header has no key id")]
    MissingKeyId,

    /// The token names a signing key the provider's key set does not
    /// contain (rotated out, or forged).
    #[error("unknown signing key: {0}")]
    UnknownKeyId(String),

    /// The provider's key set could not be fetched.
    #[error("could not fetch signing keys: {0}")]
    KeySetFetch(#[from] reqwest::Error),

    /// The token failed validation: bad signature, expired, wrong
    /// audience or issuer, or not a JWT at all.
    #[error("token rejected: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    /// The token verified but its claims are unusable (e.g., empty
    /// subject).
    #[error("malformed claims: {0}")]
    MalformedClaims(String),
}
