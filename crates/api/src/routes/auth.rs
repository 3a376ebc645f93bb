//! Login route.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::AppError;
use crate::services::auth::AuthError;
use crate::state::AppState;

/// Request body for the login endpoint.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Identity token the frontend obtained from the provider.
    pub token: Option<String>,
}

/// Verify a provider token and make sure a local user exists for it.
///
/// POST /auth/google
///
/// The response body stays the same whether the login created the user
/// or found it; the frontend only needs to know the token was accepted.
///
/// # Errors
///
/// Returns 400 `No token` when the body carries no token, 401 with the
/// verifier's reason when verification fails, and 503 when the user
/// store is unreachable.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Option<Json<LoginRequest>>,
) -> Result<Json<Value>, AppError> {
    let token = payload
        .as_ref()
        .and_then(|Json(body)| body.token.as_deref())
        .unwrap_or_default();

    match state.auth().authenticate(token).await {
        Ok(identity) => {
            tracing::info!(subject_id = %identity.subject_id, "login success");
            Ok(Json(json!({ "message": "Login success" })))
        }
        // The login endpoint predates the bearer convention: a missing
        // token here is a client bug, not an auth failure.
        Err(AuthError::MissingCredential) => Err(AppError::BadRequest("No token".to_string())),
        Err(e) => Err(e.into()),
    }
}
