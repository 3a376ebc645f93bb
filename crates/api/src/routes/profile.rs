//! Profile routes.
//!
//! A profile is a single optional row per subject id, always written
//! whole: saving replaces every field, so omitted ones become NULL.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::instrument;

use crate::db::profiles::{ProfileInput, ProfileRepository};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Profile;
use crate::state::AppState;

/// Request body for saving a profile.
#[derive(Debug, Deserialize)]
pub struct SaveProfileRequest {
    /// Contact phone number.
    pub phone: Option<String>,
    /// Postal address; missing subfields are stored as NULL.
    #[serde(default)]
    pub address: AddressBody,
}

/// Postal address fields of a profile payload.
#[derive(Debug, Default, Deserialize)]
pub struct AddressBody {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub country: Option<String>,
}

/// Fetch the caller's profile.
///
/// GET /profile
///
/// Responds 200 with the row, or 200 with JSON `null` when the caller
/// has not saved a profile yet.
///
/// # Errors
///
/// Returns 503 when the store is unreachable.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<Json<Option<Profile>>, AppError> {
    let profile = ProfileRepository::new(state.pool())
        .find_by_subject(&identity.subject_id)
        .await?;

    Ok(Json(profile))
}

/// Save the caller's profile, replacing any existing one.
///
/// POST /profile
///
/// # Errors
///
/// Returns 400 when the body is not valid JSON and 503 when the store
/// is unreachable.
#[instrument(skip(state, payload))]
pub async fn save(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    payload: Result<Json<SaveProfileRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    ProfileRepository::new(state.pool())
        .upsert(
            &identity.subject_id,
            &ProfileInput {
                phone: body.phone,
                address_line1: body.address.line1,
                address_line2: body.address.line2,
                city: body.address.city,
                state: body.address.state,
                pincode: body.address.pincode,
                country: body.address.country,
            },
        )
        .await?;

    Ok(Json(json!({ "message": "Profile saved" })))
}
