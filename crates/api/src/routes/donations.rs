//! Donation routes.
//!
//! Donations are keyed by the owner's subject id, taken from the
//! verified identity — never from the request body.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use crate::db::donations::{DonationRepository, NewDonation};
use crate::error::AppError;
use crate::middleware::RequireAuth;
use crate::models::Donation;
use crate::state::AppState;

/// Request body for creating a donation.
#[derive(Debug, Deserialize)]
pub struct CreateDonationRequest {
    /// Free-text description of the donated items.
    pub items: Option<String>,
    /// Number of items; omitted means 1.
    pub quantity: Option<i32>,
}

/// Record a donation owned by the caller.
///
/// POST /donations
///
/// # Errors
///
/// Returns 400 when `items` is blank or `quantity` is explicitly less
/// than 1, and 503 when the store is unreachable.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
    payload: Result<Json<CreateDonationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Donation>), AppError> {
    let Json(body) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let items = body.items.as_deref().map(str::trim).unwrap_or_default();
    if items.is_empty() {
        return Err(AppError::BadRequest("Items required".to_string()));
    }
    let quantity = validated_quantity(body.quantity)?;

    let donation = DonationRepository::new(state.pool())
        .insert(&NewDonation {
            subject_id: identity.subject_id,
            items: items.to_string(),
            quantity,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(donation)))
}

/// List the caller's donations, newest first.
///
/// GET /my-donations
///
/// # Errors
///
/// Returns 503 when the store is unreachable.
#[instrument(skip(state))]
pub async fn mine(
    State(state): State<AppState>,
    RequireAuth(identity): RequireAuth,
) -> Result<Json<Vec<Donation>>, AppError> {
    let donations = DonationRepository::new(state.pool())
        .list_by_owner(&identity.subject_id)
        .await?;

    Ok(Json(donations))
}

/// List every donation, newest first.
///
/// GET /donations
///
/// Any authenticated caller may read the full listing; the data is not
/// scoped per owner.
///
/// # Errors
///
/// Returns 503 when the store is unreachable.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
) -> Result<Json<Vec<Donation>>, AppError> {
    let donations = DonationRepository::new(state.pool()).list_all().await?;

    Ok(Json(donations))
}

/// Validate an optional quantity: absent means one, explicit values
/// must be at least one.
fn validated_quantity(quantity: Option<i32>) -> Result<i32, AppError> {
    match quantity {
        None => Ok(1),
        Some(q) if q >= 1 => Ok(q),
        Some(_) => Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        assert_eq!(validated_quantity(None).unwrap(), 1);
    }

    #[test]
    fn test_explicit_quantity_kept() {
        assert_eq!(validated_quantity(Some(1)).unwrap(), 1);
        assert_eq!(validated_quantity(Some(12)).unwrap(), 12);
    }

    #[test]
    fn test_zero_and_negative_quantity_rejected() {
        for quantity in [0, -1, i32::MIN] {
            let err = validated_quantity(Some(quantity)).unwrap_err();
            assert!(matches!(err, AppError::BadRequest(_)));
        }
    }
}
