use axum::{extract::State, Json};
use validator::Validate;

use crate::app_state::AppState;
use crate::booking::store::ScheduleStore;
use crate::booking::BookingError;
use crate::db::models::{
    AppointmentDetails, Business, Service, UpdateBusinessProfile, UpdateServicesPayload,
};
use crate::db::repositories::BusinessRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;

pub async fn get_profile(
    State(state): State<AppState>,
    CurrentUser(owner_id): CurrentUser,
) -> AppResult<Json<Business>> {
    let business = BusinessRepository::get_by_owner(&state.db, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("business profile".to_string()))?;
    Ok(Json(business))
}

/// Create or update the owner's shop profile. Shop name and address are
/// required; each configured weekday must have a well-formed window with
/// opening before closing, or be blank (closed).
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(owner_id): CurrentUser,
    Json(payload): Json<UpdateBusinessProfile>,
) -> AppResult<Json<Business>> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let business = BusinessRepository::upsert_profile(&state.db, owner_id, &payload).await?;
    Ok(Json(business))
}

/// The owner's booking feed: every appointment held at their shop, newest
/// first, with service ids resolved to display names.
pub async fn list_shop_appointments(
    State(state): State<AppState>,
    CurrentUser(owner_id): CurrentUser,
) -> AppResult<Json<Vec<AppointmentDetails>>> {
    let business = BusinessRepository::get_by_owner(&state.db, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("business profile".to_string()))?;

    let appointments = state
        .schedule
        .shop_appointments(business.id)
        .await
        .map_err(BookingError::from)?;
    Ok(Json(appointments))
}

/// Replace the shop's service list in one transaction, preserving the
/// submitted order.
pub async fn replace_services(
    State(state): State<AppState>,
    CurrentUser(owner_id): CurrentUser,
    Json(payload): Json<UpdateServicesPayload>,
) -> AppResult<Json<Vec<Service>>> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(err.to_string()))?;

    let business = BusinessRepository::get_by_owner(&state.db, owner_id)
        .await?
        .ok_or_else(|| AppError::NotFound("business profile".to_string()))?;

    let mut tx = state.db.begin().await?;
    let services = BusinessRepository::replace_services(&mut tx, business.id, &payload.services)
        .await?;
    tx.commit().await?;

    Ok(Json(services))
}
