use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::app_state::AppState;
use crate::booking::slots::TimeOfDay;
use crate::booking::store::ScheduleStore;
use crate::booking::{AvailabilityResolver, BookingError};
use crate::db::models::{BarberSummary, Business, BusinessHours, Service};
use crate::db::repositories::BusinessRepository;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct BarberDetails {
    pub id: Uuid,
    pub shop_name: String,
    pub address: String,
    pub cover_image_url: Option<String>,
    pub opening_hours: BusinessHours,
    pub services: Vec<Service>,
}

pub async fn list_barbers(State(state): State<AppState>) -> AppResult<Json<Vec<BarberSummary>>> {
    let businesses = BusinessRepository::list(&state.db).await?;
    Ok(Json(businesses.into_iter().map(BarberSummary::from).collect()))
}

pub async fn get_barber(
    State(state): State<AppState>,
    Path(barber_id): Path<Uuid>,
) -> AppResult<Json<BarberDetails>> {
    let business = fetch_barber(&state, barber_id).await?;
    let services = BusinessRepository::services(&state.db, barber_id).await?;

    Ok(Json(BarberDetails {
        id: business.id,
        shop_name: business.shop_name,
        address: business.address,
        cover_image_url: business.cover_image_url,
        opening_hours: business.opening_hours,
        services,
    }))
}

pub async fn barber_services(
    State(state): State<AppState>,
    Path(barber_id): Path<Uuid>,
) -> AppResult<Json<Vec<Service>>> {
    let services = state
        .schedule
        .services(barber_id)
        .await
        .map_err(BookingError::from)?;
    Ok(Json(services))
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Date,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub date: Date,
    pub times: Vec<TimeOfDay>,
}

/// Free slot labels for one barber on one date. A closed day is an empty
/// list, not an error.
pub async fn barber_availability(
    State(state): State<AppState>,
    Path(barber_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let resolver = AvailabilityResolver::new(state.env.booking.slot_minutes);
    let times = resolver
        .available_times(&state.schedule, barber_id, query.date)
        .await?;
    Ok(Json(AvailabilityResponse {
        date: query.date,
        times,
    }))
}

async fn fetch_barber(state: &AppState, barber_id: Uuid) -> AppResult<Business> {
    BusinessRepository::get_by_id(&state.db, barber_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("barber {barber_id}")))
}
