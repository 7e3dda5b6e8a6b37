use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::booking::slots::TimeOfDay;
use crate::booking::{AvailabilityResolver, BookingAdmission, BookingError, BookingRequest};
use crate::db::models::Appointment;
use crate::db::repositories::{AppointmentRepository, BusinessRepository};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::CurrentUser;

pub use crate::db::models::BookAppointmentPayload;

/// Book a slot for the signed-in user. 201 with the committed appointment,
/// 409 when the slot is taken, 400 when no service was selected.
pub async fn create_appointment(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Json(payload): Json<BookAppointmentPayload>,
) -> AppResult<(StatusCode, Json<Appointment>)> {
    let time = payload.time.parse::<TimeOfDay>().map_err(BookingError::from)?;

    let admission = BookingAdmission::new(AvailabilityResolver::new(state.env.booking.slot_minutes));
    let request = BookingRequest {
        barber_id: payload.barber_id,
        user_id,
        date: payload.date,
        time,
        service_ids: payload.service_ids,
    };

    let appointment = admission.admit(&state.schedule, &request).await?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

pub async fn list_my_appointments(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
) -> AppResult<Json<Vec<Appointment>>> {
    let appointments = AppointmentRepository::list_for_user(&state.db, user_id).await?;
    Ok(Json(appointments))
}

/// An appointment is visible to its requester and to the owner of the booked
/// barber shop, nobody else.
pub async fn get_appointment(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(appointment_id): Path<Uuid>,
) -> AppResult<Json<Appointment>> {
    let appointment = AppointmentRepository::get_by_id(&state.db, appointment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("appointment {appointment_id}")))?;

    if appointment.user_id != user_id {
        let owns_barber = BusinessRepository::get_by_owner(&state.db, user_id)
            .await?
            .map(|business| business.id == appointment.barber_id)
            .unwrap_or(false);
        if !owns_barber {
            return Err(AppError::Authorization(
                "appointment belongs to another user".to_string(),
            ));
        }
    }

    Ok(Json(appointment))
}
