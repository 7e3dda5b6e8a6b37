use serde::{Deserialize, Serialize};
use sqlx::types::Uuid;
use time::{Date, OffsetDateTime};

use crate::booking::slots::TimeOfDay;

/// A committed booking. Appointments are immutable historical records; there
/// is no edit, cancel or reschedule flow. The composite key
/// (barber_id, date, time) is unique among committed appointments.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub barber_id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    #[sqlx(rename = "slot_time")]
    pub time: TimeOfDay,
    pub service_ids: Vec<Uuid>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct BookAppointmentPayload {
    pub barber_id: Uuid,
    pub date: Date,
    /// Raw slot label as submitted. Validated against the HH:MM grammar at
    /// admission so a bad label gets the booking error taxonomy, not a
    /// generic deserialization failure.
    pub time: String,
    pub service_ids: Vec<Uuid>,
}

/// A shop owner's view of one booking, with service ids resolved to their
/// display names.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct AppointmentDetails {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    #[sqlx(rename = "slot_time")]
    pub time: TimeOfDay,
    pub service_names: Vec<String>,
    pub created_at: OffsetDateTime,
}
