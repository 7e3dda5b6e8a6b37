use std::collections::HashSet;

use async_trait::async_trait;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

use crate::booking::admission::BookingRequest;
use crate::booking::slots::TimeOfDay;
use crate::db::models::{Appointment, AppointmentDetails, BusinessHours, Service};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("business not found")]
    BusinessNotFound,

    /// An appointment already exists for the same (barber, date, time).
    /// The store raises this from its uniqueness guarantee, which is the
    /// only admission arbiter that holds under concurrent bookings.
    #[error("slot already booked")]
    DuplicateSlot,

    #[error("schedule store unavailable: {0}")]
    Unavailable(String),
}

/// Durable schedule state: business hours, booked slots, appointments and
/// the service catalogue. The Postgres implementation lives in `db::store`;
/// tests use an in-memory double.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn business_hours(&self, barber_id: Uuid) -> Result<BusinessHours, StoreError>;

    /// Booked slot labels for one barber on one date. Implementations must
    /// scope the query to (barber, date) server-side, not filter a full
    /// appointment scan client-side.
    async fn booked_slots(
        &self,
        barber_id: Uuid,
        date: Date,
    ) -> Result<HashSet<TimeOfDay>, StoreError>;

    /// Persist a new appointment, assigning it a fresh id. Must fail with
    /// [`StoreError::DuplicateSlot`] when a committed appointment already
    /// holds the same (barber, date, time), even against a concurrent writer.
    async fn create_appointment(&self, request: &BookingRequest)
        -> Result<Appointment, StoreError>;

    async fn services(&self, barber_id: Uuid) -> Result<Vec<Service>, StoreError>;

    /// Every booking held at one shop, newest first, with service ids
    /// resolved to display names in catalogue order. Callers resolve the
    /// shop before asking; an unknown barber yields an empty list.
    async fn shop_appointments(
        &self,
        barber_id: Uuid,
    ) -> Result<Vec<AppointmentDetails>, StoreError>;
}
