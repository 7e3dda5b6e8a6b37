use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use time::Date;
use uuid::Uuid;

use crate::booking::admission::BookingRequest;
use crate::booking::slots::TimeOfDay;
use crate::booking::store::{ScheduleStore, StoreError};
use crate::db::models::{Appointment, AppointmentDetails, BusinessHours, Service};
use crate::db::repositories::{AppointmentRepository, BusinessRepository};

/// Postgres-backed schedule store. The unique index on
/// (barber_id, date, slot_time) provides the conditional-write guarantee
/// admission relies on; a unique violation surfaces as `DuplicateSlot`.
#[derive(Clone)]
pub struct PgScheduleStore {
    pool: PgPool,
}

impl PgScheduleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn store_error(err: sqlx::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn business_hours(&self, barber_id: Uuid) -> Result<BusinessHours, StoreError> {
        BusinessRepository::get_by_id(&self.pool, barber_id)
            .await
            .map_err(store_error)?
            .map(|business| business.opening_hours)
            .ok_or(StoreError::BusinessNotFound)
    }

    async fn booked_slots(
        &self,
        barber_id: Uuid,
        date: Date,
    ) -> Result<HashSet<TimeOfDay>, StoreError> {
        let slots = AppointmentRepository::booked_slots(&self.pool, barber_id, date)
            .await
            .map_err(store_error)?;
        Ok(slots.into_iter().collect())
    }

    async fn create_appointment(
        &self,
        request: &BookingRequest,
    ) -> Result<Appointment, StoreError> {
        AppointmentRepository::create(&self.pool, request)
            .await
            .map_err(|err| match &err {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    StoreError::DuplicateSlot
                }
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    StoreError::BusinessNotFound
                }
                _ => store_error(err),
            })
    }

    async fn services(&self, barber_id: Uuid) -> Result<Vec<Service>, StoreError> {
        // An unknown barber and a barber with no services are different
        // answers, so check existence before listing.
        BusinessRepository::get_by_id(&self.pool, barber_id)
            .await
            .map_err(store_error)?
            .ok_or(StoreError::BusinessNotFound)?;

        BusinessRepository::services(&self.pool, barber_id)
            .await
            .map_err(store_error)
    }

    async fn shop_appointments(
        &self,
        barber_id: Uuid,
    ) -> Result<Vec<AppointmentDetails>, StoreError> {
        AppointmentRepository::list_for_barber(&self.pool, barber_id)
            .await
            .map_err(store_error)
    }
}
