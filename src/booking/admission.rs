use time::Date;
use tracing::info;
use uuid::Uuid;

use crate::booking::availability::AvailabilityResolver;
use crate::booking::error::BookingError;
use crate::booking::slots::TimeOfDay;
use crate::booking::store::ScheduleStore;
use crate::db::models::Appointment;

/// A booking request as it reaches admission: the identity of the requester
/// is injected by the caller, never read from ambient session state.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub barber_id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub time: TimeOfDay,
    pub service_ids: Vec<Uuid>,
}

/// Decides whether a booking request commits. Validation order: services
/// selected, then slot currently available, then the conditional store
/// insert.
#[derive(Debug, Clone, Copy)]
pub struct BookingAdmission {
    resolver: AvailabilityResolver,
}

impl BookingAdmission {
    pub fn new(resolver: AvailabilityResolver) -> Self {
        Self { resolver }
    }

    pub async fn admit<S: ScheduleStore>(
        &self,
        store: &S,
        request: &BookingRequest,
    ) -> Result<Appointment, BookingError> {
        if request.service_ids.is_empty() {
            return Err(BookingError::NoServiceSelected);
        }

        let available = self
            .resolver
            .available_times(store, request.barber_id, request.date)
            .await?;
        if !available.contains(&request.time) {
            return Err(BookingError::SlotUnavailable);
        }

        // The availability read above is advisory: a concurrent request may
        // have taken the slot since. The store's uniqueness guarantee on
        // (barber, date, time) is the arbiter; losing it reads back as
        // SlotUnavailable, same as losing the advisory check.
        let appointment = store.create_appointment(request).await?;

        info!(
            appointment_id = %appointment.id,
            barber_id = %appointment.barber_id,
            user_id = %appointment.user_id,
            date = %appointment.date,
            time = %appointment.time,
            "appointment committed"
        );
        Ok(appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::slots::DEFAULT_SLOT_MINUTES;
    use crate::booking::testutil::MemoryStore;
    use crate::db::models::{BusinessHours, DayHours};
    use std::collections::HashSet;
    use std::sync::Arc;
    use time::{Month, Weekday};

    fn a_monday() -> Date {
        Date::from_calendar_date(2024, Month::June, 24).unwrap()
    }

    fn monday_nine_to_eleven() -> BusinessHours {
        let mut hours = BusinessHours::new();
        hours.set(Weekday::Monday, DayHours::new("09:00", "11:00"));
        hours
    }

    fn admission() -> BookingAdmission {
        BookingAdmission::new(AvailabilityResolver::new(DEFAULT_SLOT_MINUTES))
    }

    fn request(barber_id: Uuid, time: &str, service_ids: Vec<Uuid>) -> BookingRequest {
        BookingRequest {
            barber_id,
            user_id: Uuid::new_v4(),
            date: a_monday(),
            time: time.parse().unwrap(),
            service_ids,
        }
    }

    #[tokio::test]
    async fn empty_service_selection_is_rejected_before_availability() {
        // No barber seeded at all: the services check must fire first.
        let store = MemoryStore::new();
        let result = admission()
            .admit(&store, &request(Uuid::new_v4(), "09:00", vec![]))
            .await;
        assert!(matches!(result, Err(BookingError::NoServiceSelected)));
    }

    #[tokio::test]
    async fn slot_outside_opening_hours_is_rejected() {
        let store = MemoryStore::new();
        let barber_id = store.add_barber(monday_nine_to_eleven()).await;
        let result = admission()
            .admit(&store, &request(barber_id, "12:00", vec![Uuid::new_v4()]))
            .await;
        assert!(matches!(result, Err(BookingError::SlotUnavailable)));
    }

    #[tokio::test]
    async fn already_booked_slot_is_rejected() {
        let store = MemoryStore::new();
        let barber_id = store.add_barber(monday_nine_to_eleven()).await;
        store.seed_appointment(barber_id, a_monday(), "09:30").await;

        let result = admission()
            .admit(&store, &request(barber_id, "09:30", vec![Uuid::new_v4()]))
            .await;
        assert!(matches!(result, Err(BookingError::SlotUnavailable)));
    }

    #[tokio::test]
    async fn committed_appointment_round_trips_through_the_store() {
        let store = MemoryStore::new();
        let barber_id = store.add_barber(monday_nine_to_eleven()).await;
        let services = vec![Uuid::new_v4(), Uuid::new_v4()];

        let committed = admission()
            .admit(&store, &request(barber_id, "10:00", services.clone()))
            .await
            .unwrap();

        let fetched = store.appointment_by_id(committed.id).await.unwrap();
        assert_eq!(fetched.barber_id, barber_id);
        assert_eq!(fetched.date, a_monday());
        assert_eq!(fetched.time.to_string(), "10:00");
        assert_eq!(
            fetched.service_ids.iter().collect::<HashSet<_>>(),
            services.iter().collect::<HashSet<_>>()
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn concurrent_requests_for_one_slot_admit_exactly_one() {
        let store = Arc::new(MemoryStore::new());
        let barber_id = store.add_barber(monday_nine_to_eleven()).await;
        let admission = admission();

        let first = request(barber_id, "09:00", vec![Uuid::new_v4()]);
        let second = request(barber_id, "09:00", vec![Uuid::new_v4()]);

        // MemoryStore yields between the availability read and the insert,
        // so both requests observe the slot as free before either commits.
        let (a, b) = tokio::join!(
            admission.admit(store.as_ref(), &first),
            admission.admit(store.as_ref(), &second),
        );

        let commits = usize::from(a.is_ok()) + usize::from(b.is_ok());
        assert_eq!(commits, 1, "exactly one of the racing requests must commit");

        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(loser, Err(BookingError::SlotUnavailable)));
    }
}
