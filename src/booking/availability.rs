use time::Date;
use tracing::warn;
use uuid::Uuid;

use crate::booking::error::BookingError;
use crate::booking::slots::{generate_slots, TimeOfDay};
use crate::booking::store::ScheduleStore;
use crate::db::models::weekday_name;

/// Computes the bookable slot labels for a barber on a date: generate the
/// weekday's slot grid from opening hours, then subtract slots already held
/// by committed appointments.
#[derive(Debug, Clone, Copy)]
pub struct AvailabilityResolver {
    slot_minutes: u16,
}

impl AvailabilityResolver {
    pub fn new(slot_minutes: u16) -> Self {
        Self { slot_minutes }
    }

    /// Available slot start labels, in grid order.
    ///
    /// A weekday with no configured hours is an ordinary closed day and
    /// yields an empty list, not an error. Malformed stored hours also yield
    /// an empty list; the defect is logged rather than surfaced to the
    /// booking client.
    pub async fn available_times<S: ScheduleStore>(
        &self,
        store: &S,
        barber_id: Uuid,
        date: Date,
    ) -> Result<Vec<TimeOfDay>, BookingError> {
        let hours = store.business_hours(barber_id).await?;

        let weekday = date.weekday();
        let Some(day) = hours.for_weekday(weekday) else {
            return Ok(Vec::new());
        };
        if day.is_closed() {
            return Ok(Vec::new());
        }

        let (opening, closing) = match day.window() {
            Ok(window) => window,
            Err(err) => {
                warn!(
                    %barber_id,
                    day = weekday_name(weekday),
                    error = %err,
                    "malformed opening hours, treating day as closed"
                );
                return Ok(Vec::new());
            }
        };

        let slots = generate_slots(opening, closing, self.slot_minutes);
        if slots.is_empty() {
            return Ok(slots);
        }

        let booked = store.booked_slots(barber_id, date).await?;
        Ok(slots.into_iter().filter(|slot| !booked.contains(slot)).collect())
    }
}
