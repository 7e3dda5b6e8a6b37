use thiserror::Error;

use crate::booking::slots::InvalidTimeFormat;
use crate::booking::store::StoreError;

/// Booking failure taxonomy. Every variant is recoverable by the client:
/// re-select services, refresh availability, sign in, or retry later.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid time label {0:?}, expected HH:MM")]
    InvalidTimeFormat(String),

    #[error("no service selected")]
    NoServiceSelected,

    #[error("time slot is not available")]
    SlotUnavailable,

    #[error("barber not found")]
    BarberNotFound,

    #[error("schedule store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<InvalidTimeFormat> for BookingError {
    fn from(err: InvalidTimeFormat) -> Self {
        BookingError::InvalidTimeFormat(err.0)
    }
}

impl From<StoreError> for BookingError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::BusinessNotFound => BookingError::BarberNotFound,
            StoreError::DuplicateSlot => BookingError::SlotUnavailable,
            StoreError::Unavailable(message) => BookingError::StoreUnavailable(message),
        }
    }
}
