//! Slot computation and booking admission.
//!
//! The only stateful collaborator is the [`store::ScheduleStore`] trait; the
//! resolver and admission logic are store-agnostic so they can be exercised
//! against the in-memory double in tests and Postgres in production.

pub mod admission;
pub mod availability;
pub mod error;
pub mod slots;
pub mod store;

#[cfg(test)]
pub mod testutil;

pub use admission::{BookingAdmission, BookingRequest};
pub use availability::AvailabilityResolver;
pub use error::BookingError;
