mod appointment_repository;
mod business_repository;

pub use appointment_repository::AppointmentRepository;
pub use business_repository::BusinessRepository;
