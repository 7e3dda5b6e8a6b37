pub mod appointments;
pub mod barbers;
pub mod business;
