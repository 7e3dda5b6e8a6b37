mod appointment;
mod business;
mod service;

pub use appointment::*;
pub use business::*;
pub use service::*;
