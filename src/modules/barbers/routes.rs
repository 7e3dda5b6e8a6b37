use axum::{routing::get, Router};

use super::handlers::{barber_availability, barber_services, get_barber, list_barbers};
use crate::app_state::AppState;

pub fn barber_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_barbers))
        .route("/:id", get(get_barber))
        .route("/:id/services", get(barber_services))
        .route("/:id/availability", get(barber_availability))
}
