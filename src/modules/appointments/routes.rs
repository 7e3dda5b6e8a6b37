use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_appointment, get_appointment, list_my_appointments};
use crate::app_state::AppState;

pub fn appointment_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_appointment).get(list_my_appointments))
        .route("/:id", get(get_appointment))
}
