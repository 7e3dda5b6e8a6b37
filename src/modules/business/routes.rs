use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{get_profile, list_shop_appointments, replace_services, update_profile};
use crate::app_state::AppState;

pub fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/services", put(replace_services))
        .route("/appointments", get(list_shop_appointments))
}
