use axum::{middleware, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use crate::{
    app_state::AppState,
    middleware::tracing::observability_middleware,
    modules::{
        appointments::routes::appointment_routes, barbers::routes::barber_routes,
        business::routes::business_routes,
    },
};

pub fn create_router(state: AppState) -> Router {
    // Production traffic comes from native clients that send no Origin
    // header; the permissive layer is for browser-based development tooling.
    let cors = if state.env.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/", get(hello))
        .route("/health", get(health_check))
        .nest("/barbers", barber_routes())
        .nest("/appointments", appointment_routes())
        .nest("/business", business_routes())
        .layer(middleware::from_fn(observability_middleware))
        .layer(cors)
        .with_state(state)
}

async fn hello() -> &'static str {
    "Barberease Backend says hello!\n"
}

async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    let db_result = sqlx::query("SELECT 1").execute(&state.db).await;

    let db_status = match db_result {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::info!("Database health check failed: {}", e);
            "unhealthy"
        }
    };

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "services": {
            "database": db_status
        }
    }))
}
