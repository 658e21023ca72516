//! Rutas HTTP
//!
//! Cada recurso expone un router que se anida bajo `/api/...`.

pub mod driver_routes;
pub mod resource_routes;
pub mod station_routes;
pub mod trip_routes;
pub mod vehicle_model_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);
    Router::new()
        .route("/health", get(health))
        .nest("/api/stations", station_routes::create_station_router())
        .nest("/api/vehicle-models", vehicle_model_routes::create_vehicle_model_router())
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/trips", trip_routes::create_trip_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "transit-agency",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
