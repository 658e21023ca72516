//! Datos de demostración
//!
//! Con `SEED_DEMO_DATA=true` y colecciones vacías se crean dos estaciones,
//! el modelo de autocar 15x6 y un vehículo de ese modelo.

use crate::models::{FuelType, GpsPosition, Resource, Station, Vehicle, VehicleModel, VehicleModelRef};
use crate::repositories::Repository;
use crate::services::seat_layout_service::{coach_15x6, SeatLayout};
use crate::state::AppState;
use crate::utils::errors::AppResult;

const SEED_ACTOR: &str = "seed";

/// Devuelve `true` si se insertaron datos
pub async fn seed_demo_data(state: &AppState) -> AppResult<bool> {
    if state.stations.count().await > 0 || state.vehicle_models.count().await > 0 {
        log::info!("🌱 Collections already populated, skipping demo data");
        return Ok(false);
    }

    let depot = state
        .stations
        .save(Station::new(
            "Gare Routière Centrale".to_string(),
            "Lyon".to_string(),
            Some(GpsPosition { latitude: 45.7606, longitude: 4.8597 }),
            SEED_ACTOR,
        ))
        .await?;
    state
        .stations
        .save(Station::new(
            "Terminal Nord".to_string(),
            "Villeurbanne".to_string(),
            None,
            SEED_ACTOR,
        ))
        .await?;

    let coach = state
        .vehicle_models
        .save(VehicleModel::new(
            "Irisbus".to_string(),
            "Crossway".to_string(),
            FuelType::Diesel,
            SeatLayout::from_matrix(&coach_15x6())?,
            SEED_ACTOR,
        ))
        .await?;

    let vehicle = Vehicle::new(
        Resource::new(&depot.owner_id(), SEED_ACTOR)?,
        "AB-123-CD".to_string(),
        VehicleModelRef::Catalog(coach.id),
        depot.position_gps,
    );
    state.vehicles.save(vehicle).await?;

    log::info!(
        "🌱 Demo data seeded: 2 stations, model '{}' ({} seats), 1 vehicle",
        coach.model_name,
        coach.number_seats()
    );
    Ok(true)
}
