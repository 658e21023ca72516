//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: la configuración y un repositorio por
//! colección.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::models::{Driver, Station, Trip, Vehicle, VehicleModel};
use crate::repositories::JsonRepository;
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub stations: Arc<JsonRepository<Station>>,
    pub vehicle_models: Arc<JsonRepository<VehicleModel>>,
    pub vehicles: Arc<JsonRepository<Vehicle>>,
    pub drivers: Arc<JsonRepository<Driver>>,
    pub trips: Arc<JsonRepository<Trip>>,
}

impl AppState {
    /// Abre todas las colecciones bajo `config.data_dir`
    pub async fn open(config: EnvironmentConfig) -> AppResult<Self> {
        let dir = config.data_dir.clone();
        let page = config.page_offset;
        Ok(Self {
            stations: Arc::new(JsonRepository::open(&dir, page).await?),
            vehicle_models: Arc::new(JsonRepository::open(&dir, page).await?),
            vehicles: Arc::new(JsonRepository::open(&dir, page).await?),
            drivers: Arc::new(JsonRepository::open(&dir, page).await?),
            trips: Arc::new(JsonRepository::open(&dir, page).await?),
            config,
        })
    }
}
