//! Capa de persistencia
//!
//! Contrato que el núcleo espera del almacenamiento externo y su
//! implementación sobre ficheros JSON.

pub mod json_repository;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::models::{Driver, Ownable, Station, Trip, Vehicle, VehicleModel};
use crate::utils::errors::AppResult;

pub use json_repository::{JsonRepository, SortDirection};

/// Entidad persistible en una colección JSON
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Nombre de la colección (y del fichero)
    const COLLECTION: &'static str;
    /// Campo JSON que actúa como clave
    const KEY_FIELD: &'static str;

    fn key(&self) -> String;
}

/// Página de resultados de `get_all`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub new_offset: usize,
    pub total_count: usize,
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn save(&self, entity: T) -> AppResult<T>;

    /// Sustituye la entidad cuyo `key_field` vale `key_value`
    async fn update(&self, key_field: &str, key_value: &str, entity: T) -> AppResult<()>;

    async fn get_by_id(&self, id: &str) -> AppResult<Option<T>>;

    async fn get_all(
        &self,
        filter_text: &str,
        offset: usize,
        sort_field: Option<&str>,
        sort_direction: Option<SortDirection>,
    ) -> AppResult<Page<T>>;
}

impl Entity for Station {
    const COLLECTION: &'static str = "stations";
    const KEY_FIELD: &'static str = "id";

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Entity for VehicleModel {
    const COLLECTION: &'static str = "vehicle_models";
    const KEY_FIELD: &'static str = "id";

    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Entity for Vehicle {
    const COLLECTION: &'static str = "vehicles";
    const KEY_FIELD: &'static str = "resourceId";

    fn key(&self) -> String {
        self.resource_id().to_string()
    }
}

impl Entity for Driver {
    const COLLECTION: &'static str = "drivers";
    const KEY_FIELD: &'static str = "resourceId";

    fn key(&self) -> String {
        self.resource_id().to_string()
    }
}

impl Entity for Trip {
    const COLLECTION: &'static str = "trips";
    const KEY_FIELD: &'static str = "id";

    fn key(&self) -> String {
        self.id.to_string()
    }
}
