use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{FuelType, VehicleModel};
use crate::services::seat_layout_service::{SeatMatrix, SeatNumbers};

// Request para crear un modelo: matriz del editor o máscara ya aplanada
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleModelRequest {
    #[validate(length(min = 2, max = 100))]
    pub manufacturer: String,

    #[validate(length(min = 1, max = 100))]
    pub model_name: String,

    pub fuel_type: FuelType,

    pub matrix: Option<SeatMatrix>,
    pub seat_bitmask: Option<String>,
    pub cells_per_row: Option<usize>,
}

// Request para guardar la matriz completa del editor
#[derive(Debug, Deserialize)]
pub struct ReplaceLayoutRequest {
    pub matrix: SeatMatrix,
}

// Response de modelo con los campos derivados
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModelResponse {
    #[serde(flatten)]
    pub model: VehicleModel,
    pub number_seats: u32,
    pub rows: usize,
}

impl From<VehicleModel> for VehicleModelResponse {
    fn from(model: VehicleModel) -> Self {
        Self {
            number_seats: model.number_seats(),
            rows: model.layout.rows(),
            model,
        }
    }
}

// Plano de asientos numerado para el editor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatMapResponse {
    pub model_id: Uuid,
    pub number_seats: u32,
    pub rows: usize,
    pub cells_per_row: usize,
    pub matrix: SeatMatrix,
    pub seat_numbers: SeatNumbers,
}
