use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{GpsPosition, Ownable, Vehicle, VehicleModelRef};
use crate::utils::validation::{validate_immatriculation, validate_not_empty};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(custom = "validate_immatriculation")]
    pub immatriculation: String,

    #[validate(custom = "validate_not_empty")]
    pub permanent_owner_id: String,

    pub model: VehicleModelRef,

    #[validate]
    pub position_gps: Option<GpsPosition>,
}

// Request para actualizar un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub model: Option<VehicleModelRef>,

    #[validate]
    pub position_gps: Option<GpsPosition>,
}

// Response de vehículo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    #[serde(flatten)]
    pub vehicle: Vehicle,
    pub is_under_maintenance: bool,
    pub current_owner_id: String,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            is_under_maintenance: vehicle.is_under_maintenance(),
            current_owner_id: vehicle.effective_owner(Utc::now()).to_string(),
            vehicle,
        }
    }
}
