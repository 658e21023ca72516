use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{GpsPosition, Station};

// Request para crear o actualizar una estación
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StationRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 2, max = 100))]
    pub city: String,

    #[validate]
    pub position_gps: Option<GpsPosition>,
}

// Response de estación
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResponse {
    #[serde(flatten)]
    pub station: Station,
    pub owner_id: String,
}

impl From<Station> for StationResponse {
    fn from(station: Station) -> Self {
        Self {
            owner_id: station.owner_id(),
            station,
        }
    }
}
