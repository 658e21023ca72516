use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Trip, TripDraft};
use crate::services::assignment_service::SeatAccounting;

// Límite superior del contador de pasajeros
const MAX_PASSENGERS: i64 = u32::MAX as i64;

// Request para crear un viaje
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub from_station: Uuid,
    pub to_station: Uuid,
    #[serde(default)]
    pub vehicles: Vec<Uuid>,
    pub departure_date_time: DateTime<Utc>,
    pub arrival_date_time: Option<DateTime<Utc>>,
    #[serde(default)]
    #[validate(range(max = "MAX_PASSENGERS"))]
    pub passengers_count: i64,
}

impl From<CreateTripRequest> for TripDraft {
    fn from(request: CreateTripRequest) -> Self {
        Self {
            from_station: request.from_station,
            to_station: request.to_station,
            vehicles: request.vehicles,
            departure_date_time: request.departure_date_time,
            arrival_date_time: request.arrival_date_time,
            passengers_count: request.passengers_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddVehicleRequest {
    pub vehicle_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRequest {
    pub departure_date_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalRequest {
    pub arrival_date_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PassengersRequest {
    #[validate(range(max = "MAX_PASSENGERS"))]
    pub passengers_count: i64,
}

// Response de viaje con el balance de plazas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripResponse {
    #[serde(flatten)]
    pub trip: Trip,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seats: Option<SeatAccounting>,
}

impl From<Trip> for TripResponse {
    fn from(trip: Trip) -> Self {
        Self { trip, seats: None }
    }
}
