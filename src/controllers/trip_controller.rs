use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::trip_dto::{CreateTripRequest, PassengersRequest, TripResponse};
use crate::models::{Station, Trip, TripDraft, Vehicle, VehicleModel};
use crate::repositories::{JsonRepository, Page, Repository};
use crate::services::assignment_service::{self, SeatAccounting};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct TripController {
    repository: Arc<JsonRepository<Trip>>,
    stations: Arc<JsonRepository<Station>>,
    vehicles: Arc<JsonRepository<Vehicle>>,
    models: Arc<JsonRepository<VehicleModel>>,
}

impl TripController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.trips.clone(),
            stations: state.stations.clone(),
            vehicles: state.vehicles.clone(),
            models: state.vehicle_models.clone(),
        }
    }

    async fn load_vehicle(&self, id: Uuid) -> Result<Vehicle, AppError> {
        self.vehicles
            .get_by_id(&id.to_string())
            .await?
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    async fn load_trip(&self, id: Uuid) -> Result<Trip, AppError> {
        self.repository
            .get_by_id(&id.to_string())
            .await?
            .ok_or_else(|| not_found_error("Trip", &id.to_string()))
    }

    pub async fn create(
        &self,
        request: CreateTripRequest,
        actor: &str,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;

        // Reglas del agregado primero: origen == destino falla siempre
        let trip = Trip::new(TripDraft::from(request), actor)?;

        for station in [trip.from_station, trip.to_station] {
            if self.stations.get_by_id(&station.to_string()).await?.is_none() {
                return Err(not_found_error("Station", &station.to_string()));
            }
        }
        for vehicle_id in &trip.vehicles {
            let vehicle = self.load_vehicle(*vehicle_id).await?;
            assignment_service::ensure_available(&trip, &vehicle)?;
        }

        let trip = self.repository.save(trip).await?;
        tracing::info!(
            "🗓️ Trip {} created: {} -> {} at {}",
            trip.id,
            trip.from_station,
            trip.to_station,
            trip.departure_date_time
        );

        let response = self.with_seats(trip).await?;
        Ok(ApiResponse::success_with_message(
            response,
            "Viaje creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TripResponse, AppError> {
        let trip = self.load_trip(id).await?;
        self.with_seats(trip).await
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<TripResponse>, AppError> {
        let page = self
            .repository
            .get_all(
                query.filter.as_deref().unwrap_or(""),
                query.offset.unwrap_or(0),
                query.sort.as_deref(),
                query.direction,
            )
            .await?;

        Ok(Page {
            items: page.items.into_iter().map(TripResponse::from).collect(),
            new_offset: page.new_offset,
            total_count: page.total_count,
        })
    }

    /// Borrar un viaje nunca afecta a los vehículos referenciados
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(&id.to_string()).await? {
            return Err(not_found_error("Trip", &id.to_string()));
        }
        tracing::info!("🗑️ Trip {} deleted", id);
        Ok(())
    }

    pub async fn add_vehicle(
        &self,
        id: Uuid,
        vehicle_id: Uuid,
        actor: &str,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        let vehicle = self.load_vehicle(vehicle_id).await?;
        let (trip, added) = self
            .repository
            .update_with(&id.to_string(), |t| {
                assignment_service::assign_vehicle(t, &vehicle, actor)
            })
            .await?;

        let message = if added {
            "Vehículo asignado al viaje"
        } else {
            "El vehículo ya estaba asignado"
        };
        let response = self.with_seats(trip).await?;
        Ok(ApiResponse::success_with_message(response, message.to_string()))
    }

    pub async fn remove_vehicle(
        &self,
        id: Uuid,
        vehicle_id: Uuid,
        actor: &str,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        let (trip, _) = self
            .repository
            .update_with(&id.to_string(), |t| Ok(t.remove_vehicle(vehicle_id, actor)))
            .await?;

        let response = self.with_seats(trip).await?;
        Ok(ApiResponse::success(response))
    }

    pub async fn update_departure(
        &self,
        id: Uuid,
        departure: DateTime<Utc>,
        actor: &str,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        let vehicles = self.assigned_vehicles(&self.load_trip(id).await?).await?;
        let (trip, _) = self
            .repository
            .update_with(&id.to_string(), |t| {
                assignment_service::reschedule(t, &vehicles, |t| t.update_departure(departure, actor))
            })
            .await?;
        Ok(ApiResponse::success(trip.into()))
    }

    pub async fn update_arrival(
        &self,
        id: Uuid,
        arrival: DateTime<Utc>,
        actor: &str,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        let vehicles = self.assigned_vehicles(&self.load_trip(id).await?).await?;
        let (trip, _) = self
            .repository
            .update_with(&id.to_string(), |t| {
                assignment_service::reschedule(t, &vehicles, |t| t.update_arrival(arrival, actor))
            })
            .await?;
        Ok(ApiResponse::success(trip.into()))
    }

    pub async fn update_passengers(
        &self,
        id: Uuid,
        request: PassengersRequest,
        actor: &str,
    ) -> Result<ApiResponse<TripResponse>, AppError> {
        request.validate()?;
        let (trip, _) = self
            .repository
            .update_with(&id.to_string(), |t| {
                t.update_passenger_count(request.passengers_count, actor)
            })
            .await?;

        let response = self.with_seats(trip).await?;
        if response.seats.as_ref().map_or(false, |s| s.overbooked) {
            tracing::warn!("⚠️ Trip {} is overbooked", id);
        }
        Ok(ApiResponse::success(response))
    }

    pub async fn seats(&self, id: Uuid) -> Result<SeatAccounting, AppError> {
        let trip = self.load_trip(id).await?;
        self.accounting(&trip).await
    }

    // Referencia débil: los vehículos ya borrados simplemente no aparecen
    async fn assigned_vehicles(&self, trip: &Trip) -> Result<Vec<Vehicle>, AppError> {
        let mut vehicles = Vec::with_capacity(trip.vehicles.len());
        for id in &trip.vehicles {
            if let Some(vehicle) = self.vehicles.get_by_id(&id.to_string()).await? {
                vehicles.push(vehicle);
            }
        }
        Ok(vehicles)
    }

    async fn accounting(&self, trip: &Trip) -> Result<SeatAccounting, AppError> {
        let vehicles = self.assigned_vehicles(trip).await?;
        let models = self.models.all().await;
        Ok(assignment_service::seat_accounting(trip, &vehicles, &models))
    }

    async fn with_seats(&self, trip: Trip) -> Result<TripResponse, AppError> {
        let seats = self.accounting(&trip).await?;
        Ok(TripResponse {
            trip,
            seats: Some(seats),
        })
    }
}
