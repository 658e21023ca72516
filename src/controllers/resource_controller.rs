//! Operaciones de propiedad y mantenimiento comunes a vehículos y conductores

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::driver_dto::DriverResponse;
use crate::dto::resource_dto::{
    AvailabilityResponse, MaintenanceRequest, OwnerResponse, TemporaryOwnershipRequest,
    TransferOwnershipRequest,
};
use crate::dto::vehicle_dto::VehicleResponse;
use crate::models::{Driver, Ownable, Trip, Vehicle};
use crate::repositories::{Entity, JsonRepository, Repository};
use crate::services::assignment_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

/// Colección de recursos poseíbles accesible desde el estado
pub trait ResourceCollection: Entity + Ownable {
    const LABEL: &'static str;

    /// Forma expuesta por la API, con los campos derivados
    type Response: Serialize + From<Self> + Send + 'static;

    fn repository(state: &AppState) -> Arc<JsonRepository<Self>>;
}

impl ResourceCollection for Vehicle {
    const LABEL: &'static str = "Vehicle";
    type Response = VehicleResponse;

    fn repository(state: &AppState) -> Arc<JsonRepository<Self>> {
        state.vehicles.clone()
    }
}

impl ResourceCollection for Driver {
    const LABEL: &'static str = "Driver";
    type Response = DriverResponse;

    fn repository(state: &AppState) -> Arc<JsonRepository<Self>> {
        state.drivers.clone()
    }
}

pub struct ResourceController<T: ResourceCollection> {
    repository: Arc<JsonRepository<T>>,
    trips: Arc<JsonRepository<Trip>>,
}

impl<T: ResourceCollection> ResourceController<T> {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: T::repository(state),
            trips: state.trips.clone(),
        }
    }

    async fn load(&self, id: Uuid) -> Result<T, AppError> {
        self.repository
            .get_by_id(&id.to_string())
            .await?
            .ok_or_else(|| not_found_error(T::LABEL, &id.to_string()))
    }

    pub async fn assign_temporary_ownership(
        &self,
        id: Uuid,
        request: TemporaryOwnershipRequest,
        actor: &str,
    ) -> Result<ApiResponse<T::Response>, AppError> {
        request.validate()?;
        let (resource, _) = self
            .repository
            .update_with(&id.to_string(), |r| {
                r.assign_temporary_ownership(&request.owner_id, request.start, request.end, actor)
            })
            .await?;

        tracing::info!(
            "🔁 {} {} lent to '{}' from {} to {}",
            T::LABEL,
            id,
            request.owner_id,
            request.start,
            request.end
        );
        Ok(ApiResponse::success_with_message(
            resource.into(),
            "Propiedad temporal asignada".to_string(),
        ))
    }

    pub async fn clear_temporary_ownership(&self, id: Uuid, actor: &str) -> Result<ApiResponse<T::Response>, AppError> {
        let (resource, _) = self
            .repository
            .update_with(&id.to_string(), |r| {
                r.clear_temporary_ownership(actor);
                Ok(())
            })
            .await?;

        tracing::info!("↩️ {} {} back to its permanent owner", T::LABEL, id);
        Ok(ApiResponse::success(resource.into()))
    }

    pub async fn set_maintenance(
        &self,
        id: Uuid,
        request: MaintenanceRequest,
        actor: &str,
    ) -> Result<ApiResponse<T::Response>, AppError> {
        // Viajes que ya cuentan con este recurso
        let trips: Vec<Trip> = self
            .trips
            .all()
            .await
            .into_iter()
            .filter(|t| t.has_vehicle(id))
            .collect();

        let (resource, _) = self
            .repository
            .update_with(&id.to_string(), |r| {
                r.set_maintenance_status(request.is_under_maintenance, request.start, request.end, actor)?;
                assignment_service::ensure_free_for_trips(&*r, &trips)
            })
            .await?;

        tracing::info!(
            "🔧 {} {} maintenance = {}",
            T::LABEL,
            id,
            request.is_under_maintenance
        );
        Ok(ApiResponse::success(resource.into()))
    }

    pub async fn transfer(
        &self,
        id: Uuid,
        request: TransferOwnershipRequest,
        actor: &str,
    ) -> Result<ApiResponse<T::Response>, AppError> {
        request.validate()?;
        let (resource, _) = self
            .repository
            .update_with(&id.to_string(), |r| {
                r.transfer_permanent_ownership(&request.new_owner_id, actor)
            })
            .await?;

        tracing::info!("🏢 {} {} transferred to '{}'", T::LABEL, id, request.new_owner_id);
        Ok(ApiResponse::success_with_message(
            resource.into(),
            "Propietario permanente actualizado".to_string(),
        ))
    }

    pub async fn owner_at(&self, id: Uuid, at: Option<DateTime<Utc>>) -> Result<OwnerResponse, AppError> {
        let resource = self.load(id).await?;
        Ok(OwnerResponse::for_resource(&resource, at.unwrap_or_else(Utc::now)))
    }

    pub async fn availability(
        &self,
        id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<AvailabilityResponse, AppError> {
        let resource = self.load(id).await?;
        Ok(AvailabilityResponse::for_resource(&resource, from, to))
    }
}
