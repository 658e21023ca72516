use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::{Resource, Vehicle, VehicleModel, VehicleModelRef};
use crate::repositories::{JsonRepository, Page, Repository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalize_immatriculation;

pub struct VehicleController {
    repository: Arc<JsonRepository<Vehicle>>,
    models: Arc<JsonRepository<VehicleModel>>,
}

impl VehicleController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.vehicles.clone(),
            models: state.vehicle_models.clone(),
        }
    }

    async fn ensure_model_exists(&self, model: &VehicleModelRef) -> Result<(), AppError> {
        if let Some(id) = model.catalog_id() {
            if self.models.get_by_id(&id.to_string()).await?.is_none() {
                return Err(not_found_error("VehicleModel", &id.to_string()));
            }
        }
        Ok(())
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
        actor: &str,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;

        self.ensure_model_exists(&request.model).await?;

        // La matrícula es única en toda la agencia
        let immatriculation = normalize_immatriculation(&request.immatriculation);
        let resource = Resource::new(&request.permanent_owner_id, actor)?;
        let vehicle = self
            .repository
            .save_unique(
                Vehicle::new(resource, immatriculation.clone(), request.model, request.position_gps),
                "immatriculation",
                &immatriculation,
            )
            .await?;

        tracing::info!("🚌 Vehicle {} created by {}", vehicle.immatriculation, actor);
        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleResponse, AppError> {
        self.repository
            .get_by_id(&id.to_string())
            .await?
            .map(VehicleResponse::from)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<VehicleResponse>, AppError> {
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
            items: page.items.into_iter().map(VehicleResponse::from).collect(),
            new_offset: page.new_offset,
            total_count: page.total_count,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: UpdateVehicleRequest,
        actor: &str,
    ) -> Result<ApiResponse<VehicleResponse>, AppError> {
        request.validate()?;
        if let Some(model) = &request.model {
            self.ensure_model_exists(model).await?;
        }

        let (vehicle, _) = self
            .repository
            .update_with(&id.to_string(), |v| {
                if let Some(model) = request.model {
                    v.change_model(model, actor);
                }
                if let Some(position) = request.position_gps {
                    v.update_position(position, actor);
                }
                Ok(())
            })
            .await?;

        Ok(ApiResponse::success_with_message(
            vehicle.into(),
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }
}
