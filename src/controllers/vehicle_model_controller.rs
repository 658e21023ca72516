use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::vehicle_model_dto::{CreateVehicleModelRequest, SeatMapResponse, VehicleModelResponse};
use crate::models::VehicleModel;
use crate::repositories::{JsonRepository, Page, Repository};
use crate::services::seat_layout_service::{compute_seat_numbers, LayoutEdit, SeatLayout};
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct VehicleModelController {
    repository: Arc<JsonRepository<VehicleModel>>,
}

impl VehicleModelController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.vehicle_models.clone(),
        }
    }

    pub async fn create(
        &self,
        request: CreateVehicleModelRequest,
        actor: &str,
    ) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        request.validate()?;

        // Se acepta la matriz del editor o la máscara ya aplanada, no ambas
        let layout = match (&request.matrix, &request.seat_bitmask, request.cells_per_row) {
            (Some(matrix), None, None) => SeatLayout::from_matrix(matrix)?,
            (None, Some(bitmask), Some(cells_per_row)) => SeatLayout::parse(bitmask, cells_per_row)?,
            _ => {
                return Err(bad_request_error(
                    "Provide either `matrix` or `seatBitmask` + `cellsPerRow`",
                ))
            }
        };

        let model = VehicleModel::new(
            request.manufacturer.trim().to_string(),
            request.model_name.trim().to_string(),
            request.fuel_type,
            layout,
            actor,
        );
        let model = self.repository.save(model).await?;

        tracing::info!(
            "💺 Vehicle model {} {} created with {} seats",
            model.manufacturer,
            model.model_name,
            model.number_seats()
        );
        Ok(ApiResponse::success_with_message(
            model.into(),
            "Modelo creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<VehicleModelResponse, AppError> {
        self.repository
            .get_by_id(&id.to_string())
            .await?
            .map(VehicleModelResponse::from)
            .ok_or_else(|| not_found_error("VehicleModel", &id.to_string()))
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<VehicleModelResponse>, AppError> {
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
            items: page.items.into_iter().map(VehicleModelResponse::from).collect(),
            new_offset: page.new_offset,
            total_count: page.total_count,
        })
    }

    /// Plano numerado reconstruido desde la máscara
    pub async fn seat_map(&self, id: Uuid) -> Result<SeatMapResponse, AppError> {
        let model = self
            .repository
            .get_by_id(&id.to_string())
            .await?
            .ok_or_else(|| not_found_error("VehicleModel", &id.to_string()))?;

        let matrix = model.matrix()?;
        Ok(SeatMapResponse {
            model_id: model.id,
            number_seats: model.number_seats(),
            rows: model.layout.rows(),
            cells_per_row: model.layout.cells_per_row,
            seat_numbers: compute_seat_numbers(&matrix),
            matrix,
        })
    }

    pub async fn apply_edit(
        &self,
        id: Uuid,
        edit: LayoutEdit,
        actor: &str,
    ) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        let (model, _) = self
            .repository
            .update_with(&id.to_string(), |m| m.apply_layout_edit(edit, actor))
            .await?;

        tracing::debug!("✏️ Layout edit {:?} applied to model {}", edit, id);
        Ok(ApiResponse::success(model.into()))
    }

    pub async fn replace_layout(
        &self,
        id: Uuid,
        matrix: Vec<Vec<u8>>,
        actor: &str,
    ) -> Result<ApiResponse<VehicleModelResponse>, AppError> {
        let (model, _) = self
            .repository
            .update_with(&id.to_string(), |m| m.replace_layout(&matrix, actor))
            .await?;

        Ok(ApiResponse::success_with_message(
            model.into(),
            "Distribución guardada".to_string(),
        ))
    }
}
