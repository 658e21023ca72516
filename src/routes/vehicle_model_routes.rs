use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_model_controller::VehicleModelController;
use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::vehicle_model_dto::{
    CreateVehicleModelRequest, ReplaceLayoutRequest, SeatMapResponse, VehicleModelResponse,
};
use crate::middleware::actor::Actor;
use crate::repositories::Page;
use crate::services::seat_layout_service::LayoutEdit;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_model_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_models).post(create_model))
        .route("/:id", get(get_model))
        .route("/:id/seats", get(seat_map))
        .route("/:id/layout", put(replace_layout))
        .route("/:id/layout/edit", post(apply_edit))
}

async fn create_model(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateVehicleModelRequest>,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller.create(request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn get_model(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleModelResponse>, AppError> {
    let controller = VehicleModelController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_models(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn seat_map(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatMapResponse>, AppError> {
    let controller = VehicleModelController::new(&state);
    Ok(Json(controller.seat_map(id).await?))
}

async fn apply_edit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(edit): Json<LayoutEdit>,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller.apply_edit(id, edit, actor.as_str()).await?;
    Ok(Json(response))
}

async fn replace_layout(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<ReplaceLayoutRequest>,
) -> Result<Json<ApiResponse<VehicleModelResponse>>, AppError> {
    let controller = VehicleModelController::new(&state);
    let response = controller
        .replace_layout(id, request.matrix, actor.as_str())
        .await?;
    Ok(Json(response))
}
