use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::middleware::actor::Actor;
use crate::models::Vehicle;
use crate::repositories::Page;
use crate::routes::resource_routes::create_resource_router;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle))
        .merge(create_resource_router::<Vehicle>())
}

async fn create_vehicle(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.create(request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VehicleResponse>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleResponse>>, AppError> {
    let controller = VehicleController::new(&state);
    let response = controller.update(id, request, actor.as_str()).await?;
    Ok(Json(response))
}
