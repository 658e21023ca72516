//! Rutas de propiedad/mantenimiento montadas bajo `/api/vehicles` y `/api/drivers`

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::resource_controller::{ResourceCollection, ResourceController};
use crate::dto::common_dto::ApiResponse;
use crate::dto::resource_dto::{
    AvailabilityQuery, AvailabilityResponse, MaintenanceRequest, OwnerQuery, OwnerResponse,
    TemporaryOwnershipRequest, TransferOwnershipRequest,
};
use crate::middleware::actor::Actor;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_resource_router<T: ResourceCollection>() -> Router<AppState> {
    Router::new()
        .route(
            "/:id/temporary-ownership",
            post(assign_temporary_ownership::<T>).delete(clear_temporary_ownership::<T>),
        )
        .route("/:id/maintenance", put(set_maintenance::<T>))
        .route("/:id/transfer", put(transfer::<T>))
        .route("/:id/owner", get(owner_at::<T>))
        .route("/:id/availability", get(availability::<T>))
}

async fn assign_temporary_ownership<T: ResourceCollection>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<TemporaryOwnershipRequest>,
) -> Result<Json<ApiResponse<T::Response>>, AppError> {
    let controller = ResourceController::<T>::new(&state);
    let response = controller
        .assign_temporary_ownership(id, request, actor.as_str())
        .await?;
    Ok(Json(response))
}

async fn clear_temporary_ownership<T: ResourceCollection>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
) -> Result<Json<ApiResponse<T::Response>>, AppError> {
    let controller = ResourceController::<T>::new(&state);
    let response = controller.clear_temporary_ownership(id, actor.as_str()).await?;
    Ok(Json(response))
}

async fn set_maintenance<T: ResourceCollection>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<MaintenanceRequest>,
) -> Result<Json<ApiResponse<T::Response>>, AppError> {
    let controller = ResourceController::<T>::new(&state);
    let response = controller.set_maintenance(id, request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn transfer<T: ResourceCollection>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<TransferOwnershipRequest>,
) -> Result<Json<ApiResponse<T::Response>>, AppError> {
    let controller = ResourceController::<T>::new(&state);
    let response = controller.transfer(id, request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn owner_at<T: ResourceCollection>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<OwnerQuery>,
) -> Result<Json<OwnerResponse>, AppError> {
    let controller = ResourceController::<T>::new(&state);
    Ok(Json(controller.owner_at(id, query.at).await?))
}

async fn availability<T: ResourceCollection>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let controller = ResourceController::<T>::new(&state);
    Ok(Json(controller.availability(id, query.from, query.to).await?))
}
