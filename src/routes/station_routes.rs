use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::station_controller::StationController;
use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::station_dto::{StationRequest, StationResponse};
use crate::middleware::actor::Actor;
use crate::repositories::Page;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_station_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stations).post(create_station))
        .route(
            "/:id",
            get(get_station).put(update_station).delete(delete_station),
        )
}

async fn create_station(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<StationRequest>,
) -> Result<Json<ApiResponse<StationResponse>>, AppError> {
    let controller = StationController::new(&state);
    let response = controller.create(request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StationResponse>, AppError> {
    let controller = StationController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_stations(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<StationResponse>>, AppError> {
    let controller = StationController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn update_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<StationRequest>,
) -> Result<Json<ApiResponse<StationResponse>>, AppError> {
    let controller = StationController::new(&state);
    let response = controller.update(id, request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _actor: Actor,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = StationController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Estación eliminada exitosamente"
    })))
}
