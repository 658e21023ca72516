use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::trip_controller::TripController;
use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::trip_dto::{
    AddVehicleRequest, ArrivalRequest, CreateTripRequest, DepartureRequest, PassengersRequest,
    TripResponse,
};
use crate::middleware::actor::Actor;
use crate::repositories::Page;
use crate::services::assignment_service::SeatAccounting;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_trips).post(create_trip))
        .route("/:id", get(get_trip).delete(delete_trip))
        .route("/:id/vehicles", post(add_vehicle))
        .route("/:id/vehicles/:vehicle_id", delete(remove_vehicle))
        .route("/:id/departure", put(update_departure))
        .route("/:id/arrival", put(update_arrival))
        .route("/:id/passengers", put(update_passengers))
        .route("/:id/seats", get(seats))
}

async fn create_trip(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller.create(request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripResponse>, AppError> {
    let controller = TripController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    _actor: Actor,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TripController::new(&state);
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Viaje eliminado exitosamente"
    })))
}

async fn add_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<AddVehicleRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller
        .add_vehicle(id, request.vehicle_id, actor.as_str())
        .await?;
    Ok(Json(response))
}

async fn remove_vehicle(
    State(state): State<AppState>,
    Path((id, vehicle_id)): Path<(Uuid, Uuid)>,
    actor: Actor,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller
        .remove_vehicle(id, vehicle_id, actor.as_str())
        .await?;
    Ok(Json(response))
}

async fn update_departure(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<DepartureRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller
        .update_departure(id, request.departure_date_time, actor.as_str())
        .await?;
    Ok(Json(response))
}

async fn update_arrival(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<ArrivalRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller
        .update_arrival(id, request.arrival_date_time, actor.as_str())
        .await?;
    Ok(Json(response))
}

async fn update_passengers(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<PassengersRequest>,
) -> Result<Json<ApiResponse<TripResponse>>, AppError> {
    let controller = TripController::new(&state);
    let response = controller
        .update_passengers(id, request, actor.as_str())
        .await?;
    Ok(Json(response))
}

async fn seats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SeatAccounting>, AppError> {
    let controller = TripController::new(&state);
    Ok(Json(controller.seats(id).await?))
}
