use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::driver_controller::DriverController;
use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::driver_dto::{ContactInfoRequest, CreateDriverRequest, DriverResponse};
use crate::middleware::actor::Actor;
use crate::models::Driver;
use crate::repositories::Page;
use crate::routes::resource_routes::create_resource_router;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver))
        .route("/:id/contact", put(update_contact))
        .merge(create_resource_router::<Driver>())
}

async fn create_driver(
    State(state): State<AppState>,
    actor: Actor,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.create(request, actor.as_str()).await?;
    Ok(Json(response))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    Ok(Json(controller.list(query).await?))
}

async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    actor: Actor,
    Json(request): Json<ContactInfoRequest>,
) -> Result<Json<ApiResponse<DriverResponse>>, AppError> {
    let controller = DriverController::new(&state);
    let response = controller.update_contact(id, request, actor.as_str()).await?;
    Ok(Json(response))
}
