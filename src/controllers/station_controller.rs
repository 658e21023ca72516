use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::station_dto::{StationRequest, StationResponse};
use crate::models::Station;
use crate::repositories::{JsonRepository, Page, Repository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct StationController {
    repository: Arc<JsonRepository<Station>>,
}

impl StationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.stations.clone(),
        }
    }

    pub async fn create(
        &self,
        request: StationRequest,
        actor: &str,
    ) -> Result<ApiResponse<StationResponse>, AppError> {
        request.validate()?;
        let station = Station::new(
            request.name.trim().to_string(),
            request.city.trim().to_string(),
            request.position_gps,
            actor,
        );
        let station = self.repository.save(station).await?;

        tracing::info!("🚏 Station {} created by {}", station.name, actor);
        Ok(ApiResponse::success_with_message(
            station.into(),
            "Estación creada exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<StationResponse, AppError> {
        self.repository
            .get_by_id(&id.to_string())
            .await?
            .map(StationResponse::from)
            .ok_or_else(|| not_found_error("Station", &id.to_string()))
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<StationResponse>, AppError> {
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
            items: page.items.into_iter().map(StationResponse::from).collect(),
            new_offset: page.new_offset,
            total_count: page.total_count,
        })
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: StationRequest,
        actor: &str,
    ) -> Result<ApiResponse<StationResponse>, AppError> {
        request.validate()?;
        let (station, _) = self
            .repository
            .update_with(&id.to_string(), |s| {
                s.update_details(
                    request.name.trim().to_string(),
                    request.city.trim().to_string(),
                    request.position_gps,
                    actor,
                );
                Ok(())
            })
            .await?;

        Ok(ApiResponse::success(station.into()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.repository.delete(&id.to_string()).await? {
            return Err(not_found_error("Station", &id.to_string()));
        }
        tracing::info!("🗑️ Station {} deleted", id);
        Ok(())
    }
}
