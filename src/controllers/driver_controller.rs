use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::{ApiResponse, ListQuery};
use crate::dto::driver_dto::{ContactInfoRequest, CreateDriverRequest, DriverResponse};
use crate::models::{Driver, Resource};
use crate::repositories::{JsonRepository, Page, Repository};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

pub struct DriverController {
    repository: Arc<JsonRepository<Driver>>,
}

impl DriverController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repository: state.drivers.clone(),
        }
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
        actor: &str,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;

        let license_number = request.license_number.trim().to_string();
        let resource = Resource::new(&request.permanent_owner_id, actor)?;
        let driver = Driver::new(
            resource,
            request.name.trim().to_string(),
            license_number.clone(),
            request.contact_info.into(),
        );
        let driver = self
            .repository
            .save_unique(driver, "licenseNumber", &license_number)
            .await?;

        tracing::info!("🧑‍✈️ Driver {} created by {}", driver.name, actor);
        Ok(ApiResponse::success_with_message(
            driver.into(),
            "Conductor creado exitosamente".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<DriverResponse, AppError> {
        self.repository
            .get_by_id(&id.to_string())
            .await?
            .map(DriverResponse::from)
            .ok_or_else(|| not_found_error("Driver", &id.to_string()))
    }

    pub async fn list(&self, query: ListQuery) -> Result<Page<DriverResponse>, AppError> {
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
            items: page.items.into_iter().map(DriverResponse::from).collect(),
            new_offset: page.new_offset,
            total_count: page.total_count,
        })
    }

    pub async fn update_contact(
        &self,
        id: Uuid,
        request: ContactInfoRequest,
        actor: &str,
    ) -> Result<ApiResponse<DriverResponse>, AppError> {
        request.validate()?;
        let (driver, _) = self
            .repository
            .update_with(&id.to_string(), |d| {
                d.update_contact(request.into(), actor);
                Ok(())
            })
            .await?;

        Ok(ApiResponse::success(driver.into()))
    }
}
