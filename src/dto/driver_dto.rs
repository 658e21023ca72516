use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ContactInfo, Driver, Ownable};
use crate::utils::validation::{validate_not_empty, validate_phone};

#[derive(Debug, Deserialize, Validate)]
pub struct ContactInfoRequest {
    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(email)]
    pub email: Option<String>,
}

impl From<ContactInfoRequest> for ContactInfo {
    fn from(request: ContactInfoRequest) -> Self {
        Self {
            phone: request.phone,
            email: request.email,
        }
    }
}

// Request para crear un conductor
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(length(min = 3, max = 30))]
    pub license_number: String,

    #[validate(custom = "validate_not_empty")]
    pub permanent_owner_id: String,

    #[validate]
    pub contact_info: ContactInfoRequest,
}

// Response de conductor
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    #[serde(flatten)]
    pub driver: Driver,
    pub is_under_maintenance: bool,
    pub current_owner_id: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            is_under_maintenance: driver.is_under_maintenance(),
            current_owner_id: driver.effective_owner(Utc::now()).to_string(),
            driver,
        }
    }
}
