use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::Ownable;
use crate::utils::validation::validate_not_empty;

// Request para prestar un recurso a otra unidad
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryOwnershipRequest {
    #[validate(custom = "validate_not_empty")]
    pub owner_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// Request para cambiar el estado de mantenimiento
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub is_under_maintenance: bool,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

// Request de transferencia administrativa
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransferOwnershipRequest {
    #[validate(custom = "validate_not_empty")]
    pub new_owner_id: String,
}

// ?at=2025-06-01T08:00:00Z
#[derive(Debug, Deserialize)]
pub struct OwnerQuery {
    pub at: Option<DateTime<Utc>>,
}

// ?from=...&to=...
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerResponse {
    pub resource_id: Uuid,
    pub at: DateTime<Utc>,
    pub effective_owner_id: String,
    pub permanent_owner_id: String,
    pub is_temporary: bool,
}

impl OwnerResponse {
    pub fn for_resource<R: Ownable>(resource: &R, at: DateTime<Utc>) -> Self {
        let effective = resource.effective_owner(at).to_string();
        let permanent = resource.resource().permanent_owner_id.clone();
        Self {
            resource_id: resource.resource_id(),
            at,
            is_temporary: effective != permanent,
            effective_owner_id: effective,
            permanent_owner_id: permanent,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub resource_id: Uuid,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub available: bool,
}

impl AvailabilityResponse {
    pub fn for_resource<R: Ownable>(resource: &R, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            resource_id: resource.resource_id(),
            from,
            to,
            available: resource.is_available(from, to),
        }
    }
}
