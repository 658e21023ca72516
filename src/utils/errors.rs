//! Sistema de manejo de errores
//!
//! Este módulo define los errores del dominio (validaciones síncronas del
//! núcleo) y los errores de la aplicación con su conversión a respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errores de validación del núcleo.
///
/// Todos son rechazos síncronos y no reintentables: la entidad queda en su
/// último estado válido.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid seat layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid ownership window: {0}")]
    InvalidOwnershipWindow(String),

    #[error("Invalid maintenance window: {0}")]
    InvalidMaintenanceWindow(String),

    #[error("Invalid owner: {0}")]
    InvalidOwner(String),

    #[error("Invalid trip: {0}")]
    InvalidTrip(String),

    #[error("Departure is in the past: {0}")]
    PastDeparture(String),

    #[error("Invalid arrival: {0}")]
    InvalidArrival(String),

    #[error("Negative count: {0}")]
    NegativeCount(i64),

    #[error("Count out of range: {0}")]
    CountOutOfRange(i64),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),
}

impl DomainError {
    /// Código estable expuesto a los clientes de la API
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidLayout(_) => "INVALID_LAYOUT",
            DomainError::InvalidOwnershipWindow(_) => "INVALID_OWNERSHIP_WINDOW",
            DomainError::InvalidMaintenanceWindow(_) => "INVALID_MAINTENANCE_WINDOW",
            DomainError::InvalidOwner(_) => "INVALID_OWNER",
            DomainError::InvalidTrip(_) => "INVALID_TRIP",
            DomainError::PastDeparture(_) => "PAST_DEPARTURE",
            DomainError::InvalidArrival(_) => "INVALID_ARRIVAL",
            DomainError::NegativeCount(_) => "NEGATIVE_COUNT",
            DomainError::CountOutOfRange(_) => "COUNT_OUT_OF_RANGE",
            DomainError::ResourceUnavailable(_) => "RESOURCE_UNAVAILABLE",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            DomainError::InvalidOwnershipWindow(_) | DomainError::ResourceUnavailable(_) => {
                StatusCode::CONFLICT
            }
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

/// Resultado de las operaciones del núcleo
pub type DomainResult<T> = Result<T, DomainError>;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Domain(e) => {
                tracing::warn!("Domain rule rejected: {}", e);
                (
                    e.status(),
                    ErrorResponse {
                        error: "Domain Error".to_string(),
                        message: e.to_string(),
                        details: None,
                        code: Some(e.code().to_string()),
                    },
                )
            }

            AppError::Validation(e) => {
                tracing::warn!("Validation error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Validation Error".to_string(),
                        message: "The provided data is invalid".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Storage Error".to_string(),
                        message: "An error occurred while accessing the data files".to_string(),
                        details: Some(json!({ "io_error": e.to_string() })),
                        code: Some("STORAGE_ERROR".to_string()),
                    },
                )
            }

            AppError::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Serialization Error".to_string(),
                        message: "Stored data could not be (de)serialized".to_string(),
                        details: Some(json!({ "serde_error": e.to_string() })),
                        code: Some("SERIALIZATION_ERROR".to_string()),
                    },
                )
            }

            AppError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized access: {}", msg);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: "Unauthorized".to_string(),
                        message: msg,
                        details: None,
                        code: Some("UNAUTHORIZED".to_string()),
                    },
                )
            }

            AppError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: "Not Found".to_string(),
                        message: msg,
                        details: None,
                        code: Some("NOT_FOUND".to_string()),
                    },
                )
            }

            AppError::Conflict(msg) => {
                tracing::warn!("Conflict: {}", msg);
                (
                    StatusCode::CONFLICT,
                    ErrorResponse {
                        error: "Conflict".to_string(),
                        message: msg,
                        details: None,
                        code: Some("CONFLICT".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Bad Request".to_string(),
                        message: msg,
                        details: None,
                        code: Some("BAD_REQUEST".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de conflicto
pub fn conflict_error(resource: &str, field: &str, value: &str) -> AppError {
    AppError::Conflict(format!("{} with {} '{}' already exists", resource, field, value))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
