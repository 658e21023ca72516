//! DTOs de la API
//!
//! Requests validados con `validator` y responses con los campos derivados.

pub mod common_dto;
pub mod driver_dto;
pub mod resource_dto;
pub mod station_dto;
pub mod trip_dto;
pub mod vehicle_dto;
pub mod vehicle_model_dto;
