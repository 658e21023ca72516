//! Services module
//!
//! Lógica de negocio que no pertenece a una sola entidad: el códec de
//! esquemas de asientos, la asignación de recursos a viajes y la carga de
//! datos de demostración.

pub mod assignment_service;
pub mod seat_layout_service;
pub mod seed_service;
