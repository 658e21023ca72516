//! Controladores
//!
//! Orquestan repositorio + núcleo: leen, validan mediante los mutadores del
//! dominio y persisten el resultado.

pub mod driver_controller;
pub mod resource_controller;
pub mod station_controller;
pub mod trip_controller;
pub mod vehicle_controller;
pub mod vehicle_model_controller;
