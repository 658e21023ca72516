//! Modelos del sistema
//!
//! Entidades del dominio y su forma persistida en JSON (camelCase).

pub mod audit;
pub mod driver;
pub mod position;
pub mod resource;
pub mod station;
pub mod trip;
pub mod vehicle;
pub mod vehicle_model;

pub use audit::{Audit, Audited};
pub use driver::{ContactInfo, Driver};
pub use position::GpsPosition;
pub use resource::{MaintenanceWindow, Ownable, Resource, TemporaryOwnership};
pub use station::Station;
pub use trip::{Trip, TripDraft};
pub use vehicle::{Vehicle, VehicleModelRef};
pub use vehicle_model::{FuelType, VehicleModel};
