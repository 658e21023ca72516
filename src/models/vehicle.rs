//! Modelo de Vehicle
//!
//! Un vehículo es un [`Resource`] con matrícula, referencia a su modelo y
//! última posición GPS conocida.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::audit::{Audit, Audited};
use crate::models::position::GpsPosition;
use crate::models::resource::{Ownable, Resource};

/// Referencia al modelo: entrada del catálogo o nombre libre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum VehicleModelRef {
    Catalog(Uuid),
    Named(String),
}

impl VehicleModelRef {
    pub fn catalog_id(&self) -> Option<Uuid> {
        match self {
            VehicleModelRef::Catalog(id) => Some(*id),
            VehicleModelRef::Named(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    #[serde(flatten)]
    pub resource: Resource,
    pub immatriculation: String,
    pub model: VehicleModelRef,
    pub position_gps: Option<GpsPosition>,
}

impl Vehicle {
    pub fn new(
        resource: Resource,
        immatriculation: String,
        model: VehicleModelRef,
        position_gps: Option<GpsPosition>,
    ) -> Self {
        Self {
            resource,
            immatriculation,
            model,
            position_gps,
        }
    }

    pub fn update_position(&mut self, position: GpsPosition, actor: &str) {
        self.position_gps = Some(position);
        self.touch(actor);
    }

    pub fn change_model(&mut self, model: VehicleModelRef, actor: &str) {
        self.model = model;
        self.touch(actor);
    }
}

impl Ownable for Vehicle {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Audited for Vehicle {
    fn audit(&self) -> &Audit {
        &self.resource.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.resource.audit
    }
}
