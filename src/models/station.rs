//! Modelo de Station
//!
//! Las estaciones son las unidades organizativas que poseen recursos y
//! los extremos de cada viaje.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::audit::{Audit, Audited};
use crate::models::position::GpsPosition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub position_gps: Option<GpsPosition>,
    pub audit: Audit,
}

impl Station {
    pub fn new(name: String, city: String, position_gps: Option<GpsPosition>, created_by: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            city,
            position_gps,
            audit: Audit::new(created_by),
        }
    }

    /// Identificador usado como propietario de recursos
    pub fn owner_id(&self) -> String {
        self.id.to_string()
    }

    pub fn update_details(&mut self, name: String, city: String, position_gps: Option<GpsPosition>, actor: &str) {
        self.name = name;
        self.city = city;
        self.position_gps = position_gps;
        self.touch(actor);
    }
}

impl Audited for Station {
    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}
