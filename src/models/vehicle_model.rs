//! Modelo de VehicleModel
//!
//! Catálogo de modelos de vehículo con su distribución de asientos.
//! La máscara (`seatBitmask` + `cellsPerRow`) es la única forma persistida.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::audit::{Audit, Audited};
use crate::services::seat_layout_service::{self, LayoutEdit, SeatLayout, SeatMatrix};
use crate::utils::errors::DomainResult;

/// Tipo de combustible
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModel {
    pub id: Uuid,
    pub manufacturer: String,
    pub model_name: String,
    pub fuel_type: FuelType,
    #[serde(flatten)]
    pub layout: SeatLayout,
    pub audit: Audit,
}

impl VehicleModel {
    pub fn new(
        manufacturer: String,
        model_name: String,
        fuel_type: FuelType,
        layout: SeatLayout,
        created_by: &str,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            manufacturer,
            model_name,
            fuel_type,
            layout,
            audit: Audit::new(created_by),
        }
    }

    pub fn number_seats(&self) -> u32 {
        self.layout.number_seats()
    }

    /// Vista de edición transitoria
    pub fn matrix(&self) -> DomainResult<SeatMatrix> {
        self.layout.to_matrix()
    }

    /// Aplica una edición y re-aplana inmediatamente a máscara
    pub fn apply_layout_edit(&mut self, edit: LayoutEdit, actor: &str) -> DomainResult<()> {
        let matrix = seat_layout_service::apply_edit(&self.layout.to_matrix()?, edit)?;
        self.replace_layout(&matrix, actor)
    }

    /// Sustituye la distribución completa desde una matriz editada
    pub fn replace_layout(&mut self, matrix: &[Vec<u8>], actor: &str) -> DomainResult<()> {
        self.layout = SeatLayout::from_matrix(matrix)?;
        self.touch(actor);
        Ok(())
    }
}

impl Audited for VehicleModel {
    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}
