//! Modelo de Resource
//!
//! Un recurso físico (vehículo o conductor) con un propietario permanente
//! (agencia/estación) que puede ser reasignado temporalmente a otro propietario
//! durante una ventana acotada, y que puede estar en mantenimiento.
//!
//! Las dos facetas (mantenimiento y propiedad temporal) son independientes;
//! el "estado de disponibilidad" efectivo es su producto cartesiano.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::audit::{Audit, Audited};
use crate::utils::errors::{DomainError, DomainResult};

/// Reasignación temporal `[start, end]`, inclusiva en ambos extremos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporaryOwnership {
    pub owner_id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TemporaryOwnership {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Ventana de mantenimiento; `end == None` significa sin fecha de fin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl MaintenanceWindow {
    /// Intersección con `[from, to]` (inclusiva)
    pub fn intersects(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        self.start <= to && self.end.map_or(true, |end| end >= from)
    }
}

/// Datos compartidos por todo recurso asignable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub resource_id: Uuid,
    pub permanent_owner_id: String,
    #[serde(default)]
    pub maintenance: Option<MaintenanceWindow>,
    #[serde(default)]
    pub temporary_ownership: Option<TemporaryOwnership>,
    pub audit: Audit,
}

impl Resource {
    pub fn new(permanent_owner_id: &str, created_by: &str) -> DomainResult<Self> {
        ensure_owner_id(permanent_owner_id)?;
        Ok(Self {
            resource_id: Uuid::new_v4(),
            permanent_owner_id: permanent_owner_id.trim().to_string(),
            maintenance: None,
            temporary_ownership: None,
            audit: Audit::new(created_by),
        })
    }
}

impl Audited for Resource {
    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }
}

fn ensure_owner_id(owner_id: &str) -> DomainResult<()> {
    if owner_id.trim().is_empty() {
        return Err(DomainError::InvalidOwner("owner id must not be empty".to_string()));
    }
    Ok(())
}

/// Capacidad "activo poseíble y mantenible".
///
/// Implementada por [`Resource`] y por las entidades que lo embeben
/// (`Vehicle`, `Driver`). Cada mutador valida, muta y luego marca la
/// auditoría; si falla no hay ningún efecto observable.
pub trait Ownable {
    fn resource(&self) -> &Resource;
    fn resource_mut(&mut self) -> &mut Resource;

    fn resource_id(&self) -> Uuid {
        self.resource().resource_id
    }

    fn is_under_maintenance(&self) -> bool {
        self.resource().maintenance.is_some()
    }

    /// Propietario efectivo en el instante `at`
    fn effective_owner(&self, at: DateTime<Utc>) -> &str {
        let resource = self.resource();
        match &resource.temporary_ownership {
            Some(temp) if temp.contains(at) => &temp.owner_id,
            _ => &resource.permanent_owner_id,
        }
    }

    /// Falso si el mantenimiento se solapa con `[window_start, window_end]`.
    /// Una ventana invertida se normaliza.
    fn is_available(&self, window_start: DateTime<Utc>, window_end: DateTime<Utc>) -> bool {
        let (from, to) = if window_start <= window_end {
            (window_start, window_end)
        } else {
            (window_end, window_start)
        };
        match &self.resource().maintenance {
            Some(window) => !window.intersects(from, to),
            None => true,
        }
    }

    fn assign_temporary_ownership(
        &mut self,
        new_owner_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        actor: &str,
    ) -> DomainResult<()> {
        if start >= end {
            return Err(DomainError::InvalidOwnershipWindow(format!(
                "start {} must be before end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        if new_owner_id.trim().is_empty() {
            return Err(DomainError::InvalidOwnershipWindow(
                "temporary owner id must not be empty".to_string(),
            ));
        }
        let resource = self.resource_mut();
        if let Some(existing) = &resource.temporary_ownership {
            return Err(DomainError::InvalidOwnershipWindow(format!(
                "resource {} is already assigned to '{}' until {}; clear it first",
                resource.resource_id,
                existing.owner_id,
                existing.end.to_rfc3339()
            )));
        }

        resource.temporary_ownership = Some(TemporaryOwnership {
            owner_id: new_owner_id.trim().to_string(),
            start,
            end,
        });
        resource.touch(actor);
        Ok(())
    }

    /// Idempotente
    fn clear_temporary_ownership(&mut self, actor: &str) {
        let resource = self.resource_mut();
        resource.temporary_ownership = None;
        resource.touch(actor);
    }

    fn set_maintenance_status(
        &mut self,
        is_under: bool,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        actor: &str,
    ) -> DomainResult<()> {
        self.set_maintenance_status_at(is_under, start, end, actor, Utc::now())
    }

    /// Igual que [`Ownable::set_maintenance_status`] con "ahora" explícito
    fn set_maintenance_status_at(
        &mut self,
        is_under: bool,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let window = if is_under {
            let start = start.unwrap_or(now);
            if let Some(end) = end {
                if end <= start {
                    return Err(DomainError::InvalidMaintenanceWindow(format!(
                        "end {} must be after start {}",
                        end.to_rfc3339(),
                        start.to_rfc3339()
                    )));
                }
            }
            Some(MaintenanceWindow { start, end })
        } else {
            None
        };

        let resource = self.resource_mut();
        resource.maintenance = window;
        resource.touch(actor);
        Ok(())
    }

    /// Transferencia administrativa del propietario permanente
    fn transfer_permanent_ownership(&mut self, new_owner_id: &str, actor: &str) -> DomainResult<()> {
        ensure_owner_id(new_owner_id)?;
        let resource = self.resource_mut();
        resource.permanent_owner_id = new_owner_id.trim().to_string();
        resource.touch(actor);
        Ok(())
    }
}

impl Ownable for Resource {
    fn resource(&self) -> &Resource {
        self
    }

    fn resource_mut(&mut self) -> &mut Resource {
        self
    }
}
