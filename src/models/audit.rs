//! Sobre de auditoría
//!
//! Metadatos createdBy/createdOn/updatedBy/updatedOn adjuntos a toda entidad
//! mutable. Todos los mutadores pasan por [`Audit::touch`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    pub created_by: String,
    pub created_on: DateTime<Utc>,
    pub updated_by: String,
    pub updated_on: DateTime<Utc>,
}

impl Audit {
    /// Crea un sobre nuevo con `updated* == created*`
    pub fn new(created_by: &str) -> Self {
        Self::new_at(created_by, Utc::now())
    }

    pub fn new_at(created_by: &str, now: DateTime<Utc>) -> Self {
        Self {
            created_by: created_by.to_string(),
            created_on: now,
            updated_by: created_by.to_string(),
            updated_on: now,
        }
    }

    /// Marca una mutación. Nunca modifica `created_on` / `created_by`.
    pub fn touch(&mut self, updated_by: &str) {
        self.touch_at(updated_by, Utc::now());
    }

    pub fn touch_at(&mut self, updated_by: &str, now: DateTime<Utc>) {
        self.updated_by = updated_by.to_string();
        self.updated_on = now;
    }
}

/// Entidades que llevan un sobre de auditoría
pub trait Audited {
    fn audit(&self) -> &Audit;
    fn audit_mut(&mut self) -> &mut Audit;

    fn touch(&mut self, actor: &str) {
        self.audit_mut().touch(actor);
    }
}
