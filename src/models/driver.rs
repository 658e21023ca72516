//! Modelo de Driver
//!
//! Los conductores son empleados tratados como recursos asignables: tienen
//! una estación propietaria y pueden prestarse temporalmente a otra.

use serde::{Deserialize, Serialize};

use crate::models::audit::{Audit, Audited};
use crate::models::resource::{Ownable, Resource};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    #[serde(flatten)]
    pub resource: Resource,
    pub name: String,
    pub license_number: String,
    pub contact_info: ContactInfo,
}

impl Driver {
    pub fn new(resource: Resource, name: String, license_number: String, contact_info: ContactInfo) -> Self {
        Self {
            resource,
            name,
            license_number,
            contact_info,
        }
    }

    pub fn update_contact(&mut self, contact_info: ContactInfo, actor: &str) {
        self.contact_info = contact_info;
        self.touch(actor);
    }
}

impl Ownable for Driver {
    fn resource(&self) -> &Resource {
        &self.resource
    }

    fn resource_mut(&mut self) -> &mut Resource {
        &mut self.resource
    }
}

impl Audited for Driver {
    fn audit(&self) -> &Audit {
        &self.resource.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.resource.audit
    }
}
