use serde_derive::{Deserialize, Serialize};

use crate::model::permission::Permission;
use crate::model::{Entity, EntityKind};

/// Role model struct. Permissions are embedded copies taken when the role was last submitted.
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: String,
    pub name: String,
    pub description: String,
    pub permissions: Vec<Permission>,
}

impl Role {
    /// Role constructor
    pub fn new(id: &str, name: &str, description: &str, permissions: &[Permission]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            permissions: permissions.to_vec(),
        }
    }
}

impl Entity for Role {
    const KIND: EntityKind = EntityKind::Role;

    fn id(&self) -> &str {
        &self.id
    }
}
