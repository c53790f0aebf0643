use indexmap::IndexMap;
use serde_derive::{Deserialize, Serialize};

use crate::model::{Entity, EntityKind};

/// Permission model struct
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Permission ID (unique across permissions)
    pub id: String,
    /// Permission name (e.g. "create:users")
    pub name: String,
    /// Human readable description
    pub description: String,
    /// Free-text grouping tag, only used for display grouping
    pub module: String,
}

impl Permission {
    /// Permission constructor
    pub fn new(id: &str, name: &str, description: &str, module: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            module: module.to_string(),
        }
    }
}

impl Entity for Permission {
    const KIND: EntityKind = EntityKind::Permission;

    fn id(&self) -> &str {
        &self.id
    }
}

/// Partition permissions by their module value. Groups are ordered by the first occurrence of each
/// module, and members keep their relative order.
///
/// # Arguments
///
/// * `permissions` - Permissions to partition
///
/// # Returns
///
/// An ordered map of module name to the permissions tagged with that module.
///
pub fn group_by_module(permissions: &[Permission]) -> IndexMap<String, Vec<Permission>> {
    permissions
        .iter()
        .fold(IndexMap::new(), |mut groups, permission| {
            groups
                .entry(permission.module.clone())
                .or_insert_with(Vec::new)
                .push(permission.clone());
            groups
        })
}
