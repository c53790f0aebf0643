pub mod permission;
pub mod role;
pub mod user;

use std::fmt::{self, Debug, Display, Formatter};

use serde_derive::{Deserialize, Serialize};

/// RBAC entity type
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    /// Permission entity
    Permission,
    /// Role entity
    Role,
    /// User entity
    User,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Permission => write!(f, "permission"),
            EntityKind::Role => write!(f, "role"),
            EntityKind::User => write!(f, "user"),
        }
    }
}

/// Common behavior for records held in an entity collection
pub trait Entity: Clone + Debug + PartialEq + Send + Sync {
    /// Kind of entity (used in error reporting)
    const KIND: EntityKind;

    /// Identifier, unique within the entity's collection
    fn id(&self) -> &str;
}
