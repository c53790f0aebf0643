use std::fmt::{self, Display, Formatter};

use serde_derive::{Deserialize, Serialize};

use crate::model::role::Role;
use crate::model::{Entity, EntityKind};

/// User model struct
#[derive(Serialize, Deserialize, Clone, Default, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID (unique across users)
    pub id: String,
    /// Friendly name for user
    pub name: String,
    /// Contact email
    pub email: String,
    /// Snapshot of the role assigned to the user (not a live reference)
    pub role: Role,
    /// User account status
    pub status: Status,
    /// Creation date (YYYY-MM-DD)
    pub created_at: String,
}

/// User acccount status
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Active account status
    #[default]
    Active,
    /// Inactive account status
    Inactive,
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Status::Active => write!(f, "active"),
            Status::Inactive => write!(f, "inactive"),
        }
    }
}

impl User {
    /// User constructor
    ///
    /// # Arguments
    ///
    /// * `id` - User ID (unique across users)
    /// * `name` - Friendly name for user
    /// * `email` - Contact email
    /// * `role` - Role snapshot assigned to user
    /// * `status` - User account status
    /// * `created_at` - Creation date
    ///
    /// # Returns
    ///
    /// A newly constructed [`User`] object.
    ///
    pub fn new(
        id: &str,
        name: &str,
        email: &str,
        role: &Role,
        status: &Status,
        created_at: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role: role.clone(),
            status: *status,
            created_at: created_at.to_string(),
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }
}
