use crate::repository::in_memory_db::collection::InMemCollection;
use crate::repository::role_repo::RoleRepository;
use warden_common::error::AppError;
use warden_common::model::role::Role;

pub struct InMemRoleRepo {
    roles: InMemCollection<Role>,
    source_file: Option<String>,
}

impl InMemRoleRepo {
    /// Creates a new in-memory role store.
    pub fn new() -> InMemRoleRepo {
        InMemRoleRepo {
            roles: InMemCollection::new(),
            source_file: None,
        }
    }

    /// JSON file the store was loaded from (if any)
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }
}

impl Default for InMemRoleRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleRepository for InMemRoleRepo {
    fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError> {
        // Load DB from JSON file
        self.roles.load_file(connect_spec)?;
        self.source_file = Some(connect_spec.to_string());
        Ok(())
    }

    fn add(&self, role: Role) -> Result<Role, AppError> {
        self.roles.add(role)
    }

    fn update(&self, role: Role) -> Result<Role, AppError> {
        self.roles.update(role)
    }

    fn delete(&self, role_id: &str) -> Result<Vec<Role>, AppError> {
        self.roles.delete(role_id)
    }

    fn replace_all(&self, roles: Vec<Role>) -> Result<(), AppError> {
        self.roles.replace_all(roles)
    }

    fn get(&self, role_id: &str) -> Result<Option<Role>, AppError> {
        self.roles.get(role_id)
    }

    fn get_all(&self) -> Result<Vec<Role>, AppError> {
        self.roles.get_all()
    }
}
