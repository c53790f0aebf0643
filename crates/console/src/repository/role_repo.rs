use warden_common::error::AppError;
use warden_common::model::role::Role;

/// Role data repository trait
pub trait RoleRepository: Sync + Send {
    /// Process given datasource connect string (meaning depends on implementation)
    fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError>;

    /// Appends a new role.
    ///
    /// Returns the stored role on success, otherwise it returns an error (ie duplicate id).
    fn add(&self, role: Role) -> Result<Role, AppError>;

    /// Replaces the role with the same id.
    ///
    /// Returns the previous role on success, otherwise it returns an error (ie unknown id).
    fn update(&self, role: Role) -> Result<Role, AppError>;

    /// Deletes all roles with the given id.
    ///
    /// Returns the removed roles on success, otherwise it returns an error (ie unknown id).
    fn delete(&self, role_id: &str) -> Result<Vec<Role>, AppError>;

    /// Replaces the whole role collection (bulk seeding/sync).
    fn replace_all(&self, roles: Vec<Role>) -> Result<(), AppError>;

    /// Gets a role.
    ///
    /// Returns role or None on success, otherwise it returns an error.
    fn get(&self, role_id: &str) -> Result<Option<Role>, AppError>;

    /// Returns the list of all roles, in insertion order.
    fn get_all(&self) -> Result<Vec<Role>, AppError>;
}

/// Unit tests
#[cfg(test)]
pub mod tests {

    use super::*;
    use mockall::mock;

    // mocks
    // =====

    mock! {
        pub RoleRepo {}
        impl RoleRepository for RoleRepo {
            fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError>;
            fn add(&self, role: Role) -> Result<Role, AppError>;
            fn update(&self, role: Role) -> Result<Role, AppError>;
            fn delete(&self, role_id: &str) -> Result<Vec<Role>, AppError>;
            fn replace_all(&self, roles: Vec<Role>) -> Result<(), AppError>;
            fn get(&self, role_id: &str) -> Result<Option<Role>, AppError>;
            fn get_all(&self) -> Result<Vec<Role>, AppError>;
        }
    }
}
