use warden_common::error::AppError;
use warden_common::model::permission::Permission;

/// Permission data repository trait
pub trait PermissionRepository: Sync + Send {
    /// Process given datasource connect string (meaning depends on implementation)
    fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError>;

    /// Appends a new permission.
    ///
    /// Returns the stored permission on success, otherwise it returns an error (ie duplicate id).
    fn add(&self, permission: Permission) -> Result<Permission, AppError>;

    /// Replaces the permission with the same id.
    ///
    /// Returns the previous permission on success, otherwise it returns an error (ie unknown id).
    fn update(&self, permission: Permission) -> Result<Permission, AppError>;

    /// Deletes all permissions with the given id.
    ///
    /// Returns the removed permissions on success, otherwise it returns an error (ie unknown id).
    fn delete(&self, permission_id: &str) -> Result<Vec<Permission>, AppError>;

    /// Replaces the whole permission collection (bulk seeding/sync).
    fn replace_all(&self, permissions: Vec<Permission>) -> Result<(), AppError>;

    /// Gets a permission.
    ///
    /// Returns permission or None on success, otherwise it returns an error.
    fn get(&self, permission_id: &str) -> Result<Option<Permission>, AppError>;

    /// Returns the list of all permissions, in insertion order.
    fn get_all(&self) -> Result<Vec<Permission>, AppError>;
}
