use crate::repository::in_memory_db::collection::InMemCollection;
use crate::repository::permission_repo::PermissionRepository;
use warden_common::error::AppError;
use warden_common::model::permission::Permission;

pub struct InMemPermissionRepo {
    permissions: InMemCollection<Permission>,
    source_file: Option<String>,
}

impl InMemPermissionRepo {
    /// Creates a new in-memory permission store.
    pub fn new() -> InMemPermissionRepo {
        InMemPermissionRepo {
            permissions: InMemCollection::new(),
            source_file: None,
        }
    }

    /// JSON file the store was loaded from (if any)
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }
}

impl Default for InMemPermissionRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionRepository for InMemPermissionRepo {
    fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError> {
        // Load DB from JSON file
        self.permissions.load_file(connect_spec)?;
        self.source_file = Some(connect_spec.to_string());
        Ok(())
    }

    fn add(&self, permission: Permission) -> Result<Permission, AppError> {
        self.permissions.add(permission)
    }

    fn update(&self, permission: Permission) -> Result<Permission, AppError> {
        self.permissions.update(permission)
    }

    fn delete(&self, permission_id: &str) -> Result<Vec<Permission>, AppError> {
        self.permissions.delete(permission_id)
    }

    fn replace_all(&self, permissions: Vec<Permission>) -> Result<(), AppError> {
        self.permissions.replace_all(permissions)
    }

    fn get(&self, permission_id: &str) -> Result<Option<Permission>, AppError> {
        self.permissions.get(permission_id)
    }

    fn get_all(&self) -> Result<Vec<Permission>, AppError> {
        self.permissions.get_all()
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_PERMISSION_DB_FILE_PATHPARTS: [&str; 3] =
        [env!("CARGO_MANIFEST_DIR"), "testdata", "db-permission.json"];
    const INVALID_PERMISSION_DB_FILE_PATHPARTS: [&str; 3] = [
        env!("CARGO_MANIFEST_DIR"),
        "testdata",
        "db-permission-INVALID.json",
    ];

    #[test]
    fn inmempermrepo_connect_to_datasource_when_invalid_filepath() {
        let invalid_db_path: PathBuf = INVALID_PERMISSION_DB_FILE_PATHPARTS.iter().collect();
        let invalid_db_pathstr = invalid_db_path.to_str().unwrap();

        let mut permission_repo = InMemPermissionRepo::new();

        if let Ok(()) = permission_repo.connect_to_datasource(invalid_db_pathstr) {
            panic!("Unexpected result: file={}", invalid_db_pathstr);
        }
        assert!(permission_repo.source_file().is_none());
    }

    #[test]
    fn inmempermrepo_connect_to_datasource_when_valid_filepath() {
        let valid_db_path: PathBuf = VALID_PERMISSION_DB_FILE_PATHPARTS.iter().collect();
        let valid_db_pathstr = valid_db_path.to_str().unwrap();

        let mut permission_repo = InMemPermissionRepo::new();

        if let Err(err) = permission_repo.connect_to_datasource(valid_db_pathstr) {
            panic!(
                "Unexpected result: file={}, err={:?}",
                valid_db_pathstr, &err
            );
        }

        assert_eq!(permission_repo.source_file(), Some(valid_db_pathstr));
        assert_eq!(
            permission_repo.get_all().unwrap(),
            vec![
                Permission::new("50", "view:reports", "View reports", "reports"),
                Permission::new("51", "export:reports", "Export reports", "reports"),
            ]
        );
    }

    #[test]
    fn inmempermrepo_add_update_delete() {
        let permission_repo = InMemPermissionRepo::new();
        let permission = Permission::new("5", "view:reports", "View reports", "reports");

        if let Err(err) = permission_repo.add(permission.clone()) {
            panic!("Unexpected add result: err={:?}", &err);
        }
        assert_eq!(permission_repo.get("5").unwrap(), Some(permission.clone()));

        let updated = Permission::new("5", "view:reports", "Read reports", "reports");
        match permission_repo.update(updated.clone()) {
            Ok(previous) => assert_eq!(previous, permission),
            Err(err) => panic!("Unexpected update result: err={:?}", &err),
        }
        assert_eq!(permission_repo.get("5").unwrap(), Some(updated.clone()));

        match permission_repo.delete("5") {
            Ok(removed) => assert_eq!(removed, vec![updated]),
            Err(err) => panic!("Unexpected delete result: err={:?}", &err),
        }
        assert!(permission_repo.get_all().unwrap().is_empty());
    }
}
