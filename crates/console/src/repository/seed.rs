use warden_common::model::permission::Permission;
use warden_common::model::role::Role;
use warden_common::model::user::{Status, User};

const SEED_CREATED_AT: &str = "2024-03-10";

/// Fixed permission records loaded on every (seed-data) startup
pub fn seed_permissions() -> Vec<Permission> {
    vec![
        Permission::new("1", "create:users", "Create users", "users"),
        Permission::new("2", "edit:users", "Edit users", "users"),
        Permission::new("3", "delete:users", "Delete users", "users"),
        Permission::new("4", "manage:roles", "Manage roles", "roles"),
    ]
}

/// Fixed role records loaded on every (seed-data) startup
pub fn seed_roles() -> Vec<Role> {
    vec![
        Role::new("1", "Admin", "Full system access", &[]),
        Role::new("2", "Editor", "Can edit content", &[]),
        Role::new("3", "Viewer", "Read-only access", &[]),
    ]
}

/// Fixed user records loaded on every (seed-data) startup. Embedded roles are their own snapshots
/// (descriptions differ from the role collection).
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(
            "1",
            "John Doe",
            "john@example.com",
            &Role::new("1", "Admin", "Administrator", &[]),
            &Status::Active,
            SEED_CREATED_AT,
        ),
        User::new(
            "2",
            "Jane Smith",
            "jane@example.com",
            &Role::new("2", "Editor", "Content Editor", &[]),
            &Status::Active,
            SEED_CREATED_AT,
        ),
        User::new(
            "3",
            "Bob Wilson",
            "bob@example.com",
            &Role::new("3", "Viewer", "Read-only access", &[]),
            &Status::Inactive,
            SEED_CREATED_AT,
        ),
    ]
}
