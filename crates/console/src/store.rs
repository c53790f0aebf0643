use std::sync::{Arc, Mutex, MutexGuard};

use crate::repository::permission_repo::PermissionRepository;
use crate::repository::role_repo::RoleRepository;
use crate::repository::user_repo::UserRepository;
use warden_common::error::AppError;
use warden_common::logging::debug;
use warden_common::model::permission::Permission;
use warden_common::model::role::Role;
use warden_common::model::user::User;
use warden_common::target;

/// Store mutations. This is the only way to change store state.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    AddPermission(Permission),
    UpdatePermission(Permission),
    DeletePermission(String),
    SetPermissions(Vec<Permission>),
    AddRole(Role),
    UpdateRole(Role),
    DeleteRole(String),
    SetRoles(Vec<Role>),
    AddUser(User),
    UpdateUser(User),
    DeleteUser(String),
    SetUsers(Vec<User>),
    /// Flip dark/light theme
    ToggleTheme,
    SetTheme(bool),
}

/// Published to store subscribers after a successful mutation
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    PermissionsChanged,
    RolesChanged,
    UsersChanged,
    /// New dark theme flag value
    ThemeChanged(bool),
}

/// Store subscriber callback
pub type StoreListener = Box<dyn Fn(&StoreEvent) + Send>;

/// Centralized state container for the entity collections and the theme flag
pub struct EntityStore {
    permission_repo: Arc<Mutex<dyn PermissionRepository>>,
    role_repo: Arc<Mutex<dyn RoleRepository>>,
    user_repo: Arc<Mutex<dyn UserRepository>>,
    dark_theme: bool,
    listeners: Vec<StoreListener>,
}

impl EntityStore {
    /// EntityStore constructor
    ///
    /// # Arguments
    ///
    /// * `permission_repo` - Permissions collection
    /// * `role_repo` - Roles collection
    /// * `user_repo` - Users collection
    /// * `dark_theme` - Initial theme flag
    ///
    /// # Returns
    ///
    /// A newly constructed [`EntityStore`] object.
    ///
    pub fn new(
        permission_repo: Arc<Mutex<dyn PermissionRepository>>,
        role_repo: Arc<Mutex<dyn RoleRepository>>,
        user_repo: Arc<Mutex<dyn UserRepository>>,
        dark_theme: bool,
    ) -> Self {
        Self {
            permission_repo,
            role_repo,
            user_repo,
            dark_theme,
            listeners: vec![],
        }
    }

    /// Register a callback invoked after every successful mutation
    pub fn subscribe(&mut self, listener: StoreListener) {
        self.listeners.push(listener);
    }

    /// Apply an action to the store. Subscribers are only notified if the action succeeded.
    ///
    /// # Arguments
    ///
    /// * `action` - Mutation to perform
    ///
    /// # Returns
    ///
    /// A [`Result`] indicating whether the mutation was applied. A failed action leaves the store
    /// unchanged.
    ///
    pub fn dispatch(&mut self, action: Action) -> Result<(), AppError> {
        let action_desc = format!("{:?}", &action);
        let event = self.reduce(action)?;

        debug(
            &target!(),
            &format!("Store mutated: action={}, event={:?}", action_desc, &event),
        );

        for listener in &self.listeners {
            listener(&event);
        }
        Ok(())
    }

    fn reduce(&mut self, action: Action) -> Result<StoreEvent, AppError> {
        match action {
            Action::AddPermission(permission) => {
                lock(&self.permission_repo)?.add(permission)?;
                Ok(StoreEvent::PermissionsChanged)
            }
            Action::UpdatePermission(permission) => {
                lock(&self.permission_repo)?.update(permission)?;
                Ok(StoreEvent::PermissionsChanged)
            }
            Action::DeletePermission(permission_id) => {
                lock(&self.permission_repo)?.delete(&permission_id)?;
                Ok(StoreEvent::PermissionsChanged)
            }
            Action::SetPermissions(permissions) => {
                lock(&self.permission_repo)?.replace_all(permissions)?;
                Ok(StoreEvent::PermissionsChanged)
            }
            Action::AddRole(role) => {
                lock(&self.role_repo)?.add(role)?;
                Ok(StoreEvent::RolesChanged)
            }
            Action::UpdateRole(role) => {
                lock(&self.role_repo)?.update(role)?;
                Ok(StoreEvent::RolesChanged)
            }
            Action::DeleteRole(role_id) => {
                lock(&self.role_repo)?.delete(&role_id)?;
                Ok(StoreEvent::RolesChanged)
            }
            Action::SetRoles(roles) => {
                lock(&self.role_repo)?.replace_all(roles)?;
                Ok(StoreEvent::RolesChanged)
            }
            Action::AddUser(user) => {
                lock(&self.user_repo)?.add(user)?;
                Ok(StoreEvent::UsersChanged)
            }
            Action::UpdateUser(user) => {
                lock(&self.user_repo)?.update(user)?;
                Ok(StoreEvent::UsersChanged)
            }
            Action::DeleteUser(user_id) => {
                lock(&self.user_repo)?.delete(&user_id)?;
                Ok(StoreEvent::UsersChanged)
            }
            Action::SetUsers(users) => {
                lock(&self.user_repo)?.replace_all(users)?;
                Ok(StoreEvent::UsersChanged)
            }
            Action::ToggleTheme => {
                self.dark_theme = !self.dark_theme;
                Ok(StoreEvent::ThemeChanged(self.dark_theme))
            }
            Action::SetTheme(dark_theme) => {
                self.dark_theme = dark_theme;
                Ok(StoreEvent::ThemeChanged(self.dark_theme))
            }
        }
    }

    // selectors

    pub fn permissions(&self) -> Result<Vec<Permission>, AppError> {
        lock(&self.permission_repo)?.get_all()
    }

    pub fn roles(&self) -> Result<Vec<Role>, AppError> {
        lock(&self.role_repo)?.get_all()
    }

    pub fn users(&self) -> Result<Vec<User>, AppError> {
        lock(&self.user_repo)?.get_all()
    }

    pub fn find_permission(&self, permission_id: &str) -> Result<Option<Permission>, AppError> {
        lock(&self.permission_repo)?.get(permission_id)
    }

    pub fn find_role(&self, role_id: &str) -> Result<Option<Role>, AppError> {
        lock(&self.role_repo)?.get(role_id)
    }

    pub fn find_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        lock(&self.user_repo)?.get(user_id)
    }

    pub fn is_dark_theme(&self) -> bool {
        self.dark_theme
    }
}

/// Acquire repository lock
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
    mutex
        .lock()
        .map_err(|err| AppError::General(format!("Failed to access repository lock: err={}", err)))
}
