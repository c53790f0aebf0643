use crate::interaction::Notifier;
use crate::modal::{Modal, ModalState};
use crate::store::EntityStore;
use warden_common::error::{AppError, CODE_BAD_REQUEST};
use warden_common::model::permission::group_by_module;
use warden_common::model::user::User;

/// Read-only view of the permissions carried by a user's embedded role
#[derive(Default)]
pub struct UserPermissionsModal {
    state: ModalState<User>,
}

impl UserPermissionsModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, user: User) {
        self.state = ModalState::Edit(user);
    }
}

impl Modal for UserPermissionsModal {
    fn title(&self) -> &'static str {
        "User Permissions"
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn set_field(&mut self, _store: &EntityStore, _field: &str, _value: &str) -> Result<(), AppError> {
        Err(AppError::GenWithCodeAndMsg(
            CODE_BAD_REQUEST,
            format!("{} dialog is read-only", self.title()),
        ))
    }

    /// Nothing to write, submit just closes the dialog
    fn submit(&mut self, _store: &mut EntityStore, _notifier: &mut dyn Notifier) -> Result<(), AppError> {
        self.cancel();
        Ok(())
    }

    fn cancel(&mut self) {
        self.state = ModalState::Closed;
    }

    fn render(&self, _store: &EntityStore) -> Result<String, AppError> {
        let user = match &self.state {
            ModalState::Edit(user) => user,
            _ => return Ok(String::new()),
        };

        let mut lines = vec![format!(
            "Permissions: {} (role: {})",
            &user.name, &user.role.name
        )];
        if user.role.permissions.is_empty() {
            lines.push("  No permissions assigned to this role".to_string());
        }
        for (module, permissions) in group_by_module(&user.role.permissions) {
            lines.push(format!("  [{}]", module));
            for permission in permissions {
                lines.push(format!(
                    "    {} | {}",
                    permission.name, permission.description
                ));
            }
        }
        Ok(lines.join("\n"))
    }
}
