use crate::interaction::{Notification, Notifier};
use crate::modal::{require_field, unknown_field_error, Modal, ModalState};
use crate::store::{Action, EntityStore};
use warden_common::error::AppError;
use warden_common::model::user::User;
use warden_common::model::EntityKind;

/// Single-select role assignment dialog for a user
#[derive(Default)]
pub struct UserRoleModal {
    state: ModalState<User>,
    selected_role_id: String,
}

impl UserRoleModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState<User> {
        &self.state
    }

    pub fn selected_role_id(&self) -> &str {
        &self.selected_role_id
    }

    /// Open for the given user, with the user's current role pre-selected
    pub fn open(&mut self, user: User) {
        self.selected_role_id = user.role.id.clone();
        self.state = ModalState::Edit(user);
    }

    /// Select the role to assign. The role must exist in the roles collection.
    pub fn choose_role(&mut self, store: &EntityStore, role_id: &str) -> Result<(), AppError> {
        if store.find_role(role_id)?.is_none() {
            return Err(AppError::NotFound(EntityKind::Role, role_id.to_string()));
        }
        self.selected_role_id = role_id.to_string();
        Ok(())
    }
}

impl Modal for UserRoleModal {
    fn title(&self) -> &'static str {
        "Assign Role"
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn set_field(&mut self, store: &EntityStore, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "role" => self.choose_role(store, value.trim()),
            _ => Err(unknown_field_error(self.title(), field)),
        }
    }

    fn submit(&mut self, store: &mut EntityStore, notifier: &mut dyn Notifier) -> Result<(), AppError> {
        let user = match &self.state {
            ModalState::Edit(user) => user,
            _ => return Ok(()),
        };
        let role_id = require_field("role", &self.selected_role_id)?;
        let role = store
            .find_role(&role_id)?
            .ok_or(AppError::NotFound(EntityKind::Role, role_id))?;

        // Only the embedded role changes on the stored record
        let mut updated_user = store
            .find_user(&user.id)?
            .ok_or(AppError::NotFound(EntityKind::User, user.id.clone()))?;
        updated_user.role = role;
        store.dispatch(Action::UpdateUser(updated_user))?;

        notifier.notify(Notification::Success(
            "User role updated successfully".to_string(),
        ));
        self.cancel();
        Ok(())
    }

    fn cancel(&mut self) {
        self.state = ModalState::Closed;
        self.selected_role_id.clear();
    }

    fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        let user_name = match &self.state {
            ModalState::Edit(user) => user.name.as_str(),
            _ => "",
        };
        let mut lines = vec![format!(
            "Assign Role: {} (enter 'choose <ID>')",
            user_name
        )];
        for role in store.roles()? {
            lines.push(format!(
                "  ({}) {} | {} | {}",
                if role.id == self.selected_role_id { "*" } else { " " },
                role.id,
                role.name,
                role.description
            ));
        }
        Ok(lines.join("\n"))
    }
}
