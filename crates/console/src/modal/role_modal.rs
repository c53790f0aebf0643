use indexmap::IndexSet;

use crate::interaction::{Notification, Notifier};
use crate::modal::{generate_id, require_field, unknown_field_error, Modal, ModalState};
use crate::store::{Action, EntityStore};
use warden_common::error::AppError;
use warden_common::model::permission::Permission;
use warden_common::model::role::Role;
use warden_common::model::EntityKind;

/// Role dialog form fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoleForm {
    pub name: String,
    pub description: String,
}

/// Create/edit role dialog. Permission choices are held as ids and only turned into embedded
/// permission copies on submit.
#[derive(Default)]
pub struct RoleModal {
    state: ModalState<Role>,
    form: RoleForm,
    selected_permission_ids: IndexSet<String>,
}

impl RoleModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState<Role> {
        &self.state
    }

    pub fn form(&self) -> &RoleForm {
        &self.form
    }

    /// Chosen permission ids, in selection order
    pub fn selected_permission_ids(&self) -> Vec<String> {
        self.selected_permission_ids.iter().cloned().collect()
    }

    pub fn open_create(&mut self) {
        self.form = RoleForm::default();
        self.selected_permission_ids.clear();
        self.state = ModalState::Create;
    }

    /// Open with the form and permission choices initialized from the given role
    pub fn open_edit(&mut self, role: Role) {
        self.form = RoleForm {
            name: role.name.clone(),
            description: role.description.clone(),
        };
        self.selected_permission_ids = role
            .permissions
            .iter()
            .map(|permission| permission.id.clone())
            .collect();
        self.state = ModalState::Edit(role);
    }

    /// Flip a permission choice
    ///
    /// # Arguments
    ///
    /// * `store` - Entity store
    /// * `permission_id` - Permission to (un)choose. Must exist in the permissions collection.
    ///
    /// # Returns
    ///
    /// A [`Result`] containing whether the permission is now chosen.
    ///
    pub fn toggle_permission(&mut self, store: &EntityStore, permission_id: &str) -> Result<bool, AppError> {
        if store.find_permission(permission_id)?.is_none() {
            return Err(AppError::NotFound(
                EntityKind::Permission,
                permission_id.to_string(),
            ));
        }
        if self.selected_permission_ids.shift_remove(permission_id) {
            Ok(false)
        } else {
            self.selected_permission_ids
                .insert(permission_id.to_string());
            Ok(true)
        }
    }

    /// Current permission records for the chosen ids, in selection order. Ids no longer in the
    /// collection are skipped.
    fn resolve_permissions(&self, store: &EntityStore) -> Result<Vec<Permission>, AppError> {
        let permissions = store.permissions()?;
        Ok(self
            .selected_permission_ids
            .iter()
            .filter_map(|permission_id| {
                permissions
                    .iter()
                    .find(|permission| permission.id == *permission_id)
                    .cloned()
            })
            .collect())
    }
}

impl Modal for RoleModal {
    fn title(&self) -> &'static str {
        "Role"
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn set_field(&mut self, _store: &EntityStore, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => self.form.name = value.to_string(),
            "description" => self.form.description = value.to_string(),
            _ => return Err(unknown_field_error(self.title(), field)),
        }
        Ok(())
    }

    fn submit(&mut self, store: &mut EntityStore, notifier: &mut dyn Notifier) -> Result<(), AppError> {
        let original_id = match &self.state {
            ModalState::Closed => return Ok(()),
            ModalState::Create => None,
            ModalState::Edit(original) => Some(original.id.clone()),
        };
        let name = require_field("name", &self.form.name)?;
        let description = require_field("description", &self.form.description)?;
        let permissions = self.resolve_permissions(store)?;

        match original_id {
            None => {
                let role = Role::new(&generate_id(), &name, &description, &permissions);
                store.dispatch(Action::AddRole(role))?;
                notifier.notify(Notification::Success(
                    "Role created successfully".to_string(),
                ));
            }
            Some(id) => {
                let role = Role::new(&id, &name, &description, &permissions);
                store.dispatch(Action::UpdateRole(role))?;
                notifier.notify(Notification::Success(
                    "Role updated successfully".to_string(),
                ));
            }
        }

        self.cancel();
        Ok(())
    }

    fn cancel(&mut self) {
        self.state = ModalState::Closed;
        self.form = RoleForm::default();
        self.selected_permission_ids.clear();
    }

    fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        let heading = match &self.state {
            ModalState::Edit(_) => "Edit Role",
            _ => "Create Role",
        };
        let mut lines = vec![
            heading.to_string(),
            format!("  name: {}", &self.form.name),
            format!("  description: {}", &self.form.description),
            "  permissions (enter 'toggle <ID>'):".to_string(),
        ];
        for permission in store.permissions()? {
            lines.push(format!(
                "    [{}] {} | {} | {}",
                if self.selected_permission_ids.contains(&permission.id) { "x" } else { " " },
                permission.id,
                permission.name,
                permission.module
            ));
        }
        Ok(lines.join("\n"))
    }
}
