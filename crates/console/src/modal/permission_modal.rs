use crate::interaction::{Notification, Notifier};
use crate::modal::{generate_id, require_field, unknown_field_error, Modal, ModalState};
use crate::store::{Action, EntityStore};
use warden_common::error::AppError;
use warden_common::model::permission::Permission;

/// Permission dialog form fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PermissionForm {
    pub name: String,
    pub description: String,
    pub module: String,
}

/// Create/edit permission dialog
#[derive(Default)]
pub struct PermissionModal {
    state: ModalState<Permission>,
    form: PermissionForm,
}

impl PermissionModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState<Permission> {
        &self.state
    }

    pub fn form(&self) -> &PermissionForm {
        &self.form
    }

    /// Open with an empty form
    pub fn open_create(&mut self) {
        self.form = PermissionForm::default();
        self.state = ModalState::Create;
    }

    /// Open with the form initialized from the given permission
    pub fn open_edit(&mut self, permission: Permission) {
        self.form = PermissionForm {
            name: permission.name.clone(),
            description: permission.description.clone(),
            module: permission.module.clone(),
        };
        self.state = ModalState::Edit(permission);
    }
}

impl Modal for PermissionModal {
    fn title(&self) -> &'static str {
        "Permission"
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn set_field(&mut self, _store: &EntityStore, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => self.form.name = value.to_string(),
            "description" => self.form.description = value.to_string(),
            "module" => self.form.module = value.to_string(),
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
        let module = require_field("module", &self.form.module)?;
        let description = require_field("description", &self.form.description)?;

        match original_id {
            None => {
                let permission = Permission::new(&generate_id(), &name, &description, &module);
                store.dispatch(Action::AddPermission(permission))?;
                notifier.notify(Notification::Success(
                    "Permission created successfully".to_string(),
                ));
            }
            Some(id) => {
                let permission = Permission::new(&id, &name, &description, &module);
                store.dispatch(Action::UpdatePermission(permission))?;
                notifier.notify(Notification::Success(
                    "Permission updated successfully".to_string(),
                ));
            }
        }

        self.cancel();
        Ok(())
    }

    fn cancel(&mut self) {
        self.state = ModalState::Closed;
        self.form = PermissionForm::default();
    }

    fn render(&self, _store: &EntityStore) -> Result<String, AppError> {
        let heading = match &self.state {
            ModalState::Edit(_) => "Edit Permission",
            _ => "Create Permission",
        };
        Ok([
            heading.to_string(),
            format!("  name: {}", &self.form.name),
            format!("  module: {}", &self.form.module),
            format!("  description: {}", &self.form.description),
        ]
        .join("\n"))
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::tests::MockNotify;
    use crate::store::tests::create_seeded_store;
    use mockall::predicate;
    use warden_common::model::permission::group_by_module;

    fn fill_form(modal: &mut PermissionModal, store: &EntityStore, fields: &[(&str, &str)]) {
        for (field, value) in fields {
            modal.set_field(store, field, value).unwrap();
        }
    }

    #[test]
    fn permmodal_create_submit() {
        let mut store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_create();
        fill_form(
            &mut modal,
            &store,
            &[
                ("name", "view:reports"),
                ("module", "reports"),
                ("description", "View reports"),
            ],
        );

        let mut notifier = MockNotify::new();
        notifier
            .expect_notify()
            .with(predicate::eq(Notification::Success(
                "Permission created successfully".to_string(),
            )))
            .times(1)
            .return_const(());

        if let Err(err) = modal.submit(&mut store, &mut notifier) {
            panic!("Unexpected result: err={:?}", &err);
        }

        assert!(!modal.is_open());
        let permissions = store.permissions().unwrap();
        assert_eq!(permissions.len(), 5);
        let added = &permissions[4];
        assert!(!added.id.is_empty());
        assert_eq!(
            store.find_permission(&added.id).unwrap().as_ref(),
            Some(added)
        );
        let groups = group_by_module(&permissions);
        assert_eq!(groups["reports"], vec![added.clone()]);
    }

    #[test]
    fn permmodal_edit_submit_preserves_id() {
        let mut store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_edit(store.find_permission("2").unwrap().unwrap());
        assert_eq!(modal.form().name, "edit:users");

        fill_form(&mut modal, &store, &[("description", "Modify users")]);

        let mut notifier = MockNotify::new();
        notifier.expect_notify().times(1).return_const(());

        modal.submit(&mut store, &mut notifier).unwrap();

        assert_eq!(
            store.find_permission("2").unwrap().unwrap(),
            Permission::new("2", "edit:users", "Modify users", "users")
        );
        assert_eq!(store.permissions().unwrap().len(), 4);
    }

    #[test]
    fn permmodal_submit_when_required_field_missing() {
        let mut store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_create();
        fill_form(&mut modal, &store, &[("name", "view:reports"), ("module", " ")]);

        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        match modal.submit(&mut store, &mut notifier) {
            Err(AppError::RequiredField(field)) => assert_eq!(field, "module"),
            result => panic!("Unexpected result: result={:?}", &result),
        }
        assert!(modal.is_open());
        assert_eq!(modal.form().name, "view:reports");
        assert_eq!(store.permissions().unwrap().len(), 4);
    }

    #[test]
    fn permmodal_edit_submit_when_deleted_meanwhile() {
        let mut store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_edit(store.find_permission("3").unwrap().unwrap());
        store
            .dispatch(Action::DeletePermission("3".to_string()))
            .unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        if modal.submit(&mut store, &mut notifier).is_ok() {
            panic!("Unexpected successful result");
        }
        assert!(modal.is_open());
        assert_eq!(store.permissions().unwrap().len(), 3);
    }

    #[test]
    fn permmodal_submit_when_closed() {
        let mut store = create_seeded_store();
        let mut modal = PermissionModal::new();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        if let Err(err) = modal.submit(&mut store, &mut notifier) {
            panic!("Unexpected result: err={:?}", &err);
        }
        assert_eq!(store.permissions().unwrap().len(), 4);
    }

    #[test]
    fn permmodal_cancel() {
        let store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_create();
        fill_form(&mut modal, &store, &[("name", "x")]);

        modal.cancel();

        assert_eq!(*modal.state(), ModalState::Closed);
        assert_eq!(*modal.form(), PermissionForm::default());
        assert_eq!(store.permissions().unwrap().len(), 4);
    }

    #[test]
    fn permmodal_set_field_when_unknown() {
        let store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_create();

        if modal.set_field(&store, "color", "red").is_ok() {
            panic!("Unexpected successful result");
        }
    }

    #[test]
    fn permmodal_render() {
        let store = create_seeded_store();
        let mut modal = PermissionModal::new();
        modal.open_edit(store.find_permission("4").unwrap().unwrap());

        assert_eq!(
            modal.render(&store).unwrap(),
            "Edit Permission\n  name: manage:roles\n  module: roles\n  description: Manage roles"
        );
    }
}
