use crate::interaction::{Notification, Notifier};
use crate::modal::{generate_id, require_field, unknown_field_error, Modal, ModalState};
use crate::store::{Action, EntityStore};
use warden_common::error::{AppError, CODE_BAD_REQUEST};
use warden_common::model::user::{Status, User};
use warden_common::model::EntityKind;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d";

/// User dialog form fields
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub status: Status,
    /// Id of the role to embed on submit
    pub role_id: String,
}

/// Create/edit user dialog
#[derive(Default)]
pub struct UserModal {
    state: ModalState<User>,
    form: UserForm,
}

impl UserModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState<User> {
        &self.state
    }

    pub fn form(&self) -> &UserForm {
        &self.form
    }

    /// Open with an empty (active) form
    pub fn open_create(&mut self) {
        self.form = UserForm::default();
        self.state = ModalState::Create;
    }

    pub fn open_edit(&mut self, user: User) {
        self.form = UserForm {
            name: user.name.clone(),
            email: user.email.clone(),
            status: user.status,
            role_id: user.role.id.clone(),
        };
        self.state = ModalState::Edit(user);
    }

    fn parse_status(value: &str) -> Result<Status, AppError> {
        match value.trim().to_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            _ => Err(AppError::GenWithCodeAndMsg(
                CODE_BAD_REQUEST,
                format!("Invalid status (expected active|inactive): status={}", value),
            )),
        }
    }
}

impl Modal for UserModal {
    fn title(&self) -> &'static str {
        "User"
    }

    fn is_open(&self) -> bool {
        self.state.is_open()
    }

    fn set_field(&mut self, store: &EntityStore, field: &str, value: &str) -> Result<(), AppError> {
        match field {
            "name" => self.form.name = value.to_string(),
            "email" => self.form.email = value.to_string(),
            "status" => self.form.status = Self::parse_status(value)?,
            "role" => {
                let role_id = value.trim();
                if store.find_role(role_id)?.is_none() {
                    return Err(AppError::NotFound(EntityKind::Role, role_id.to_string()));
                }
                self.form.role_id = role_id.to_string();
            }
            _ => return Err(unknown_field_error(self.title(), field)),
        }
        Ok(())
    }

    fn submit(&mut self, store: &mut EntityStore, notifier: &mut dyn Notifier) -> Result<(), AppError> {
        let original = match &self.state {
            ModalState::Closed => return Ok(()),
            ModalState::Create => None,
            ModalState::Edit(original) => Some(original.clone()),
        };
        let name = require_field("name", &self.form.name)?;
        let email = require_field("email", &self.form.email)?;
        let role_id = require_field("role", &self.form.role_id)?;

        // Embedded role snapshot only changes when another role was chosen
        let role = match &original {
            Some(user) if user.role.id == role_id => user.role.clone(),
            _ => store
                .find_role(&role_id)?
                .ok_or(AppError::NotFound(EntityKind::Role, role_id))?,
        };

        match original {
            None => {
                let created_at = chrono::Local::now().format(CREATED_AT_FORMAT).to_string();
                let user = User::new(
                    &generate_id(),
                    &name,
                    &email,
                    &role,
                    &self.form.status,
                    &created_at,
                );
                store.dispatch(Action::AddUser(user))?;
                notifier.notify(Notification::Success(
                    "User created successfully".to_string(),
                ));
            }
            Some(original) => {
                let user = User::new(
                    &original.id,
                    &name,
                    &email,
                    &role,
                    &self.form.status,
                    &original.created_at,
                );
                store.dispatch(Action::UpdateUser(user))?;
                notifier.notify(Notification::Success(
                    "User updated successfully".to_string(),
                ));
            }
        }

        self.cancel();
        Ok(())
    }

    fn cancel(&mut self) {
        self.state = ModalState::Closed;
        self.form = UserForm::default();
    }

    fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        let heading = match &self.state {
            ModalState::Edit(_) => "Edit User",
            _ => "Create User",
        };
        let mut lines = vec![
            heading.to_string(),
            format!("  name: {}", &self.form.name),
            format!("  email: {}", &self.form.email),
            format!("  status: {}", &self.form.status),
            format!("  role: {}", &self.form.role_id),
            "  roles (enter 'set role <ID>'):".to_string(),
        ];
        for role in store.roles()? {
            lines.push(format!(
                "    ({}) {} | {}",
                if role.id == self.form.role_id { "*" } else { " " },
                role.id,
                role.name
            ));
        }
        Ok(lines.join("\n"))
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::tests::MockNotify;
    use crate::store::tests::create_seeded_store;
    use mockall::predicate;
    use warden_common::model::role::Role;

    #[test]
    fn usermodal_create_submit() {
        let mut store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_create();
        modal.set_field(&store, "name", "Alice Auditor").unwrap();
        modal
            .set_field(&store, "email", "alice@example.com")
            .unwrap();
        modal.set_field(&store, "role", "3").unwrap();
        modal.set_field(&store, "status", "Inactive").unwrap();

        let mut notifier = MockNotify::new();
        notifier
            .expect_notify()
            .with(predicate::eq(Notification::Success(
                "User created successfully".to_string(),
            )))
            .times(1)
            .return_const(());

        if let Err(err) = modal.submit(&mut store, &mut notifier) {
            panic!("Unexpected result: err={:?}", &err);
        }

        let users = store.users().unwrap();
        assert_eq!(users.len(), 4);
        let alice = &users[3];
        assert_eq!(alice.name, "Alice Auditor");
        assert_eq!(alice.status, Status::Inactive);
        assert_eq!(alice.role, store.find_role("3").unwrap().unwrap());
        assert!(chrono::NaiveDate::parse_from_str(&alice.created_at, CREATED_AT_FORMAT).is_ok());
        assert_eq!(store.find_user(&alice.id).unwrap().as_ref(), Some(alice));
        assert!(!modal.is_open());
    }

    #[test]
    fn usermodal_edit_submit_preserves_id_and_created_at() {
        let mut store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_edit(store.find_user("1").unwrap().unwrap());
        assert_eq!(modal.form().role_id, "1");
        modal.set_field(&store, "email", "jd@example.com").unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().times(1).return_const(());

        modal.submit(&mut store, &mut notifier).unwrap();

        let john = store.find_user("1").unwrap().unwrap();
        assert_eq!(john.email, "jd@example.com");
        assert_eq!(john.created_at, "2024-03-10");
        assert_eq!(john.role.description, "Administrator");
        assert_eq!(store.users().unwrap().len(), 3);
    }

    #[test]
    fn usermodal_edit_submit_keeps_role_snapshot_when_role_since_updated() {
        let mut store = create_seeded_store();
        store
            .dispatch(Action::UpdateRole(Role::new("1", "Admin", "CHANGED", &[])))
            .unwrap();
        let mut modal = UserModal::new();
        modal.open_edit(store.find_user("1").unwrap().unwrap());
        modal.set_field(&store, "name", "Johnny Doe").unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().times(1).return_const(());

        if let Err(err) = modal.submit(&mut store, &mut notifier) {
            panic!("Unexpected result: err={:?}", &err);
        }

        let john = store.find_user("1").unwrap().unwrap();
        assert_eq!(john.name, "Johnny Doe");
        assert_eq!(john.role.description, "Administrator");
    }

    #[test]
    fn usermodal_edit_submit_when_role_since_deleted() {
        let mut store = create_seeded_store();
        store.dispatch(Action::DeleteRole("2".to_string())).unwrap();
        let mut modal = UserModal::new();
        modal.open_edit(store.find_user("2").unwrap().unwrap());
        modal
            .set_field(&store, "email", "jane.smith@example.com")
            .unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().times(1).return_const(());

        if let Err(err) = modal.submit(&mut store, &mut notifier) {
            panic!("Unexpected result: err={:?}", &err);
        }

        let jane = store.find_user("2").unwrap().unwrap();
        assert_eq!(jane.email, "jane.smith@example.com");
        assert_eq!(jane.role.id, "2");
        assert_eq!(jane.role.description, "Content Editor");
        assert!(!modal.is_open());
    }

    #[test]
    fn usermodal_edit_submit_when_role_changed() {
        let mut store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_edit(store.find_user("2").unwrap().unwrap());
        modal.set_field(&store, "role", "3").unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().times(1).return_const(());

        modal.submit(&mut store, &mut notifier).unwrap();

        let jane = store.find_user("2").unwrap().unwrap();
        assert_eq!(jane.role, store.find_role("3").unwrap().unwrap());
    }

    #[test]
    fn usermodal_submit_when_closed() {
        let mut store = create_seeded_store();
        let mut modal = UserModal::new();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        if let Err(err) = modal.submit(&mut store, &mut notifier) {
            panic!("Unexpected result: err={:?}", &err);
        }
        assert_eq!(store.users().unwrap().len(), 3);
    }

    #[test]
    fn usermodal_submit_when_role_missing() {
        let mut store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_create();
        modal.set_field(&store, "name", "Alice").unwrap();
        modal.set_field(&store, "email", "alice@example.com").unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        match modal.submit(&mut store, &mut notifier) {
            Err(AppError::RequiredField(field)) => assert_eq!(field, "role"),
            result => panic!("Unexpected result: result={:?}", &result),
        }
        assert!(modal.is_open());
    }

    #[test]
    fn usermodal_submit_when_role_deleted_meanwhile() {
        let mut store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_create();
        modal.set_field(&store, "name", "Alice").unwrap();
        modal.set_field(&store, "email", "alice@example.com").unwrap();
        modal.set_field(&store, "role", "2").unwrap();
        store.dispatch(Action::DeleteRole("2".to_string())).unwrap();

        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        match modal.submit(&mut store, &mut notifier) {
            Err(AppError::NotFound(EntityKind::Role, role_id)) => assert_eq!(role_id, "2"),
            result => panic!("Unexpected result: result={:?}", &result),
        }
        assert_eq!(store.users().unwrap().len(), 3);
    }

    #[test]
    fn usermodal_set_field_when_invalid_values() {
        let store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_create();

        if modal.set_field(&store, "role", "42").is_ok() {
            panic!("Unexpected successful role result");
        }
        match modal.set_field(&store, "status", "suspended") {
            Err(err) => assert_eq!(err.get_code(), Some(CODE_BAD_REQUEST)),
            Ok(()) => panic!("Unexpected successful status result"),
        }
        assert_eq!(*modal.form(), UserForm::default());
    }

    #[test]
    fn usermodal_render() {
        let store = create_seeded_store();
        let mut modal = UserModal::new();
        modal.open_edit(store.find_user("2").unwrap().unwrap());

        assert_eq!(
            modal.render(&store).unwrap(),
            "Edit User\n  name: Jane Smith\n  email: jane@example.com\n  status: active\n  role: 2\n  \
             roles (enter 'set role <ID>'):\n    \
             ( ) 1 | Admin\n    \
             (*) 2 | Editor\n    \
             ( ) 3 | Viewer"
        );
    }
}
