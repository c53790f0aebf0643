use crate::interaction::{Confirmer, Notification, Notifier};
use crate::store::{Action, EntityStore};
use crate::view::{filter_by_query, render_heading};
use warden_common::error::AppError;
use warden_common::model::role::Role;
use warden_common::model::EntityKind;

/// Roles screen state
#[derive(Default)]
pub struct RoleListView {
    search_query: String,
}

impl RoleListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    /// Roles whose name matches the current search, in collection order
    pub fn filtered(&self, store: &EntityStore) -> Result<Vec<Role>, AppError> {
        Ok(filter_by_query(&store.roles()?, &self.search_query))
    }

    /// Delete a role after operator confirmation. Users keep their embedded copy of the role.
    ///
    /// # Returns
    ///
    /// A [`Result`] containing whether the role was deleted (false if confirmation was declined).
    ///
    pub fn delete_role(
        &mut self,
        store: &mut EntityStore,
        confirmer: &mut dyn Confirmer,
        notifier: &mut dyn Notifier,
        role_id: &str,
    ) -> Result<bool, AppError> {
        if store.find_role(role_id)?.is_none() {
            return Err(AppError::NotFound(EntityKind::Role, role_id.to_string()));
        }
        if !confirmer.confirm("Are you sure you want to delete this role?") {
            return Ok(false);
        }

        store.dispatch(Action::DeleteRole(role_id.to_string()))?;
        notifier.notify(Notification::Success(
            "Role deleted successfully".to_string(),
        ));
        Ok(true)
    }

    /// Roles table text
    pub fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        let roles = self.filtered(store)?;
        let total = store.roles()?.len();

        let mut lines = vec![render_heading("Roles", roles.len(), total, &self.search_query)];
        if roles.is_empty() {
            lines.push("  No roles found".to_string());
        }
        for role in &roles {
            let permission_names: Vec<&str> = role
                .permissions
                .iter()
                .map(|permission| permission.name.as_str())
                .collect();
            lines.push(format!(
                "{} | {} | {} | permissions: {}",
                role.id,
                role.name,
                role.description,
                match permission_names.is_empty() {
                    true => "-".to_string(),
                    false => permission_names.join(", "),
                }
            ));
        }
        Ok(lines.join("\n"))
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::tests::{MockConfirm, MockNotify};
    use crate::repository::seed;
    use crate::store::tests::create_seeded_store;
    use mockall::predicate;
    use warden_common::model::permission::Permission;
    use warden_common::model::user::User;

    #[test]
    fn rolelist_filtered_by_name() {
        let store = create_seeded_store();
        let mut view = RoleListView::new();

        view.set_search("EDIT");

        let roles = view.filtered(&store).unwrap();
        assert_eq!(roles, vec![seed::seed_roles()[1].clone()]);
    }

    #[test]
    fn rolelist_delete_role_keeps_user_snapshots() {
        let mut store = create_seeded_store();
        let mut view = RoleListView::new();

        let mut confirmer = MockConfirm::new();
        confirmer.expect_confirm().times(1).return_const(true);
        let mut notifier = MockNotify::new();
        notifier
            .expect_notify()
            .with(predicate::eq(Notification::Success(
                "Role deleted successfully".to_string(),
            )))
            .times(1)
            .return_const(());

        let result = view.delete_role(&mut store, &mut confirmer, &mut notifier, "3");

        assert!(result.unwrap());
        assert!(store.find_role("3").unwrap().is_none());
        let bob: User = store.find_user("3").unwrap().unwrap();
        assert_eq!(bob.role.name, "Viewer");
    }

    #[test]
    fn rolelist_delete_role_when_confirmation_declined() {
        let mut store = create_seeded_store();
        let mut view = RoleListView::new();

        let mut confirmer = MockConfirm::new();
        confirmer.expect_confirm().times(1).return_const(false);
        let mut notifier = MockNotify::new();
        notifier.expect_notify().never();

        let result = view.delete_role(&mut store, &mut confirmer, &mut notifier, "1");

        assert!(!result.unwrap());
        assert_eq!(store.roles().unwrap(), seed::seed_roles());
    }

    #[test]
    fn rolelist_delete_role_when_unknown_id() {
        let mut store = create_seeded_store();
        let mut view = RoleListView::new();

        let mut confirmer = MockConfirm::new();
        confirmer.expect_confirm().never();
        let mut notifier = MockNotify::new();

        if let Ok(deleted) = view.delete_role(&mut store, &mut confirmer, &mut notifier, "44") {
            panic!("Unexpected successful result: deleted={}", deleted);
        }
    }

    #[test]
    fn rolelist_render() {
        let mut store = create_seeded_store();
        store
            .dispatch(Action::UpdateRole(Role::new(
                "1",
                "Admin",
                "Full system access",
                &[
                    Permission::new("1", "create:users", "Create users", "users"),
                    Permission::new("4", "manage:roles", "Manage roles", "roles"),
                ],
            )))
            .unwrap();
        let mut view = RoleListView::new();
        view.set_search("admin");

        let rendered = view.render(&store).unwrap();

        assert_eq!(
            rendered,
            "Roles (1 of 3 shown, search=\"admin\")\n\
             1 | Admin | Full system access | permissions: create:users, manage:roles"
        );
    }
}
