use indexmap::IndexMap;

use crate::interaction::{Confirmer, Notification, Notifier};
use crate::store::{Action, EntityStore};
use crate::view::{matches_query, render_heading};
use warden_common::error::AppError;
use warden_common::model::permission::{group_by_module, Permission};
use warden_common::model::EntityKind;

/// Permissions screen state
#[derive(Default)]
pub struct PermissionListView {
    search_query: String,
}

impl PermissionListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_search(&mut self, query: &str) {
        self.search_query = query.trim().to_string();
    }

    /// Permissions grouped by module. Filtering is per group: a group is kept whole if any of its
    /// members matches the search.
    pub fn grouped(&self, store: &EntityStore) -> Result<IndexMap<String, Vec<Permission>>, AppError> {
        let mut groups = group_by_module(&store.permissions()?);
        groups.retain(|_, permissions| {
            permissions
                .iter()
                .any(|permission| matches_query(permission, &self.search_query))
        });
        Ok(groups)
    }

    /// Delete a permission after operator confirmation. Roles keep their embedded copies.
    ///
    /// # Returns
    ///
    /// A [`Result`] containing whether the permission was deleted (false if confirmation was
    /// declined).
    ///
    pub fn delete_permission(
        &mut self,
        store: &mut EntityStore,
        confirmer: &mut dyn Confirmer,
        notifier: &mut dyn Notifier,
        permission_id: &str,
    ) -> Result<bool, AppError> {
        if store.find_permission(permission_id)?.is_none() {
            return Err(AppError::NotFound(
                EntityKind::Permission,
                permission_id.to_string(),
            ));
        }
        if !confirmer.confirm("Are you sure you want to delete this permission?") {
            return Ok(false);
        }

        store.dispatch(Action::DeletePermission(permission_id.to_string()))?;
        notifier.notify(Notification::Success(
            "Permission deleted successfully".to_string(),
        ));
        Ok(true)
    }

    /// Grouped permissions text
    pub fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        let groups = self.grouped(store)?;
        let shown: usize = groups.values().map(Vec::len).sum();
        let total = store.permissions()?.len();

        let mut lines = vec![render_heading(
            "Permissions",
            shown,
            total,
            &self.search_query,
        )];
        if groups.is_empty() {
            lines.push("  No permissions found".to_string());
        }
        for (module, permissions) in &groups {
            lines.push(format!("[{}]", module));
            for permission in permissions {
                lines.push(format!(
                    "  {} | {} | {}",
                    permission.id, permission.name, permission.description
                ));
            }
        }
        Ok(lines.join("\n"))
    }
}
