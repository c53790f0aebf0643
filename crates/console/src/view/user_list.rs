use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;
use indexmap::IndexSet;

use crate::interaction::{Confirmer, Notification, Notifier};
use crate::store::{Action, EntityStore};
use crate::view::{filter_by_query, render_heading};
use warden_common::error::AppError;
use warden_common::logging::debug;
use warden_common::model::user::{Status, User};
use warden_common::model::EntityKind;
use warden_common::target;

/// Action applied to every selected user
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BulkAction {
    Activate,
    Deactivate,
    Delete,
}

impl Display for BulkAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BulkAction::Activate => write!(f, "activated"),
            BulkAction::Deactivate => write!(f, "deactivated"),
            BulkAction::Delete => write!(f, "deleted"),
        }
    }
}

/// Users screen state: search text plus the multi-select set
#[derive(Default)]
pub struct UserListView {
    search_query: String,
    selected_ids: IndexSet<String>,
}

impl UserListView {
    /// UserListView constructor
    ///
    /// # Returns
    ///
    /// A newly constructed [`UserListView`] object, with an empty search and selection.
    ///
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Selected user ids, in selection order
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected_ids.iter().cloned().collect()
    }

    pub fn is_selected(&self, user_id: &str) -> bool {
        self.selected_ids.contains(user_id)
    }

    /// Change search text. Selected users no longer visible are deselected.
    pub fn set_search(&mut self, store: &EntityStore, query: &str) -> Result<(), AppError> {
        self.search_query = query.trim().to_string();
        let visible_ids = self.visible_ids(store)?;
        self.selected_ids.retain(|user_id| visible_ids.contains(user_id));
        Ok(())
    }

    /// Users matching the current search, in collection order
    pub fn filtered(&self, store: &EntityStore) -> Result<Vec<User>, AppError> {
        Ok(filter_by_query(&store.users()?, &self.search_query))
    }

    fn visible_ids(&self, store: &EntityStore) -> Result<IndexSet<String>, AppError> {
        Ok(self
            .filtered(store)?
            .into_iter()
            .map(|user| user.id)
            .collect())
    }

    /// Flip selection of a visible user
    ///
    /// # Arguments
    ///
    /// * `store` - Entity store
    /// * `user_id` - User to (de)select
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the new selection state for the user. Users not currently visible
    /// yield a [`AppError::NotFound`] error.
    ///
    pub fn toggle_selected(&mut self, store: &EntityStore, user_id: &str) -> Result<bool, AppError> {
        if !self.visible_ids(store)?.contains(user_id) {
            return Err(AppError::NotFound(EntityKind::User, user_id.to_string()));
        }
        if self.selected_ids.shift_remove(user_id) {
            Ok(false)
        } else {
            self.selected_ids.insert(user_id.to_string());
            Ok(true)
        }
    }

    /// True when there are visible users and every one of them is selected
    pub fn is_all_selected(&self, store: &EntityStore) -> Result<bool, AppError> {
        let visible_ids = self.visible_ids(store)?;
        Ok(!visible_ids.is_empty()
            && visible_ids
                .iter()
                .all(|user_id| self.selected_ids.contains(user_id)))
    }

    /// Deselect every visible user if all are selected, otherwise select every visible user
    pub fn toggle_select_all(&mut self, store: &EntityStore) -> Result<(), AppError> {
        let visible_ids = self.visible_ids(store)?;
        if self.is_all_selected(store)? {
            self.selected_ids
                .retain(|user_id| !visible_ids.contains(user_id));
        } else {
            self.selected_ids.extend(visible_ids);
        }
        Ok(())
    }

    /// Drop selected ids which no longer exist in the users collection
    pub fn prune_selection(&mut self, store: &EntityStore) -> Result<(), AppError> {
        let user_ids: IndexSet<String> = store.users()?.into_iter().map(|user| user.id).collect();
        self.selected_ids
            .retain(|user_id| user_ids.contains(user_id));
        Ok(())
    }

    /// Delete a user after operator confirmation
    ///
    /// # Arguments
    ///
    /// * `store` - Entity store
    /// * `confirmer` - Confirmation capability
    /// * `notifier` - Outcome notification sink
    /// * `user_id` - User to delete
    ///
    /// # Returns
    ///
    /// A [`Result`] containing whether the user was deleted (false if confirmation was declined).
    ///
    pub fn delete_user(
        &mut self,
        store: &mut EntityStore,
        confirmer: &mut dyn Confirmer,
        notifier: &mut dyn Notifier,
        user_id: &str,
    ) -> Result<bool, AppError> {
        if store.find_user(user_id)?.is_none() {
            return Err(AppError::NotFound(EntityKind::User, user_id.to_string()));
        }
        if !confirmer.confirm("Are you sure you want to delete this user?") {
            return Ok(false);
        }

        store.dispatch(Action::DeleteUser(user_id.to_string()))?;
        self.selected_ids.shift_remove(user_id);

        notifier.notify(Notification::Success(
            "User deleted successfully".to_string(),
        ));
        Ok(true)
    }

    /// Apply a bulk action, in selection order, to every selected user. Selection is cleared
    /// afterwards.
    ///
    /// # Arguments
    ///
    /// * `store` - Entity store
    /// * `confirmer` - Confirmation capability (used for bulk delete)
    /// * `notifier` - Outcome notification sink
    /// * `bulk_action` - Action to apply
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the number of users processed. An empty selection or a declined
    /// confirmation processes nothing.
    ///
    pub fn apply_bulk_action(
        &mut self,
        store: &mut EntityStore,
        confirmer: &mut dyn Confirmer,
        notifier: &mut dyn Notifier,
        bulk_action: BulkAction,
    ) -> Result<usize, AppError> {
        if self.selected_ids.is_empty() {
            return Ok(0);
        }

        let user_ids = self.selected_ids();
        if (bulk_action == BulkAction::Delete)
            && !confirmer.confirm(&format!(
                "Are you sure you want to delete {} users?",
                user_ids.len()
            ))
        {
            return Ok(0);
        }

        for user_id in &user_ids {
            match bulk_action {
                BulkAction::Activate => Self::set_user_status(store, user_id, Status::Active)?,
                BulkAction::Deactivate => Self::set_user_status(store, user_id, Status::Inactive)?,
                BulkAction::Delete => store.dispatch(Action::DeleteUser(user_id.clone()))?,
            }
        }

        debug(
            &target!(),
            &format!("Bulk action applied: action={:?}, users={:?}", bulk_action, &user_ids),
        );

        self.selected_ids.clear();
        notifier.notify(Notification::Success(format!(
            "{} users {} successfully",
            user_ids.len(),
            bulk_action
        )));
        Ok(user_ids.len())
    }

    fn set_user_status(store: &mut EntityStore, user_id: &str, status: Status) -> Result<(), AppError> {
        let mut user = store
            .find_user(user_id)?
            .ok_or(AppError::NotFound(EntityKind::User, user_id.to_string()))?;
        user.status = status;
        store.dispatch(Action::UpdateUser(user))
    }

    /// Users table text
    pub fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        let users = self.filtered(store)?;
        let total = store.users()?.len();

        let mut lines = vec![render_heading("Users", users.len(), total, &self.search_query)];
        lines.push(format!(
            "[{}] select all ({} selected)",
            if self.is_all_selected(store)? { "x" } else { " " },
            self.selected_ids.len()
        ));
        if users.is_empty() {
            lines.push("  No users found".to_string());
        }
        for user in &users {
            lines.push(format!(
                "[{}] {} | {} | {} | {} | {} | {}",
                if self.is_selected(&user.id) { "x" } else { " " },
                user.id,
                user.name,
                user.email,
                user.role.name,
                user.status,
                user.created_at
            ));
        }
        Ok(lines.join("\n"))
    }
}
