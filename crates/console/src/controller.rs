use std::sync::{Arc, Mutex};

use crate::interaction::{Confirmer, Notification, Notifier};
use crate::modal::permission_modal::PermissionModal;
use crate::modal::role_modal::RoleModal;
use crate::modal::user_modal::UserModal;
use crate::modal::user_permissions_modal::UserPermissionsModal;
use crate::modal::user_role_modal::UserRoleModal;
use crate::modal::Modal;
use crate::navigation::{NavigationShell, View};
use crate::request::Request;
use crate::store::{Action, EntityStore, StoreEvent};
use crate::view::permission_list::PermissionListView;
use crate::view::role_list::RoleListView;
use crate::view::settings::SettingsView;
use crate::view::user_list::{BulkAction, UserListView};
use warden_common::error::{AppError, CODE_BAD_REQUEST};
use warden_common::logging::{debug, error};
use warden_common::model::user::User;
use warden_common::model::EntityKind;
use warden_common::target;

/// Outcome of a processed request
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// Text to display to the operator
    Text(String),
    /// Operator asked to leave the console
    Quit,
    /// Nothing to display
    None,
}

/// All dialogs. At most one is open at any time.
#[derive(Default)]
struct Dialogs {
    permission: PermissionModal,
    role: RoleModal,
    user: UserModal,
    user_role: UserRoleModal,
    user_permissions: UserPermissionsModal,
}

impl Dialogs {
    fn open_mut(&mut self) -> Option<&mut dyn Modal> {
        if self.permission.is_open() {
            Some(&mut self.permission)
        } else if self.role.is_open() {
            Some(&mut self.role)
        } else if self.user.is_open() {
            Some(&mut self.user)
        } else if self.user_role.is_open() {
            Some(&mut self.user_role)
        } else if self.user_permissions.is_open() {
            Some(&mut self.user_permissions)
        } else {
            None
        }
    }

    fn open(&self) -> Option<&dyn Modal> {
        if self.permission.is_open() {
            Some(&self.permission)
        } else if self.role.is_open() {
            Some(&self.role)
        } else if self.user.is_open() {
            Some(&self.user)
        } else if self.user_role.is_open() {
            Some(&self.user_role)
        } else if self.user_permissions.is_open() {
            Some(&self.user_permissions)
        } else {
            None
        }
    }
}

/// Routes operator requests to the active view or the open dialog
pub struct AdminController {
    /// Entity collections and theme
    store: EntityStore,
    /// Active view tracker
    navigation: NavigationShell,
    user_list: UserListView,
    role_list: RoleListView,
    permission_list: PermissionListView,
    settings: SettingsView,
    dialogs: Dialogs,
    /// Yes/no capability used before destructive operations
    confirmer: Box<dyn Confirmer + Send>,
    /// Outcome message sink
    notifier: Box<dyn Notifier + Send>,
    /// Store events received since the last processed request
    store_events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl AdminController {
    /// AdminController constructor
    ///
    /// # Arguments
    ///
    /// * `store` - Entity store (ownership is taken)
    /// * `confirmer` - Confirmation capability
    /// * `notifier` - Notification sink
    ///
    /// # Returns
    ///
    /// A newly constructed [`AdminController`] object, subscribed to store changes.
    ///
    pub fn new(
        mut store: EntityStore,
        confirmer: Box<dyn Confirmer + Send>,
        notifier: Box<dyn Notifier + Send>,
    ) -> Self {
        let store_events = Arc::new(Mutex::new(vec![]));
        let store_events_copy = store_events.clone();
        store.subscribe(Box::new(move |event| {
            if let Ok(mut events) = store_events_copy.lock() {
                events.push(event.clone());
            }
        }));

        Self {
            store,
            navigation: NavigationShell::new(),
            user_list: UserListView::new(),
            role_list: RoleListView::new(),
            permission_list: PermissionListView::new(),
            settings: SettingsView,
            dialogs: Dialogs::default(),
            confirmer,
            notifier,
            store_events,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn active_view(&self) -> View {
        self.navigation.active_view()
    }

    /// Title of the open dialog (if any)
    pub fn open_dialog(&self) -> Option<&'static str> {
        self.dialogs.open().map(|modal| modal.title())
    }

    /// Process an operator request
    ///
    /// # Arguments
    ///
    /// * `request` - Parsed request
    ///
    /// # Returns
    ///
    /// A [`Result`] containing the [`Response`] to show the operator. Errors leave the store and
    /// any open dialog as they were before the request.
    ///
    pub fn process(&mut self, request: Request) -> Result<Response, AppError> {
        debug(&target!(), &format!("Processing request: req={:?}", &request));

        if let Some(modal) = self.dialogs.open() {
            if !request.is_allowed_in_dialog() {
                return Err(AppError::GenWithCodeAndMsg(
                    CODE_BAD_REQUEST,
                    format!(
                        "Command not allowed while {} dialog is open: cmd={:?}",
                        modal.title(),
                        &request
                    ),
                ));
            }
        }

        let response = self.process_request(request);
        self.process_store_events()?;
        response
    }

    /// Report a failed request through the notifier
    pub fn notify_failure(&mut self, err: &AppError) {
        error(
            &target!(),
            &format!("Error processing request: err={:?}", err),
        );
        let msg = match err {
            AppError::GenWithCodeAndMsg(_, msg) => msg.clone(),
            _ => err.to_string(),
        };
        self.notifier.notify(Notification::Failure(msg));
    }

    /// Current screen: the open dialog, otherwise the menu plus active view
    pub fn render_current(&self) -> Result<String, AppError> {
        if let Some(modal) = self.dialogs.open() {
            return modal.render(&self.store);
        }

        let view_text = match self.navigation.active_view() {
            View::Users => self.user_list.render(&self.store)?,
            View::Roles => self.role_list.render(&self.store)?,
            View::Permissions => self.permission_list.render(&self.store)?,
            View::Settings => self.settings.render(&self.store)?,
        };
        Ok(format!("{}\n\n{}", self.navigation.render_menu(), view_text))
    }

    fn process_request(&mut self, request: Request) -> Result<Response, AppError> {
        match request {
            Request::None => return Ok(Response::None),
            Request::Quit => return Ok(Response::Quit),
            Request::View { view } => {
                self.navigation.navigate(view);
            }
            Request::List => {}
            Request::Search { ref query } => self.process_cmd_search(&request, query)?,
            Request::Add => self.process_cmd_add(&request)?,
            Request::Edit { ref id } => self.process_cmd_edit(&request, id)?,
            Request::Delete { ref id } => self.process_cmd_delete(&request, id)?,
            Request::Select { ref id } => {
                self.assert_view(View::Users, &request)?;
                self.user_list.toggle_selected(&self.store, id)?;
            }
            Request::SelectAll => {
                self.assert_view(View::Users, &request)?;
                self.user_list.toggle_select_all(&self.store)?;
            }
            Request::Bulk { action } => self.process_cmd_bulk(&request, action)?,
            Request::AssignRole { ref user_id } => {
                self.assert_view(View::Users, &request)?;
                let user = self.find_user(user_id)?;
                self.dialogs.user_role.open(user);
            }
            Request::Permissions { ref user_id } => {
                self.assert_view(View::Users, &request)?;
                let user = self.find_user(user_id)?;
                self.dialogs.user_permissions.open(user);
            }
            Request::Set {
                ref field,
                ref value,
            } => match self.dialogs.open_mut() {
                Some(modal) => modal.set_field(&self.store, field, value)?,
                None => return Err(Self::no_dialog_error(&request)),
            },
            Request::Toggle { ref permission_id } => {
                if !self.dialogs.role.is_open() {
                    return Err(Self::no_dialog_error(&request));
                }
                self.dialogs
                    .role
                    .toggle_permission(&self.store, permission_id)?;
            }
            Request::Choose { ref role_id } => {
                if !self.dialogs.user_role.is_open() {
                    return Err(Self::no_dialog_error(&request));
                }
                self.dialogs.user_role.choose_role(&self.store, role_id)?;
            }
            Request::Submit => match self.dialogs.open_mut() {
                Some(modal) => modal.submit(&mut self.store, self.notifier.as_mut())?,
                None => return Err(Self::no_dialog_error(&request)),
            },
            Request::Cancel => match self.dialogs.open_mut() {
                Some(modal) => modal.cancel(),
                None => return Err(Self::no_dialog_error(&request)),
            },
            Request::Theme => self.store.dispatch(Action::ToggleTheme)?,
        }

        Ok(Response::Text(self.render_current()?))
    }

    /// Process 'search' command
    fn process_cmd_search(&mut self, request: &Request, query: &str) -> Result<(), AppError> {
        match self.navigation.active_view() {
            View::Users => self.user_list.set_search(&self.store, query),
            View::Roles => {
                self.role_list.set_search(query);
                Ok(())
            }
            View::Permissions => {
                self.permission_list.set_search(query);
                Ok(())
            }
            View::Settings => Err(self.unsupported_error(request)),
        }
    }

    /// Process 'add' command
    fn process_cmd_add(&mut self, request: &Request) -> Result<(), AppError> {
        match self.navigation.active_view() {
            View::Users => self.dialogs.user.open_create(),
            View::Roles => self.dialogs.role.open_create(),
            View::Permissions => self.dialogs.permission.open_create(),
            View::Settings => return Err(self.unsupported_error(request)),
        }
        Ok(())
    }

    /// Process 'edit' command
    fn process_cmd_edit(&mut self, request: &Request, id: &str) -> Result<(), AppError> {
        match self.navigation.active_view() {
            View::Users => {
                let user = self.find_user(id)?;
                self.dialogs.user.open_edit(user);
            }
            View::Roles => {
                let role = self
                    .store
                    .find_role(id)?
                    .ok_or(AppError::NotFound(EntityKind::Role, id.to_string()))?;
                self.dialogs.role.open_edit(role);
            }
            View::Permissions => {
                let permission = self
                    .store
                    .find_permission(id)?
                    .ok_or(AppError::NotFound(EntityKind::Permission, id.to_string()))?;
                self.dialogs.permission.open_edit(permission);
            }
            View::Settings => return Err(self.unsupported_error(request)),
        }
        Ok(())
    }

    /// Process 'delete' command
    fn process_cmd_delete(&mut self, request: &Request, id: &str) -> Result<(), AppError> {
        let view = self.navigation.active_view();
        if view == View::Settings {
            return Err(self.unsupported_error(request));
        }

        let confirmer = self.confirmer.as_mut();
        let notifier = self.notifier.as_mut();
        let deleted = match view {
            View::Users => {
                self.user_list
                    .delete_user(&mut self.store, confirmer, notifier, id)?
            }
            View::Roles => {
                self.role_list
                    .delete_role(&mut self.store, confirmer, notifier, id)?
            }
            _ => self
                .permission_list
                .delete_permission(&mut self.store, confirmer, notifier, id)?,
        };

        if !deleted {
            debug(&target!(), &format!("Delete declined: id={}", id));
        }
        Ok(())
    }

    /// Process 'bulk' command
    fn process_cmd_bulk(&mut self, request: &Request, action: BulkAction) -> Result<(), AppError> {
        self.assert_view(View::Users, request)?;
        self.user_list.apply_bulk_action(
            &mut self.store,
            self.confirmer.as_mut(),
            self.notifier.as_mut(),
            action,
        )?;
        Ok(())
    }

    /// Keep view state consistent with the collections after store changes
    fn process_store_events(&mut self) -> Result<(), AppError> {
        let events: Vec<StoreEvent> = self
            .store_events
            .lock()
            .map_err(|err| {
                AppError::General(format!("Failed to access store events lock: err={}", err))
            })?
            .drain(..)
            .collect();

        if events.contains(&StoreEvent::UsersChanged) {
            self.user_list.prune_selection(&self.store)?;
        }
        Ok(())
    }

    fn find_user(&self, user_id: &str) -> Result<User, AppError> {
        self.store
            .find_user(user_id)?
            .ok_or(AppError::NotFound(EntityKind::User, user_id.to_string()))
    }

    fn assert_view(&self, view: View, request: &Request) -> Result<(), AppError> {
        match self.navigation.active_view() == view {
            true => Ok(()),
            false => Err(self.unsupported_error(request)),
        }
    }

    fn unsupported_error(&self, request: &Request) -> AppError {
        AppError::GenWithCodeAndMsg(
            CODE_BAD_REQUEST,
            format!(
                "Command not supported in {} view: cmd={:?}",
                self.navigation.active_view(),
                request
            ),
        )
    }

    fn no_dialog_error(request: &Request) -> AppError {
        AppError::GenWithCodeAndMsg(
            CODE_BAD_REQUEST,
            format!("No matching dialog is open: cmd={:?}", request),
        )
    }
}
