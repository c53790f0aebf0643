pub mod permission_modal;
pub mod role_modal;
pub mod user_modal;
pub mod user_permissions_modal;
pub mod user_role_modal;

use crate::interaction::Notifier;
use crate::store::EntityStore;
use warden_common::error::{AppError, CODE_BAD_REQUEST};

/// Edit dialog lifecycle
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ModalState<T> {
    #[default]
    Closed,
    /// Dialog opened for a new entity
    Create,
    /// Dialog opened for an existing entity (its state when the dialog was opened)
    Edit(T),
}

impl<T> ModalState<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }
}

/// Operations common to every dialog, driven by the console controller
pub trait Modal {
    /// Dialog title (used in prompts and error messages)
    fn title(&self) -> &'static str;

    fn is_open(&self) -> bool;

    /// Set a form field value
    ///
    /// # Arguments
    ///
    /// * `store` - Entity store (for fields referencing other entities)
    /// * `field` - Form field name
    /// * `value` - New field value
    ///
    /// # Returns
    ///
    /// A [`Result`] indicating success/failure. Unknown fields are a bad request.
    ///
    fn set_field(&mut self, store: &EntityStore, field: &str, value: &str) -> Result<(), AppError>;

    /// Validate form and write resulting entity to the store. The dialog closes only on success.
    fn submit(&mut self, store: &mut EntityStore, notifier: &mut dyn Notifier) -> Result<(), AppError>;

    /// Close dialog without touching the store
    fn cancel(&mut self);

    /// Dialog text
    fn render(&self, store: &EntityStore) -> Result<String, AppError>;
}

/// Trimmed field value, or [`AppError::RequiredField`] if empty
pub(crate) fn require_field(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    match value.is_empty() {
        true => Err(AppError::RequiredField(field.to_string())),
        false => Ok(value.to_string()),
    }
}

pub(crate) fn unknown_field_error(modal_title: &str, field: &str) -> AppError {
    AppError::GenWithCodeAndMsg(
        CODE_BAD_REQUEST,
        format!("Unknown field: dialog={}, field={}", modal_title, field),
    )
}

/// Fresh client-side entity id
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
