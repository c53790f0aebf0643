use warden_common::error::AppError;
use warden_common::model::user::User;

/// User data repository trait
pub trait UserRepository: Sync + Send {
    /// Process given datasource connect string (meaning depends on implementation)
    fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError>;

    /// Appends a new user.
    ///
    /// Returns the stored user on success, otherwise it returns an error (ie duplicate id).
    fn add(&self, user: User) -> Result<User, AppError>;

    /// Replaces the user with the same id.
    ///
    /// Returns the previous user on success, otherwise it returns an error (ie unknown id).
    fn update(&self, user: User) -> Result<User, AppError>;

    /// Deletes all users with the given id.
    ///
    /// Returns the removed users on success, otherwise it returns an error (ie unknown id).
    fn delete(&self, user_id: &str) -> Result<Vec<User>, AppError>;

    /// Replaces the whole user collection (bulk seeding/sync).
    fn replace_all(&self, users: Vec<User>) -> Result<(), AppError>;

    /// Gets a user.
    ///
    /// Returns user or None on success, otherwise it returns an error.
    fn get(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Returns the list of all users, in insertion order.
    fn get_all(&self) -> Result<Vec<User>, AppError>;
}
