use crate::repository::in_memory_db::collection::InMemCollection;
use crate::repository::user_repo::UserRepository;
use warden_common::error::AppError;
use warden_common::model::user::User;

pub struct InMemUserRepo {
    users: InMemCollection<User>,
    source_file: Option<String>,
}

impl InMemUserRepo {
    /// Creates a new in-memory user store.
    pub fn new() -> InMemUserRepo {
        InMemUserRepo {
            users: InMemCollection::new(),
            source_file: None,
        }
    }

    /// JSON file the store was loaded from (if any)
    pub fn source_file(&self) -> Option<&str> {
        self.source_file.as_deref()
    }
}

impl Default for InMemUserRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemUserRepo {
    fn connect_to_datasource(&mut self, connect_spec: &str) -> Result<(), AppError> {
        // Load DB from JSON file
        self.users.load_file(connect_spec)?;
        self.source_file = Some(connect_spec.to_string());
        Ok(())
    }

    fn add(&self, user: User) -> Result<User, AppError> {
        self.users.add(user)
    }

    fn update(&self, user: User) -> Result<User, AppError> {
        self.users.update(user)
    }

    fn delete(&self, user_id: &str) -> Result<Vec<User>, AppError> {
        self.users.delete(user_id)
    }

    fn replace_all(&self, users: Vec<User>) -> Result<(), AppError> {
        self.users.replace_all(users)
    }

    fn get(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.users.get(user_id)
    }

    fn get_all(&self) -> Result<Vec<User>, AppError> {
        self.users.get_all()
    }
}
