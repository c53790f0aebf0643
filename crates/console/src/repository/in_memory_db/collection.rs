use std::fs;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use warden_common::error::AppError;
use warden_common::model::Entity;

/// Insertion-ordered in-memory entity collection, shared by the in-memory repositories
pub struct InMemCollection<T: Entity> {
    entities: RwLock<Vec<T>>,
}

impl<T: Entity + DeserializeOwned> InMemCollection<T> {
    /// Creates a new, empty collection.
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(Vec::new()),
        }
    }

    fn access_data_for_write(&self) -> Result<RwLockWriteGuard<'_, Vec<T>>, AppError> {
        self.entities.write().map_err(|err| {
            AppError::General(format!("Failed to access write lock to DB: err={}", err))
        })
    }

    fn access_data_for_read(&self) -> Result<RwLockReadGuard<'_, Vec<T>>, AppError> {
        self.entities.read().map_err(|err| {
            AppError::General(format!("Failed to access read lock to DB: err={}", err))
        })
    }

    /// Replace collection contents with the JSON array records in the given file
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path to JSON file (array of entity records)
    ///
    /// # Returns
    ///
    /// A [`Result`] indicating success/failure of the load.
    ///
    pub fn load_file(&self, file_path: &str) -> Result<(), AppError> {
        let data = fs::read_to_string(file_path).map_err(|err| {
            AppError::GenWithMsgAndErr(
                format!("Failed to read file: path={}", file_path),
                Box::new(err),
            )
        })?;
        let entities: Vec<T> = serde_json::from_str(&data).map_err(|err| {
            AppError::GenWithMsgAndErr(
                format!("Failed to parse JSON: path={}", file_path),
                Box::new(err),
            )
        })?;

        self.replace_all(entities)
    }

    /// Appends entity. Fails (collection unchanged) if the id is already used.
    pub fn add(&self, entity: T) -> Result<T, AppError> {
        let mut data = self.access_data_for_write()?;
        if data.iter().any(|existing| existing.id() == entity.id()) {
            return Err(AppError::DuplicateId(T::KIND, entity.id().to_string()));
        }
        data.push(entity.clone());
        Ok(entity)
    }

    /// Replaces the first entity with a matching id, returning the previous value.
    pub fn update(&self, entity: T) -> Result<T, AppError> {
        let mut data = self.access_data_for_write()?;
        match data.iter_mut().find(|existing| existing.id() == entity.id()) {
            Some(existing) => Ok(std::mem::replace(existing, entity)),
            None => Err(AppError::NotFound(T::KIND, entity.id().to_string())),
        }
    }

    /// Removes all entities with a matching id (keeping order of the rest), returning the removed.
    pub fn delete(&self, id: &str) -> Result<Vec<T>, AppError> {
        let mut data = self.access_data_for_write()?;
        let (removed, kept): (Vec<T>, Vec<T>) =
            data.drain(..).partition(|existing| existing.id() == id);
        *data = kept;
        if removed.is_empty() {
            return Err(AppError::NotFound(T::KIND, id.to_string()));
        }
        Ok(removed)
    }

    /// Bulk overwrite, no validation performed.
    pub fn replace_all(&self, entities: Vec<T>) -> Result<(), AppError> {
        let mut data = self.access_data_for_write()?;
        *data = entities;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<T>, AppError> {
        let data = self.access_data_for_read()?;
        Ok(data.iter().find(|entity| entity.id() == id).cloned())
    }

    pub fn get_all(&self) -> Result<Vec<T>, AppError> {
        let data = self.access_data_for_read()?;
        Ok(data.clone())
    }
}

impl<T: Entity + DeserializeOwned> Default for InMemCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}
