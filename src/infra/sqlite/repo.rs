use std::path::PathBuf;

use crate::infra::sqlite::queries::{get_value, remove_value, set_value};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::storage::{KeyValueStore, StoreError};

pub struct SqliteStore {
    pub db_path: PathBuf,
}

impl SqliteStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn init(&self) -> Result<(), StoreError> {
        init_db(&self.db_path).map_err(|err| StoreError::Message(format!("{err:#}")))
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        get_value(&self.db_path, key).map_err(|err| StoreError::Message(format!("{err:#}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        set_value(&self.db_path, key, value).map_err(|err| StoreError::Message(format!("{err:#}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        remove_value(&self.db_path, key).map_err(|err| StoreError::Message(format!("{err:#}")))
    }
}
