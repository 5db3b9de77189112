//! Repository Module
//!
//! One repository per entity collection. Every mutation loads the whole
//! collection, produces a new record (records are never edited in place) and
//! saves the whole collection back. Deletes never cascade: assignments that
//! point at a removed employee, cut or bundle stay as they are.

pub mod assignment;
pub mod category;
pub mod cut;
pub mod employee;

// Re-exports
pub use assignment::AssignmentRepository;
pub use category::CategoryRepository;
pub use cut::CutRepository;
pub use employee::EmployeeRepository;

use super::storage::{CollectionStore, StorageError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::AppError;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    /// Missing record or rejected input, carrying its specific code
    #[error("{0}")]
    Rejected(AppError),
}

impl From<StorageError> for RepoError {
    fn from(err: StorageError) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<AppError> for RepoError {
    fn from(err: AppError) -> Self {
        RepoError::Rejected(err)
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(msg) => AppError::storage(msg),
            RepoError::Rejected(err) => err,
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
pub trait Repository<T, CreateDto, UpdateDto> {
    fn find_all(&self) -> RepoResult<Vec<T>>;
    fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    fn create(&self, data: CreateDto) -> RepoResult<T>;
    fn update(&self, id: &str, data: UpdateDto) -> RepoResult<T>;
    fn delete(&self, id: &str) -> RepoResult<bool>;
}

/// Base repository: one collection key in the store
#[derive(Clone)]
pub struct BaseRepository {
    store: CollectionStore,
    key: &'static str,
}

impl BaseRepository {
    pub fn new(store: CollectionStore, key: &'static str) -> Self {
        Self { store, key }
    }

    pub fn load<T: DeserializeOwned>(&self) -> RepoResult<Vec<T>> {
        Ok(self.store.load(self.key)?)
    }

    pub fn save<T: Serialize>(&self, items: &[T]) -> RepoResult<()> {
        Ok(self.store.save(self.key, items)?)
    }
}
