//! Persistence layer
//!
//! - [`storage`]: redb-backed whole-collection JSON store
//! - [`repository`]: per-entity `list/add/update/remove` on top of it

pub mod repository;
pub mod storage;

pub use storage::{CollectionStore, StorageError, StorageResult};
