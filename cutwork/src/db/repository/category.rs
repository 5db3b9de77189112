//! Category Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::storage::{CollectionStore, keys};
use shared::error::{AppError, ErrorCode};
use shared::models::Category;

#[derive(Clone)]
pub struct CategoryRepository {
    base: BaseRepository,
}

impl CategoryRepository {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            base: BaseRepository::new(store, keys::CATEGORIES),
        }
    }

    /// All categories in the order they were added
    pub fn find_all(&self) -> RepoResult<Vec<Category>> {
        self.base.load()
    }

    /// Default department for new employees
    pub fn first(&self) -> RepoResult<Option<Category>> {
        Ok(self.find_all()?.into_iter().next())
    }

    /// Add a category (trimmed, exact duplicates rejected)
    pub fn create(&self, name: &str) -> RepoResult<Category> {
        let category =
            Category::parse(name).ok_or_else(|| AppError::new(ErrorCode::CategoryNameEmpty))?;

        let mut categories = self.find_all()?;
        if categories.contains(&category) {
            return Err(RepoError::Rejected(
                AppError::new(ErrorCode::CategoryExists).with_detail("name", category.as_str()),
            ));
        }

        categories.push(category.clone());
        self.base.save(&categories)?;
        tracing::info!(category = %category, "Category added");
        Ok(category)
    }

    /// Delete a category by name. Employees and operations keep the name.
    pub fn delete(&self, name: &str) -> RepoResult<bool> {
        let categories = self.find_all()?;
        let remaining: Vec<Category> = categories
            .iter()
            .filter(|c| c.as_str() != name)
            .cloned()
            .collect();

        if remaining.len() == categories.len() {
            return Ok(false);
        }
        self.base.save(&remaining)?;
        tracing::info!(category = name, "Category deleted");
        Ok(true)
    }
}
