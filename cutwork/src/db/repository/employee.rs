//! Employee Repository

use super::{BaseRepository, CategoryRepository, RepoError, RepoResult, Repository};
use crate::db::storage::{CollectionStore, keys};
use shared::error::{AppError, ErrorCode};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};
use shared::util::new_id;

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
    categories: CategoryRepository,
}

impl EmployeeRepository {
    pub fn new(store: CollectionStore) -> Self {
        Self {
            base: BaseRepository::new(store.clone(), keys::EMPLOYEES),
            categories: CategoryRepository::new(store),
        }
    }

    fn clean_name(name: &str) -> RepoResult<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RepoError::Rejected(AppError::new(ErrorCode::EmployeeNameEmpty)));
        }
        Ok(trimmed.to_string())
    }

    /// Given role, or the first category when none (or a blank one) is given
    fn resolve_role(&self, role: Option<String>) -> RepoResult<String> {
        match role.filter(|r| !r.trim().is_empty()) {
            Some(role) => Ok(role),
            None => self
                .categories
                .first()?
                .map(|c| c.to_string())
                .ok_or_else(|| RepoError::Rejected(AppError::new(ErrorCode::EmployeeRoleMissing))),
        }
    }

    fn not_found(id: &str) -> RepoError {
        RepoError::Rejected(AppError::new(ErrorCode::EmployeeNotFound).with_detail("employee_id", id))
    }
}

impl Repository<Employee, EmployeeCreate, EmployeeUpdate> for EmployeeRepository {
    fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.base.load()
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Employee>> {
        Ok(self.find_all()?.into_iter().find(|e| e.id == id))
    }

    fn create(&self, data: EmployeeCreate) -> RepoResult<Employee> {
        let employee = Employee {
            id: new_id(),
            name: Self::clean_name(&data.name)?,
            role: self.resolve_role(data.role)?,
        };

        let mut employees = self.find_all()?;
        employees.push(employee.clone());
        self.base.save(&employees)?;

        tracing::info!(employee_id = %employee.id, role = %employee.role, "Employee added");
        Ok(employee)
    }

    fn update(&self, id: &str, data: EmployeeUpdate) -> RepoResult<Employee> {
        let mut employees = self.find_all()?;
        let slot = employees
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        let updated = Employee {
            id: slot.id.clone(),
            name: match data.name {
                Some(name) => Self::clean_name(&name)?,
                None => slot.name.clone(),
            },
            role: match data.role {
                Some(role) => self.resolve_role(Some(role))?,
                None => slot.role.clone(),
            },
        };
        *slot = updated.clone();
        self.base.save(&employees)?;

        tracing::info!(employee_id = %id, "Employee updated");
        Ok(updated)
    }

    /// Existing assignments keep pointing at the removed id
    fn delete(&self, id: &str) -> RepoResult<bool> {
        let employees = self.find_all()?;
        let remaining: Vec<Employee> = employees.iter().filter(|e| e.id != id).cloned().collect();
        if remaining.len() == employees.len() {
            return Ok(false);
        }
        self.base.save(&remaining)?;
        tracing::info!(employee_id = %id, "Employee deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (EmployeeRepository, CategoryRepository) {
        let store = CollectionStore::open_in_memory().unwrap();
        (EmployeeRepository::new(store.clone()), CategoryRepository::new(store))
    }

    fn code(err: RepoError) -> ErrorCode {
        AppError::from(err).code
    }

    #[test]
    fn test_create_trims_name_and_defaults_role() {
        let (repo, categories) = setup();
        categories.create("Cutting").unwrap();
        categories.create("Singer").unwrap();

        let emp = repo
            .create(EmployeeCreate {
                name: "  Asha ".to_string(),
                role: None,
            })
            .unwrap();
        assert_eq!(emp.name, "Asha");
        assert_eq!(emp.role, "Cutting");

        let emp = repo
            .create(EmployeeCreate {
                name: "Ravi".to_string(),
                role: Some("Singer".to_string()),
            })
            .unwrap();
        assert_eq!(emp.role, "Singer");
        assert_eq!(repo.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_create_rejections() {
        let (repo, _) = setup();
        let err = repo
            .create(EmployeeCreate {
                name: " ".to_string(),
                role: Some("Cutting".to_string()),
            })
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::EmployeeNameEmpty);

        let err = repo
            .create(EmployeeCreate {
                name: "Asha".to_string(),
                role: None,
            })
            .unwrap_err();
        assert_eq!(code(err), ErrorCode::EmployeeRoleMissing);
    }

    #[test]
    fn test_update_replaces_record() {
        let (repo, _) = setup();
        let emp = repo
            .create(EmployeeCreate {
                name: "Asha".to_string(),
                role: Some("Cutting".to_string()),
            })
            .unwrap();

        let updated = repo
            .update(
                &emp.id,
                EmployeeUpdate {
                    role: Some("Singer".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Asha");
        assert_eq!(updated.role, "Singer");
        assert_eq!(repo.find_by_id(&emp.id).unwrap().unwrap().role, "Singer");

        let err = repo.update("missing", EmployeeUpdate::default()).unwrap_err();
        assert_eq!(code(err), ErrorCode::EmployeeNotFound);
    }

    #[test]
    fn test_delete() {
        let (repo, _) = setup();
        let emp = repo
            .create(EmployeeCreate {
                name: "Asha".to_string(),
                role: Some("Cutting".to_string()),
            })
            .unwrap();
        assert!(repo.delete(&emp.id).unwrap());
        assert!(!repo.delete(&emp.id).unwrap());
        assert!(repo.find_by_id(&emp.id).unwrap().is_none());
    }
}
