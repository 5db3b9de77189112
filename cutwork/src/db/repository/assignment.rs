//! Assignment Repository
//!
//! Newest records first: creation inserts at the head of the list.

use super::{BaseRepository, RepoError, RepoResult, Repository};
use crate::assignments::{merge_update, new_assignment, revise_assignment, validate_draft};
use crate::db::storage::{CollectionStore, keys};
use chrono_tz::Tz;
use shared::error::{AppError, ErrorCode};
use shared::models::{Assignment, AssignmentCreate, AssignmentUpdate, Cut, Employee};

#[derive(Clone)]
pub struct AssignmentRepository {
    base: BaseRepository,
    employees: BaseRepository,
    cuts: BaseRepository,
    timezone: Tz,
}

impl AssignmentRepository {
    pub fn new(store: CollectionStore, timezone: Tz) -> Self {
        Self {
            base: BaseRepository::new(store.clone(), keys::ASSIGNMENTS),
            employees: BaseRepository::new(store.clone(), keys::EMPLOYEES),
            cuts: BaseRepository::new(store, keys::CUTS),
            timezone,
        }
    }

    fn validate(
        &self,
        draft: &AssignmentCreate,
        assignments: &[Assignment],
        editing: Option<&str>,
    ) -> RepoResult<()> {
        let employees: Vec<Employee> = self.employees.load()?;
        let cuts: Vec<Cut> = self.cuts.load()?;
        validate_draft(draft, &employees, &cuts, assignments, editing)?;
        Ok(())
    }
}

impl Repository<Assignment, AssignmentCreate, AssignmentUpdate> for AssignmentRepository {
    fn find_all(&self) -> RepoResult<Vec<Assignment>> {
        self.base.load()
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Assignment>> {
        Ok(self.find_all()?.into_iter().find(|a| a.id == id))
    }

    fn create(&self, data: AssignmentCreate) -> RepoResult<Assignment> {
        let mut assignments = self.find_all()?;
        self.validate(&data, &assignments, None)?;

        let assignment = new_assignment(data, self.timezone);
        assignments.insert(0, assignment.clone());
        self.base.save(&assignments)?;

        tracing::info!(
            assignment_id = %assignment.id,
            employee_id = %assignment.employee_id,
            bundle_id = %assignment.bundle_id,
            pieces = assignment.piece_count(),
            "Assignment recorded"
        );
        Ok(assignment)
    }

    fn update(&self, id: &str, data: AssignmentUpdate) -> RepoResult<Assignment> {
        let mut assignments = self.find_all()?;
        let index = assignments.iter().position(|a| a.id == id).ok_or_else(|| {
            RepoError::Rejected(
                AppError::new(ErrorCode::AssignmentNotFound).with_detail("assignment_id", id),
            )
        })?;

        let draft = merge_update(&assignments[index], data, self.timezone);
        self.validate(&draft, &assignments, Some(id))?;

        let revised = revise_assignment(&assignments[index], draft, self.timezone);
        assignments[index] = revised.clone();
        self.base.save(&assignments)?;

        tracing::info!(assignment_id = %id, "Assignment updated");
        Ok(revised)
    }

    fn delete(&self, id: &str) -> RepoResult<bool> {
        let assignments = self.find_all()?;
        let remaining: Vec<Assignment> = assignments.iter().filter(|a| a.id != id).cloned().collect();
        if remaining.len() == assignments.len() {
            return Ok(false);
        }
        self.base.save(&remaining)?;
        tracing::info!(assignment_id = %id, "Assignment deleted");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::{CutRepository, EmployeeRepository};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use shared::models::{CutCreate, EmployeeCreate, OperationRate};

    struct Fixture {
        repo: AssignmentRepository,
        employee: Employee,
        cut: Cut,
    }

    fn fixture() -> Fixture {
        let store = CollectionStore::open_in_memory().unwrap();
        let employee = EmployeeRepository::new(store.clone())
            .create(EmployeeCreate {
                name: "Asha".to_string(),
                role: Some("Cutting".to_string()),
            })
            .unwrap();
        let cut = CutRepository::new(store.clone(), 50)
            .create(CutCreate {
                cut_number: "101".to_string(),
                cut_name: Some("A-101".to_string()),
                total_pieces: 120,
                bundle_size: None,
                rates: vec![OperationRate::new("Cutting", Decimal::new(25, 1))],
            })
            .unwrap();
        Fixture {
            repo: AssignmentRepository::new(store, Tz::UTC),
            employee,
            cut,
        }
    }

    fn draft(f: &Fixture, bundle: usize, start: i64, end: i64) -> AssignmentCreate {
        AssignmentCreate {
            employee_id: f.employee.id.clone(),
            cut_id: f.cut.id.clone(),
            operation_id: f.cut.operations[0].id.clone(),
            bundle_id: f.cut.bundles[bundle].id.clone(),
            start_piece: start,
            end_piece: end,
            work_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    #[test]
    fn test_create_inserts_newest_first() {
        let f = fixture();
        let first = f.repo.create(draft(&f, 0, 1, 50)).unwrap();
        let second = f.repo.create(draft(&f, 1, 51, 60)).unwrap();

        let all = f.repo.find_all().unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert_eq!(first.assigned_at, 1_704_844_800_000);
    }

    #[test]
    fn test_create_rejects_taken_bundle() {
        let f = fixture();
        f.repo.create(draft(&f, 0, 1, 50)).unwrap();
        let err: AppError = f.repo.create(draft(&f, 0, 1, 10)).unwrap_err().into();
        assert_eq!(err.code, ErrorCode::BundleUnavailable);
        assert_eq!(f.repo.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_update_in_place_ignores_own_range() {
        let f = fixture();
        f.repo.create(draft(&f, 1, 51, 60)).unwrap();
        let a = f.repo.create(draft(&f, 0, 1, 50)).unwrap();

        let updated = f
            .repo
            .update(
                &a.id,
                AssignmentUpdate {
                    end_piece: Some(40),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, a.id);
        assert_eq!(updated.piece_count(), 40);

        let all = f.repo.find_all().unwrap();
        assert_eq!(all[0].id, a.id);
        assert_eq!(all[0].end_piece, 40);
    }

    #[test]
    fn test_update_and_delete_missing() {
        let f = fixture();
        let err: AppError = f
            .repo
            .update("missing", AssignmentUpdate::default())
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::AssignmentNotFound);
        assert!(!f.repo.delete("missing").unwrap());
    }
}
