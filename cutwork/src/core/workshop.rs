use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Assignment, AssignmentCreate, AssignmentUpdate, Bundle, Category, Cut, CutCreate, CutUpdate,
    Employee, EmployeeCreate, EmployeeUpdate,
};

use crate::assignments::{available_bundles, eligible_employees};
use crate::core::Config;
use crate::db::CollectionStore;
use crate::db::repository::{
    AssignmentRepository, CategoryRepository, CutRepository, EmployeeRepository, Repository,
};
use crate::reports::{
    BreakdownSheet, DailyBreakdown, EmployeeHistory, HistoryTable, LedgerRow, MatrixTable,
    ProductionMatrix, Projector, aggregate_employee_history, aggregate_matrix, assignment_log,
    breakdown_for_day,
};

/// Every collection, loaded at one point in time
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub employees: Vec<Employee>,
    pub cuts: Vec<Cut>,
    /// Newest first
    pub assignments: Vec<Assignment>,
}

/// Workshop handle - owns the store and hands out repositories and reports
///
/// | Field | Collection |
/// |-------|------------|
/// | categories | `cwt_categories` |
/// | employees | `cwt_employees` |
/// | cuts | `cwt_cuts` |
/// | assignments | `cwt_assignments` |
///
/// Reports are recomputed from a fresh [`Snapshot`] on every call.
///
/// ```ignore
/// let workshop = Workshop::open(Config::from_env())?;
/// let table = workshop.matrix_table(None)?;
/// ```
#[derive(Clone)]
pub struct Workshop {
    config: Config,
    categories: CategoryRepository,
    employees: EmployeeRepository,
    cuts: CutRepository,
    assignments: AssignmentRepository,
    projector: Projector,
}

impl Workshop {
    /// Open (or create) the database file named by `config`
    pub fn open(config: Config) -> AppResult<Self> {
        let path = config.db_path();
        let store = CollectionStore::open(&path)
            .map_err(|e| AppError::storage(format!("Failed to open {}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), timezone = %config.timezone, "Workshop store opened");
        Ok(Self::with_store(config, store))
    }

    /// Workshop over a throwaway in-memory store
    pub fn open_in_memory(config: Config) -> AppResult<Self> {
        let store = CollectionStore::open_in_memory().map_err(|e| AppError::storage(e.to_string()))?;
        Ok(Self::with_store(config, store))
    }

    fn with_store(config: Config, store: CollectionStore) -> Self {
        Self {
            categories: CategoryRepository::new(store.clone()),
            employees: EmployeeRepository::new(store.clone()),
            cuts: CutRepository::new(store.clone(), config.default_bundle_size),
            assignments: AssignmentRepository::new(store, config.timezone),
            projector: Projector::new(config.currency_prefix.clone()),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Load every collection
    pub fn snapshot(&self) -> AppResult<Snapshot> {
        Ok(Snapshot {
            categories: self.categories.find_all()?,
            employees: self.employees.find_all()?,
            cuts: self.cuts.find_all()?,
            assignments: self.assignments.find_all()?,
        })
    }

    // ==================== Categories ====================

    pub fn categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.categories.find_all()?)
    }

    pub fn add_category(&self, name: &str) -> AppResult<Category> {
        Ok(self.categories.create(name)?)
    }

    pub fn delete_category(&self, name: &str) -> AppResult<bool> {
        Ok(self.categories.delete(name)?)
    }

    // ==================== Employees ====================

    pub fn employees(&self) -> AppResult<Vec<Employee>> {
        Ok(self.employees.find_all()?)
    }

    pub fn add_employee(&self, data: EmployeeCreate) -> AppResult<Employee> {
        Ok(self.employees.create(data)?)
    }

    pub fn update_employee(&self, id: &str, data: EmployeeUpdate) -> AppResult<Employee> {
        Ok(self.employees.update(id, data)?)
    }

    /// Assignments keep the id and drop out of the aggregate views
    pub fn delete_employee(&self, id: &str) -> AppResult<bool> {
        Ok(self.employees.delete(id)?)
    }

    // ==================== Cuts ====================

    pub fn cuts(&self) -> AppResult<Vec<Cut>> {
        Ok(self.cuts.find_all()?)
    }

    pub fn create_cut(&self, data: CutCreate) -> AppResult<Cut> {
        Ok(self.cuts.create(data)?)
    }

    pub fn update_cut(&self, id: &str, data: CutUpdate) -> AppResult<Cut> {
        Ok(self.cuts.update(id, data)?)
    }

    pub fn delete_cut(&self, id: &str) -> AppResult<bool> {
        Ok(self.cuts.delete(id)?)
    }

    // ==================== Assignments ====================

    pub fn assignments(&self) -> AppResult<Vec<Assignment>> {
        Ok(self.assignments.find_all()?)
    }

    pub fn record_assignment(&self, data: AssignmentCreate) -> AppResult<Assignment> {
        Ok(self.assignments.create(data)?)
    }

    pub fn update_assignment(&self, id: &str, data: AssignmentUpdate) -> AppResult<Assignment> {
        Ok(self.assignments.update(id, data)?)
    }

    pub fn delete_assignment(&self, id: &str) -> AppResult<bool> {
        Ok(self.assignments.delete(id)?)
    }

    fn require_cut(&self, snapshot: &Snapshot, cut_id: &str) -> AppResult<Cut> {
        snapshot
            .cuts
            .iter()
            .find(|c| c.id == cut_id)
            .cloned()
            .ok_or_else(|| AppError::new(ErrorCode::CutNotFound).with_detail("cut_id", cut_id))
    }

    /// Bundles of a cut with room left for an operation
    pub fn available_bundles(
        &self,
        cut_id: &str,
        operation_id: &str,
        editing: Option<&str>,
    ) -> AppResult<Vec<Bundle>> {
        let snapshot = self.snapshot()?;
        let cut = self.require_cut(&snapshot, cut_id)?;
        Ok(available_bundles(&cut, operation_id, &snapshot.assignments, editing)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Employees whose department matches an operation of a cut
    pub fn eligible_employees(&self, cut_id: &str, operation_id: &str) -> AppResult<Vec<Employee>> {
        let snapshot = self.snapshot()?;
        let cut = self.require_cut(&snapshot, cut_id)?;
        let operation = cut.operation(operation_id).ok_or_else(|| {
            AppError::new(ErrorCode::OperationNotFound).with_detail("operation_id", operation_id)
        })?;
        Ok(eligible_employees(&snapshot.employees, operation)
            .into_iter()
            .cloned()
            .collect())
    }

    // ==================== Reports ====================

    pub fn matrix(&self, role_filter: Option<&str>) -> AppResult<ProductionMatrix> {
        let s = self.snapshot()?;
        Ok(aggregate_matrix(&s.employees, &s.assignments, &s.cuts, role_filter))
    }

    pub fn employee_history(&self, employee_id: &str) -> AppResult<EmployeeHistory> {
        let s = self.snapshot()?;
        Ok(aggregate_employee_history(
            employee_id,
            &s.employees,
            &s.assignments,
            &s.cuts,
            self.config.timezone,
        ))
    }

    pub fn daily_breakdown(&self, employee_id: &str, date: NaiveDate) -> AppResult<DailyBreakdown> {
        let s = self.snapshot()?;
        Ok(breakdown_for_day(
            employee_id,
            date,
            &s.employees,
            &s.assignments,
            &s.cuts,
            self.config.timezone,
        ))
    }

    pub fn assignment_log(&self) -> AppResult<Vec<LedgerRow>> {
        let s = self.snapshot()?;
        Ok(assignment_log(&s.assignments, &s.employees, &s.cuts, self.config.timezone))
    }

    pub fn matrix_table(&self, role_filter: Option<&str>) -> AppResult<MatrixTable> {
        Ok(self.projector.matrix(&self.matrix(role_filter)?))
    }

    pub fn history_table(&self, employee_id: &str) -> AppResult<HistoryTable> {
        Ok(self.projector.history(&self.employee_history(employee_id)?))
    }

    pub fn breakdown_sheet(&self, employee_id: &str, date: NaiveDate) -> AppResult<BreakdownSheet> {
        Ok(self.projector.breakdown(&self.daily_breakdown(employee_id, date)?))
    }
}
