//! Cut Repository

use super::{BaseRepository, RepoError, RepoResult, Repository};
use crate::cuts::{plan_cut, revise_cut};
use crate::db::storage::{CollectionStore, keys};
use shared::error::{AppError, ErrorCode};
use shared::models::{Cut, CutCreate, CutUpdate};

#[derive(Clone)]
pub struct CutRepository {
    base: BaseRepository,
    default_bundle_size: i64,
}

impl CutRepository {
    pub fn new(store: CollectionStore, default_bundle_size: i64) -> Self {
        Self {
            base: BaseRepository::new(store, keys::CUTS),
            default_bundle_size,
        }
    }
}

impl Repository<Cut, CutCreate, CutUpdate> for CutRepository {
    fn find_all(&self) -> RepoResult<Vec<Cut>> {
        self.base.load()
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Cut>> {
        Ok(self.find_all()?.into_iter().find(|c| c.id == id))
    }

    fn create(&self, data: CutCreate) -> RepoResult<Cut> {
        let cut = plan_cut(data, self.default_bundle_size)?;

        // newest first
        let mut cuts = self.find_all()?;
        cuts.insert(0, cut.clone());
        self.base.save(&cuts)?;

        tracing::info!(
            cut_id = %cut.id,
            cut_number = %cut.cut_number,
            total_pieces = cut.total_pieces,
            bundles = cut.bundles.len(),
            "Cut created"
        );
        Ok(cut)
    }

    fn update(&self, id: &str, data: CutUpdate) -> RepoResult<Cut> {
        let mut cuts = self.find_all()?;
        let slot = cuts.iter_mut().find(|c| c.id == id).ok_or_else(|| {
            RepoError::Rejected(AppError::new(ErrorCode::CutNotFound).with_detail("cut_id", id))
        })?;

        let revised = revise_cut(slot, data, self.default_bundle_size)?;
        *slot = revised.clone();
        self.base.save(&cuts)?;

        tracing::info!(cut_id = %id, "Cut updated");
        Ok(revised)
    }

    /// Assignments on the cut are left in place
    fn delete(&self, id: &str) -> RepoResult<bool> {
        let cuts = self.find_all()?;
        let remaining: Vec<Cut> = cuts.iter().filter(|c| c.id != id).cloned().collect();
        if remaining.len() == cuts.len() {
            return Ok(false);
        }
        self.base.save(&remaining)?;
        tracing::info!(cut_id = %id, "Cut deleted");
        Ok(true)
    }
}
