//! Assignment workflow: which bundles are open, who may take them, and
//! whether a draft may be stored.

pub mod availability;
pub mod entry;

pub use availability::{available_bundles, covered_pieces, eligible_employees};
pub use entry::{merge_update, new_assignment, revise_assignment, validate_draft};
