//! Data models
//!
//! Persisted as JSON arrays, one array per entity collection. Field names are
//! camelCase and ids are opaque strings, so collections written by earlier
//! versions of the shop tools load unchanged.
//!
//! Records reference each other by id only (an assignment stores `cutId`,
//! `operationId`, `bundleId`, `employeeId`); joins happen at read time.

/// Identity by `id`: two records are the same entity when their ids match,
/// whatever their other fields say.
macro_rules! impl_id_identity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl PartialEq for $ty {
                fn eq(&self, other: &Self) -> bool {
                    self.id == other.id
                }
            }

            impl Eq for $ty {}

            impl std::hash::Hash for $ty {
                fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                    self.id.hash(state);
                }
            }
        )+
    };
}

pub mod assignment;
pub mod category;
pub mod cut;
pub mod employee;

// Re-exports
pub use assignment::*;
pub use category::*;
pub use cut::*;
pub use employee::*;
