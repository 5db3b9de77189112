//! Core: configuration and the workshop facade
//!
//! - [`Config`] - environment-driven settings
//! - [`Workshop`] - store, repositories and reports behind one handle

pub mod config;
pub mod workshop;

pub use config::Config;
pub use workshop::{Snapshot, Workshop};
