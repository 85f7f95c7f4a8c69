//! `recon-diff` — Identity-preserving reconciliation of new vs. old records.
//!
//! Pure engine crate: receives the new and old record sets, returns them
//! classified into ADD / UPDATE / UPDATE_BEFORE / DELETE. No IO; callers
//! apply the buckets to their store.

pub mod config;
pub mod duplicates;
pub mod engine;
pub mod entity;
pub mod error;
pub mod model;

pub use config::{DuplicatePolicy, ReconcileOptions};
pub use engine::{compare, compare_with_common, reconcile, reconcile_entities, run};
pub use entity::{CommonKey, Identified};
pub use error::ReconcileError;
pub use model::{BucketSummary, Buckets, Tag};
