//! Import pasted site exports into the stats database.
//!
//! This crate owns the orchestration: format detection hand-off, parsing,
//! per-format upsert drivers, import logging, and the provisional catalog
//! item reconciler.

pub mod import;
pub mod reconcile;

pub use import::{import_text, ImportCounts, ImportError, ImportReport};
pub use reconcile::{reconcile_catalog_items, ReconcileStats};
