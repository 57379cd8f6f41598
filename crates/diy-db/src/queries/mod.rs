//! Database query modules.
//!
//! Each function takes a borrowed connection (or an open transaction, which
//! derefs to one) and runs one statement group against it. Transaction
//! boundaries belong to the caller; see [`crate::dao`].
//!
//! - projects: Project root rows
//! - materials: Materials owned by a project
//! - steps: Ordered steps owned by a project
//! - categories: Categories and project links

pub mod categories;
pub mod materials;
pub mod projects;
pub mod steps;
