//! Diy-projects - track do-it-yourself projects
//!
//! This library crate exposes the project service and configuration loading
//! used by the `diy-projects` binary, and for integration testing.

pub mod config;
pub mod service;

pub use service::ProjectService;
