//! Diy-DB: schema, migrations, and record access for DIY projects.
//!
//! This crate stores projects and their materials, steps and categories in
//! SQLite via rusqlite. Every operation opens its own connection and runs in
//! its own transaction; there is no pooling.
//!
//! # Modules
//!
//! - `config` - Database configuration passed in at construction
//! - `connection` - Per-operation connection provider
//! - `migrations` - Database schema migrations
//! - `models` - Rust models matching database schema
//! - `decimal` - Fixed-point values for `decimal(7,2)` columns
//! - `queries` - Statement-level query functions
//! - `dao` - Transactional record access layer over the queries
//!
//! # Example
//!
//! ```no_run
//! use diy_db::{config::DbConfig, connection::init_database, dao::ProjectDao};
//! use diy_db::models::NewProject;
//!
//! let provider = init_database(DbConfig::new("/var/lib/diy/projects.db")).unwrap();
//! let dao = ProjectDao::new(provider);
//!
//! let project = dao.insert(NewProject::named("Bookshelf")).unwrap();
//! println!("Created project {}", project.id);
//! ```

pub mod config;
pub mod connection;
pub mod dao;
pub mod decimal;
pub mod migrations;
pub mod models;
pub mod queries;
