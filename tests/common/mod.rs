//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which owns a temporary directory holding a
//! freshly migrated project database and a [`ProjectService`] over it.

#![allow(dead_code)]

use diy_common::{CategoryId, ProjectId};
use diy_db::config::DbConfig;
use diy_db::models::{NewMaterial, NewProject};
use diy_projects::ProjectService;
use tempfile::TempDir;

pub struct TestHarness {
    pub dir: TempDir,
    pub service: ProjectService,
}

impl TestHarness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let service = ProjectService::open(DbConfig::new(dir.path().join("projects.db")))
            .expect("failed to open project database");
        Self { dir, service }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.dir.path().join("projects.db"))
    }

    /// Count rows in `table` directly, bypassing the service.
    pub fn count_rows(&self, table: &str) -> i64 {
        let conn = rusqlite::Connection::open(self.dir.path().join("projects.db")).unwrap();
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .unwrap()
    }

    pub fn create_project(&self, name: &str) -> ProjectId {
        self.service
            .add_project(NewProject::named(name))
            .expect("failed to add project")
            .id
    }

    pub fn create_material(&self, project_id: ProjectId, name: &str) {
        self.service
            .add_material(
                project_id,
                NewMaterial {
                    name: name.to_string(),
                    num_required: Some(1),
                    cost: None,
                },
            )
            .expect("failed to add material");
    }

    pub fn create_category(&self, name: &str) -> CategoryId {
        self.service
            .add_category(name)
            .expect("failed to add category")
            .id
    }

    /// A project with two materials, two steps and two categories.
    pub fn create_full_project(&self, name: &str) -> ProjectId {
        let id = self.create_project(name);
        self.create_material(id, "Lumber");
        self.create_material(id, "Wood glue");
        self.service.add_step(id, "Measure twice").unwrap();
        self.service.add_step(id, "Cut once").unwrap();
        for category in ["Woodworking", "Garden"] {
            let category_id = self.create_category(category);
            self.service.assign_category(id, category_id).unwrap();
        }
        id
    }
}
