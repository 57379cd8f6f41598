//! Transactional record access for the project aggregate.
//!
//! [`ProjectDao`] is the only way the application touches the store. Each
//! method opens a connection, runs its statements inside one transaction and
//! commits. On any error the transaction rolls back and the connection is
//! closed before the error is returned, so no call leaves partial writes
//! behind and no resource outlives the call.

use diy_common::{CategoryId, Error, ProjectId, Result};
use rusqlite::Transaction;

use crate::connection::ConnectionProvider;
use crate::models::{Category, Material, NewMaterial, NewProject, Project, Step};
use crate::queries::{categories, materials, projects, steps};

/// Record access layer over the project tables.
#[derive(Debug, Clone)]
pub struct ProjectDao {
    provider: ConnectionProvider,
}

impl ProjectDao {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    /// Run `op` inside a fresh connection and transaction.
    ///
    /// Commits when `op` succeeds, rolls back otherwise. The connection is
    /// dropped on every path.
    fn in_transaction<T>(
        &self,
        operation: &'static str,
        op: impl FnOnce(&Transaction<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut conn = self.provider.open()?;
        let tx = conn.transaction().map_err(Error::database)?;

        match op(&tx) {
            Ok(value) => {
                tx.commit().map_err(|e| {
                    tracing::warn!(operation, error = %e, "Commit failed");
                    Error::database(e)
                })?;
                Ok(value)
            }
            Err(err) => {
                if err.is_database() {
                    tracing::warn!(operation, error = %err, "Rolling back transaction");
                } else {
                    tracing::debug!(operation, error = %err, "Rolling back transaction");
                }
                if let Err(rollback_err) = tx.rollback() {
                    tracing::warn!(operation, error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Insert a project and return it with its generated id.
    pub fn insert(&self, project: NewProject) -> Result<Project> {
        let project = self.in_transaction("insert", |tx| projects::insert_project(tx, project))?;
        tracing::info!(project_id = %project.id, "Inserted project {:?}", project.name);
        Ok(project)
    }

    /// All projects ordered by name, without child collections.
    pub fn fetch_all(&self) -> Result<Vec<Project>> {
        let all = self.in_transaction("fetch_all", |tx| projects::list_projects(tx))?;
        tracing::debug!("Fetched {} project(s)", all.len());
        Ok(all)
    }

    /// The full aggregate for `id`: the project row plus its materials,
    /// steps and categories, read within one transaction.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Project))` - The project with child collections attached
    /// * `Ok(None)` - If no project has this id
    /// * `Err(Error)` - If a database error occurs
    pub fn fetch_by_id(&self, id: ProjectId) -> Result<Option<Project>> {
        self.in_transaction("fetch_by_id", |tx| {
            let Some(mut project) = projects::get_project(tx, id)? else {
                tracing::debug!(project_id = %id, "Project not found");
                return Ok(None);
            };

            project.materials = materials::list_materials_for_project(tx, id)?;
            project.steps = steps::list_steps_for_project(tx, id)?;
            project.categories = categories::list_categories_for_project(tx, id)?;

            tracing::debug!(
                project_id = %id,
                materials = project.materials.len(),
                steps = project.steps.len(),
                categories = project.categories.len(),
                "Fetched project aggregate"
            );
            Ok(Some(project))
        })
    }

    /// Update every mutable field of `project`.
    ///
    /// Returns `false` if no project has `project.id`.
    pub fn update(&self, project: &Project) -> Result<bool> {
        let updated = self.in_transaction("update", |tx| projects::update_project(tx, project))?;
        if updated {
            tracing::info!(project_id = %project.id, "Updated project");
        }
        Ok(updated)
    }

    /// Delete a project and, through the cascade, its children and links.
    ///
    /// Returns `false` if no project has this id.
    pub fn delete(&self, id: ProjectId) -> Result<bool> {
        let deleted = self.in_transaction("delete", |tx| projects::delete_project(tx, id))?;
        if deleted {
            tracing::info!(project_id = %id, "Deleted project");
        }
        Ok(deleted)
    }

    /// Add a material to an existing project.
    pub fn add_material(&self, project_id: ProjectId, material: NewMaterial) -> Result<Material> {
        self.in_transaction("add_material", |tx| {
            require_project(tx, project_id)?;
            materials::insert_material(tx, project_id, material)
        })
    }

    /// Append a step to an existing project.
    pub fn add_step(&self, project_id: ProjectId, text: &str) -> Result<Step> {
        self.in_transaction("add_step", |tx| {
            require_project(tx, project_id)?;
            steps::append_step(tx, project_id, text)
        })
    }

    pub fn add_category(&self, name: &str) -> Result<Category> {
        self.in_transaction("add_category", |tx| categories::insert_category(tx, name))
    }

    pub fn fetch_all_categories(&self) -> Result<Vec<Category>> {
        self.in_transaction("fetch_all_categories", |tx| categories::list_categories(tx))
    }

    /// Link a category to a project.
    ///
    /// Returns `false` if they were already linked.
    pub fn assign_category(&self, project_id: ProjectId, category_id: CategoryId) -> Result<bool> {
        self.in_transaction("assign_category", |tx| {
            require_project(tx, project_id)?;
            if !categories::category_exists(tx, category_id)? {
                return Err(Error::not_found("category", category_id));
            }
            categories::link_category(tx, project_id, category_id)
        })
    }
}

fn require_project(tx: &Transaction<'_>, id: ProjectId) -> Result<()> {
    if projects::project_exists(tx, id)? {
        Ok(())
    } else {
        Err(Error::not_found("project", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::test_support::temp_database;

    fn dao() -> (tempfile::TempDir, ProjectDao) {
        let (dir, provider) = temp_database();
        (dir, ProjectDao::new(provider))
    }

    fn project_count(dao: &ProjectDao) -> i64 {
        let conn = dao.provider.open().unwrap();
        conn.query_row("SELECT COUNT(*) FROM project", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn test_insert_then_fetch_by_id() {
        let (_dir, dao) = dao();
        let new = NewProject {
            name: "Garden bench".into(),
            estimated_hours: Some("6.25".parse().unwrap()),
            actual_hours: Some("7".parse().unwrap()),
            difficulty: Some(2),
            notes: Some("Weatherproof finish".into()),
        };

        let stored = dao.insert(new.clone()).unwrap();
        assert!(stored.id.get() > 0);

        let fetched = dao.fetch_by_id(stored.id).unwrap().unwrap();
        assert_eq!(fetched.name, new.name);
        assert_eq!(fetched.estimated_hours, new.estimated_hours);
        assert_eq!(fetched.actual_hours, new.actual_hours);
        assert_eq!(fetched.difficulty, new.difficulty);
        assert_eq!(fetched.notes, new.notes);
    }

    #[test]
    fn test_fetch_by_id_missing() {
        let (_dir, dao) = dao();
        assert!(dao.fetch_by_id(ProjectId::from(1)).unwrap().is_none());
    }

    #[test]
    fn test_fetch_by_id_loads_children() {
        let (_dir, dao) = dao();
        let project = dao.insert(NewProject::named("Bookcase")).unwrap();
        let other = dao.insert(NewProject::named("Other")).unwrap();

        for name in ["Plywood", "Nails"] {
            dao.add_material(
                project.id,
                NewMaterial {
                    name: name.into(),
                    ..NewMaterial::default()
                },
            )
            .unwrap();
        }
        dao.add_material(
            other.id,
            NewMaterial {
                name: "Paint".into(),
                ..NewMaterial::default()
            },
        )
        .unwrap();
        dao.add_step(project.id, "Cut shelves").unwrap();
        dao.add_step(project.id, "Assemble").unwrap();
        let wood = dao.add_category("Woodworking").unwrap();
        let furniture = dao.add_category("Furniture").unwrap();
        dao.assign_category(project.id, wood.id).unwrap();
        dao.assign_category(project.id, furniture.id).unwrap();

        let aggregate = dao.fetch_by_id(project.id).unwrap().unwrap();
        assert_eq!(aggregate.materials.len(), 2);
        assert_eq!(aggregate.steps.len(), 2);
        assert_eq!(aggregate.categories.len(), 2);
        assert!(aggregate.materials.iter().all(|m| m.project_id == project.id));
        assert!(aggregate.steps.iter().all(|s| s.project_id == project.id));
        assert_eq!(aggregate.steps[0].text, "Cut shelves");
        assert_eq!(aggregate.categories, vec![furniture, wood]);
    }

    #[test]
    fn test_fetch_all_has_no_children() {
        let (_dir, dao) = dao();
        let project = dao.insert(NewProject::named("Lamp")).unwrap();
        dao.add_step(project.id, "Wire socket").unwrap();

        let all = dao.fetch_all().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].steps.is_empty());
        assert!(all[0].materials.is_empty());
        assert!(all[0].categories.is_empty());
    }

    #[test]
    fn test_update_and_delete_report_missing_rows() {
        let (_dir, dao) = dao();
        let mut project = dao.insert(NewProject::named("Fence")).unwrap();

        project.actual_hours = Some("3.5".parse().unwrap());
        assert!(dao.update(&project).unwrap());

        assert!(dao.delete(project.id).unwrap());
        assert!(!dao.update(&project).unwrap());
        assert!(!dao.delete(project.id).unwrap());
    }

    #[test]
    fn test_children_of_missing_project_are_not_found() {
        let (_dir, dao) = dao();
        let missing = ProjectId::from(77);

        assert!(dao
            .add_material(missing, NewMaterial::default())
            .unwrap_err()
            .is_not_found());
        assert!(dao.add_step(missing, "Nope").unwrap_err().is_not_found());

        let category = dao.add_category("Misc").unwrap();
        assert!(dao
            .assign_category(missing, category.id)
            .unwrap_err()
            .is_not_found());

        let project = dao.insert(NewProject::named("Real")).unwrap();
        let err = dao
            .assign_category(project.id, CategoryId::from(999))
            .unwrap_err();
        assert_eq!(err.to_string(), "category not found: 999");
    }

    #[test]
    fn test_assign_category_twice() {
        let (_dir, dao) = dao();
        let project = dao.insert(NewProject::named("Rack")).unwrap();
        let category = dao.add_category("Storage").unwrap();

        assert!(dao.assign_category(project.id, category.id).unwrap());
        assert!(!dao.assign_category(project.id, category.id).unwrap());
    }

    #[test]
    fn test_failed_transaction_rolls_back() {
        let (_dir, dao) = dao();

        let result: Result<()> = dao.in_transaction("test", |tx| {
            projects::insert_project(tx, NewProject::named("Half-written"))?;
            Err(Error::database("simulated failure"))
        });

        assert!(result.unwrap_err().is_database());
        assert_eq!(project_count(&dao), 0);
    }

    #[test]
    fn test_statement_failure_is_database_error() {
        let (_dir, dao) = dao();
        {
            let conn = dao.provider.open().unwrap();
            conn.execute_batch("DROP TABLE material").unwrap();
        }
        let project = dao.insert(NewProject::named("Broken")).unwrap();

        let err = dao.fetch_by_id(project.id).unwrap_err();
        assert!(err.is_database());
    }

    #[test]
    fn test_unreachable_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = DbConfig::new(dir.path().join("missing").join("projects.db"));
        let dao = ProjectDao::new(ConnectionProvider::new(config));

        assert!(dao.fetch_all().unwrap_err().is_database());
        assert!(dao.insert(NewProject::named("x")).unwrap_err().is_database());
    }
}
