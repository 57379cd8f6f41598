//! Project service: the operations callers use to manage projects.
//!
//! The service passes through to [`ProjectDao`] and turns "no such row"
//! outcomes into [`Error::NotFound`] carrying the requested id. Each call is
//! an independent request with its own connection and transaction.

use diy_common::{CategoryId, Error, ProjectId, Result};
use diy_db::config::DbConfig;
use diy_db::connection::init_database;
use diy_db::dao::ProjectDao;
use diy_db::models::{Category, Material, NewMaterial, NewProject, Project, Step};

#[derive(Debug, Clone)]
pub struct ProjectService {
    dao: ProjectDao,
}

impl ProjectService {
    pub fn new(dao: ProjectDao) -> Self {
        Self { dao }
    }

    /// Prepare the configured database (running migrations) and build a
    /// service over it.
    pub fn open(config: DbConfig) -> Result<Self> {
        let provider = init_database(config)?;
        Ok(Self::new(ProjectDao::new(provider)))
    }

    /// Store a new project and return it with its assigned id.
    pub fn add_project(&self, project: NewProject) -> Result<Project> {
        require_text("project name", &project.name)?;
        self.dao.insert(project)
    }

    /// All projects ordered by name. Child collections are not loaded.
    pub fn fetch_all_projects(&self) -> Result<Vec<Project>> {
        self.dao.fetch_all()
    }

    /// The project with its materials, steps and categories.
    pub fn fetch_project_by_id(&self, id: ProjectId) -> Result<Project> {
        self.dao
            .fetch_by_id(id)?
            .ok_or_else(|| Error::not_found("project", id))
    }

    /// Overwrite the name, hours, difficulty and notes of an existing project.
    pub fn modify_project_details(&self, project: &Project) -> Result<()> {
        if !self.dao.update(project)? {
            return Err(Error::not_found("project", project.id));
        }
        Ok(())
    }

    /// Delete a project together with its materials, steps and category links.
    pub fn delete_project(&self, id: ProjectId) -> Result<()> {
        if !self.dao.delete(id)? {
            return Err(Error::not_found("project", id));
        }
        Ok(())
    }

    pub fn add_material(&self, project_id: ProjectId, material: NewMaterial) -> Result<Material> {
        require_text("material name", &material.name)?;
        self.dao.add_material(project_id, material)
    }

    pub fn add_step(&self, project_id: ProjectId, text: &str) -> Result<Step> {
        require_text("step text", text)?;
        self.dao.add_step(project_id, text)
    }

    pub fn add_category(&self, name: &str) -> Result<Category> {
        require_text("category name", name)?;
        self.dao.add_category(name)
    }

    pub fn fetch_all_categories(&self) -> Result<Vec<Category>> {
        self.dao.fetch_all_categories()
    }

    /// Link a category to a project. Returns `false` if already linked.
    pub fn assign_category(&self, project_id: ProjectId, category_id: CategoryId) -> Result<bool> {
        self.dao.assign_category(project_id, category_id)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_input(format!("{field} is required")));
    }
    Ok(())
}
