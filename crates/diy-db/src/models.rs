//! Rust models matching the database schema.
//!
//! [`Project`] is the aggregate root. Its `materials`, `steps` and
//! `categories` are only populated by a single-project fetch; listings carry
//! empty collections.

use diy_common::{CategoryId, MaterialId, ProjectId, StepId};
use serde::{Deserialize, Serialize};

use crate::decimal::Decimal;

/// A DIY project together with its owned child records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub steps: Vec<Step>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Project {
    /// Attach a store-assigned id to a not-yet-stored project.
    pub fn from_new(id: ProjectId, new: NewProject) -> Self {
        Self {
            id,
            name: new.name,
            estimated_hours: new.estimated_hours,
            actual_hours: new.actual_hours,
            difficulty: new.difficulty,
            notes: new.notes,
            materials: Vec::new(),
            steps: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// Project fields supplied by the caller before the store assigns an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub estimated_hours: Option<Decimal>,
    pub actual_hours: Option<Decimal>,
    pub difficulty: Option<i32>,
    pub notes: Option<String>,
}

impl NewProject {
    /// A project with only its required name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Material needed by a project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub id: MaterialId,
    pub project_id: ProjectId,
    pub name: String,
    pub num_required: Option<i32>,
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewMaterial {
    pub name: String,
    pub num_required: Option<i32>,
    pub cost: Option<Decimal>,
}

/// One instruction in a project, sequenced by `order`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    pub id: StepId,
    pub project_id: ProjectId,
    pub text: String,
    pub order: i32,
}

/// A category shared across projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
