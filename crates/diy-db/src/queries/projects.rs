//! Project database queries.
//!
//! These functions read and write only the `project` table. Child
//! collections are loaded by the sibling modules.

use diy_common::{Error, ProjectId, Result};
use rusqlite::{Connection, Row};

use crate::models::{NewProject, Project};

const PROJECT_COLUMNS: &str =
    "project_id, project_name, estimated_hours, actual_hours, difficulty, notes";

fn project_from_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: ProjectId::from(row.get::<_, i64>(0)?),
        name: row.get(1)?,
        estimated_hours: row.get(2)?,
        actual_hours: row.get(3)?,
        difficulty: row.get(4)?,
        notes: row.get(5)?,
        materials: Vec::new(),
        steps: Vec::new(),
        categories: Vec::new(),
    })
}

/// Insert a project row and return it with the generated id.
pub fn insert_project(conn: &Connection, project: NewProject) -> Result<Project> {
    conn.execute(
        "INSERT INTO project (project_name, estimated_hours, actual_hours, difficulty, notes)
         VALUES (:name, :estimated_hours, :actual_hours, :difficulty, :notes)",
        rusqlite::named_params! {
            ":name": project.name,
            ":estimated_hours": project.estimated_hours,
            ":actual_hours": project.actual_hours,
            ":difficulty": project.difficulty,
            ":notes": project.notes,
        },
    )
    .map_err(Error::database)?;

    let id = ProjectId::from(conn.last_insert_rowid());
    Ok(Project::from_new(id, project))
}

/// List every project ordered by name. Child collections are left empty.
pub fn list_projects(conn: &Connection) -> Result<Vec<Project>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {PROJECT_COLUMNS} FROM project ORDER BY project_name"
        ))
        .map_err(Error::database)?;

    let projects = stmt
        .query_map([], project_from_row)
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;

    Ok(projects)
}

/// Get the bare project row by id.
///
/// # Returns
///
/// * `Ok(Some(Project))` - The project, with empty child collections
/// * `Ok(None)` - If no project has this id
/// * `Err(Error)` - If a database error occurs
pub fn get_project(conn: &Connection, id: ProjectId) -> Result<Option<Project>> {
    let result = conn.query_row(
        &format!("SELECT {PROJECT_COLUMNS} FROM project WHERE project_id = :id"),
        rusqlite::named_params! { ":id": id.get() },
        project_from_row,
    );

    match result {
        Ok(project) => Ok(Some(project)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(Error::database(e)),
    }
}

pub fn project_exists(conn: &Connection, id: ProjectId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM project WHERE project_id = :id)",
        rusqlite::named_params! { ":id": id.get() },
        |row| row.get(0),
    )
    .map_err(Error::database)
}

/// Overwrite every mutable column of the project identified by `project.id`.
///
/// Returns `true` when exactly one row was updated.
pub fn update_project(conn: &Connection, project: &Project) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "UPDATE project SET
                project_name = :name,
                estimated_hours = :estimated_hours,
                actual_hours = :actual_hours,
                difficulty = :difficulty,
                notes = :notes
             WHERE project_id = :id",
            rusqlite::named_params! {
                ":id": project.id.get(),
                ":name": project.name,
                ":estimated_hours": project.estimated_hours,
                ":actual_hours": project.actual_hours,
                ":difficulty": project.difficulty,
                ":notes": project.notes,
            },
        )
        .map_err(Error::database)?;

    Ok(rows_affected == 1)
}

/// Delete a project (cascades to materials, steps and category links).
///
/// Returns `true` when exactly one row was deleted.
pub fn delete_project(conn: &Connection, id: ProjectId) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "DELETE FROM project WHERE project_id = :id",
            rusqlite::named_params! { ":id": id.get() },
        )
        .map_err(Error::database)?;

    Ok(rows_affected == 1)
}
