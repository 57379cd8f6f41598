//! Category database queries.
//!
//! Categories live independently of projects; `project_category` links the
//! two. Deleting either side removes the link row through the cascade.

use diy_common::{CategoryId, Error, ProjectId, Result};
use rusqlite::{Connection, Row};

use crate::models::Category;

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: CategoryId::from(row.get::<_, i64>(0)?),
        name: row.get(1)?,
    })
}

pub fn insert_category(conn: &Connection, name: &str) -> Result<Category> {
    conn.execute(
        "INSERT INTO category (category_name) VALUES (:name)",
        rusqlite::named_params! { ":name": name },
    )
    .map_err(Error::database)?;

    Ok(Category {
        id: CategoryId::from(conn.last_insert_rowid()),
        name: name.to_string(),
    })
}

/// List all categories ordered by name.
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>> {
    let mut stmt = conn
        .prepare("SELECT category_id, category_name FROM category ORDER BY category_name")
        .map_err(Error::database)?;

    let categories = stmt
        .query_map([], category_from_row)
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;

    Ok(categories)
}

pub fn category_exists(conn: &Connection, id: CategoryId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM category WHERE category_id = :id)",
        rusqlite::named_params! { ":id": id.get() },
        |row| row.get(0),
    )
    .map_err(Error::database)
}

/// List the categories linked to a project, ordered by name.
pub fn list_categories_for_project(
    conn: &Connection,
    project_id: ProjectId,
) -> Result<Vec<Category>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.category_id, c.category_name
             FROM category c
             JOIN project_category pc USING (category_id)
             WHERE pc.project_id = :project_id
             ORDER BY c.category_name",
        )
        .map_err(Error::database)?;

    let categories = stmt
        .query_map(
            rusqlite::named_params! { ":project_id": project_id.get() },
            category_from_row,
        )
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;

    Ok(categories)
}

/// Link a category to a project.
///
/// Returns `false` if the pair was already linked.
pub fn link_category(
    conn: &Connection,
    project_id: ProjectId,
    category_id: CategoryId,
) -> Result<bool> {
    let rows_affected = conn
        .execute(
            "INSERT OR IGNORE INTO project_category (project_id, category_id)
             VALUES (:project_id, :category_id)",
            rusqlite::named_params! {
                ":project_id": project_id.get(),
                ":category_id": category_id.get(),
            },
        )
        .map_err(Error::database)?;

    Ok(rows_affected == 1)
}
