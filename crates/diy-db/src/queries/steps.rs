//! Step database queries.
//!
//! Steps are sequenced by `step_order`. New steps are appended after the
//! current highest position, starting at 1.

use diy_common::{Error, ProjectId, Result, StepId};
use rusqlite::Connection;

use crate::models::Step;

/// Append a step to the end of a project's sequence.
pub fn append_step(conn: &Connection, project_id: ProjectId, text: &str) -> Result<Step> {
    let order: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(step_order), 0) + 1 FROM step WHERE project_id = :project_id",
            rusqlite::named_params! { ":project_id": project_id.get() },
            |row| row.get(0),
        )
        .map_err(Error::database)?;

    conn.execute(
        "INSERT INTO step (project_id, step_text, step_order)
         VALUES (:project_id, :text, :order)",
        rusqlite::named_params! {
            ":project_id": project_id.get(),
            ":text": text,
            ":order": order,
        },
    )
    .map_err(Error::database)?;

    Ok(Step {
        id: StepId::from(conn.last_insert_rowid()),
        project_id,
        text: text.to_string(),
        order,
    })
}

/// List the steps of a project by position.
pub fn list_steps_for_project(conn: &Connection, project_id: ProjectId) -> Result<Vec<Step>> {
    let mut stmt = conn
        .prepare(
            "SELECT step_id, project_id, step_text, step_order
             FROM step WHERE project_id = :project_id
             ORDER BY step_order, step_id",
        )
        .map_err(Error::database)?;

    let steps = stmt
        .query_map(
            rusqlite::named_params! { ":project_id": project_id.get() },
            |row| {
                Ok(Step {
                    id: StepId::from(row.get::<_, i64>(0)?),
                    project_id: ProjectId::from(row.get::<_, i64>(1)?),
                    text: row.get(2)?,
                    order: row.get(3)?,
                })
            },
        )
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;

    Ok(steps)
}
