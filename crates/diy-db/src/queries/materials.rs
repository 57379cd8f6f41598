//! Material database queries.

use diy_common::{Error, MaterialId, ProjectId, Result};
use rusqlite::Connection;

use crate::models::{Material, NewMaterial};

/// Insert a material for `project_id`.
///
/// The caller is responsible for the project existing; otherwise the foreign
/// key rejects the row with a database error.
pub fn insert_material(
    conn: &Connection,
    project_id: ProjectId,
    material: NewMaterial,
) -> Result<Material> {
    conn.execute(
        "INSERT INTO material (project_id, material_name, num_required, cost)
         VALUES (:project_id, :name, :num_required, :cost)",
        rusqlite::named_params! {
            ":project_id": project_id.get(),
            ":name": material.name,
            ":num_required": material.num_required,
            ":cost": material.cost,
        },
    )
    .map_err(Error::database)?;

    Ok(Material {
        id: MaterialId::from(conn.last_insert_rowid()),
        project_id,
        name: material.name,
        num_required: material.num_required,
        cost: material.cost,
    })
}

/// List the materials of a project in insertion order.
pub fn list_materials_for_project(
    conn: &Connection,
    project_id: ProjectId,
) -> Result<Vec<Material>> {
    let mut stmt = conn
        .prepare(
            "SELECT material_id, project_id, material_name, num_required, cost
             FROM material WHERE project_id = :project_id
             ORDER BY material_id",
        )
        .map_err(Error::database)?;

    let materials = stmt
        .query_map(
            rusqlite::named_params! { ":project_id": project_id.get() },
            |row| {
                Ok(Material {
                    id: MaterialId::from(row.get::<_, i64>(0)?),
                    project_id: ProjectId::from(row.get::<_, i64>(1)?),
                    name: row.get(2)?,
                    num_required: row.get(3)?,
                    cost: row.get(4)?,
                })
            },
        )
        .map_err(Error::database)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::database)?;

    Ok(materials)
}
