use clap::{Parser, Subcommand};
use diy_common::{CategoryId, ProjectId};
use diy_db::decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diy-projects")]
#[command(author, version, about = "Track DIY projects, their materials, steps, and categories")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the config file)
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or migrate the database
    Init,

    /// List all projects by name
    List,

    /// Show a project with its materials, steps, and categories
    Show {
        id: ProjectId,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a new project
    Add {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Update a project; fields not given keep their current value
    Update {
        id: ProjectId,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        details: DetailArgs,
    },

    /// Delete a project and everything it owns
    Delete { id: ProjectId },

    /// Add a material to a project
    AddMaterial {
        project_id: ProjectId,

        #[arg(long)]
        name: String,

        /// Number of units required
        #[arg(long)]
        quantity: Option<i32>,

        #[arg(long)]
        cost: Option<Decimal>,
    },

    /// Append a step to a project
    AddStep { project_id: ProjectId, text: String },

    /// Create a category
    AddCategory { name: String },

    /// List all categories
    Categories,

    /// Put a project in a category
    AssignCategory {
        project_id: ProjectId,
        category_id: CategoryId,
    },
}

#[derive(clap::Args)]
pub struct DetailArgs {
    #[arg(long)]
    pub estimated_hours: Option<Decimal>,

    #[arg(long)]
    pub actual_hours: Option<Decimal>,

    /// Difficulty rating (1-5)
    #[arg(long)]
    pub difficulty: Option<i32>,

    #[arg(long)]
    pub notes: Option<String>,
}
