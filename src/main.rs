mod cli;

use diy_projects::{config, ProjectService};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, DetailArgs};
use diy_db::models::{NewMaterial, NewProject, Project};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults based on the verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "diy_projects=trace,diy_db=debug".to_string()
        } else {
            "diy_projects=info,diy_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = config::load_config_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        config.database.path = path;
    }
    config::validate_config(&config)?;

    tracing::debug!("Using database at {:?}", config.database.path);
    let service = ProjectService::open(config.database.clone())?;

    match cli.command {
        Commands::Init => {
            let conn = diy_db::connection::ConnectionProvider::new(config.database).open()?;
            let version = diy_db::migrations::current_version(&conn)?;
            println!("Database ready (schema version {})", version);
        }
        Commands::List => {
            let projects = service.fetch_all_projects()?;
            if projects.is_empty() {
                println!("No projects.");
            }
            for project in projects {
                println!("{}: {}", project.id, project.name);
            }
        }
        Commands::Show { id, json } => {
            let project = service.fetch_project_by_id(id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&project)?);
            } else {
                print_project(&project);
            }
        }
        Commands::Add { name, details } => {
            let project = service.add_project(NewProject {
                name,
                estimated_hours: details.estimated_hours,
                actual_hours: details.actual_hours,
                difficulty: details.difficulty,
                notes: details.notes,
            })?;
            println!("Added project {}: {}", project.id, project.name);
        }
        Commands::Update { id, name, details } => {
            let mut project = service.fetch_project_by_id(id)?;
            merge_details(&mut project, name, details);
            service.modify_project_details(&project)?;
            println!("Updated project {}", id);
        }
        Commands::Delete { id } => {
            service.delete_project(id)?;
            println!("Deleted project {}", id);
        }
        Commands::AddMaterial {
            project_id,
            name,
            quantity,
            cost,
        } => {
            let material = service.add_material(
                project_id,
                NewMaterial {
                    name,
                    num_required: quantity,
                    cost,
                },
            )?;
            println!("Added material {} to project {}", material.id, project_id);
        }
        Commands::AddStep { project_id, text } => {
            let step = service.add_step(project_id, &text)?;
            println!("Added step {} to project {}", step.order, project_id);
        }
        Commands::AddCategory { name } => {
            let category = service.add_category(&name)?;
            println!("Added category {}: {}", category.id, category.name);
        }
        Commands::Categories => {
            for category in service.fetch_all_categories()? {
                println!("{}: {}", category.id, category.name);
            }
        }
        Commands::AssignCategory {
            project_id,
            category_id,
        } => {
            if service.assign_category(project_id, category_id)? {
                println!("Assigned category {} to project {}", category_id, project_id);
            } else {
                println!("Project {} already has category {}", project_id, category_id);
            }
        }
    }

    Ok(())
}

fn merge_details(project: &mut Project, name: Option<String>, details: DetailArgs) {
    if let Some(name) = name {
        project.name = name;
    }
    if details.estimated_hours.is_some() {
        project.estimated_hours = details.estimated_hours;
    }
    if details.actual_hours.is_some() {
        project.actual_hours = details.actual_hours;
    }
    if details.difficulty.is_some() {
        project.difficulty = details.difficulty;
    }
    if details.notes.is_some() {
        project.notes = details.notes;
    }
}

fn or_dash<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_project(project: &Project) {
    println!("Project {}: {}", project.id, project.name);
    println!("  Estimated hours: {}", or_dash(&project.estimated_hours));
    println!("  Actual hours:    {}", or_dash(&project.actual_hours));
    println!("  Difficulty:      {}", or_dash(&project.difficulty));
    println!("  Notes:           {}", or_dash(&project.notes));

    println!("\nMaterials: {}", project.materials.len());
    for material in &project.materials {
        print!("  - {}", material.name);
        if let Some(n) = material.num_required {
            print!(" x{}", n);
        }
        if let Some(cost) = material.cost {
            print!(" ({})", cost);
        }
        println!();
    }

    println!("\nSteps: {}", project.steps.len());
    for step in &project.steps {
        println!("  {}. {}", step.order, step.text);
    }

    println!("\nCategories: {}", project.categories.len());
    for category in &project.categories {
        println!("  - {}", category.name);
    }
}
