// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Project commands

use crate::error::CliError;
use crate::output::{self, OutputFormat};
use crate::Context;
use clap::{Args, Subcommand};
use mlc_core::{Project, ProjectBackend, ProjectId};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    command: ProjectCommand,
}

#[derive(Subcommand)]
enum ProjectCommand {
    /// List all projects
    List,
    /// Create a new project
    Create {
        /// Project name
        name: String,
        /// Short description
        #[arg(long)]
        description: Option<String>,
    },
    /// Show one project's stored fields
    Show {
        /// Project id
        project: i64,
    },
    /// Delete a project
    Delete {
        /// Project id
        project: i64,
    },
}

#[derive(Serialize)]
struct ProjectRow {
    id: i64,
    name: String,
    source: Option<String>,
    description: Option<String>,
}

impl ProjectRow {
    fn from_project(project: &Project) -> Self {
        Self {
            id: project.id.0,
            name: project.name.clone(),
            source: project.source_type.map(|s| s.name().to_string()),
            description: project.description.clone(),
        }
    }
}

impl fmt::Display for ProjectRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<6} {:<24} {:<8} {}",
            self.id,
            self.name,
            self.source.as_deref().unwrap_or("-"),
            self.description.as_deref().unwrap_or("")
        )
    }
}

pub async fn handle(context: &Context, args: ProjectArgs) -> anyhow::Result<()> {
    match args.command {
        ProjectCommand::List => list(context).await,
        ProjectCommand::Create { name, description } => {
            create(context, &name, description.as_deref()).await
        }
        ProjectCommand::Show { project } => show(context, project).await,
        ProjectCommand::Delete { project } => delete(context, project).await,
    }
}

async fn list(context: &Context) -> anyhow::Result<()> {
    let projects = context
        .backend
        .list_projects()
        .await
        .map_err(CliError::from_backend)?;

    if projects.is_empty() {
        println!("No projects yet. Create one: mlc project create <name>");
        return Ok(());
    }

    if matches!(context.format, OutputFormat::Text) {
        println!("{:<6} {:<24} {:<8} {}", "ID", "NAME", "SOURCE", "DESCRIPTION");
    }
    let rows: Vec<_> = projects.iter().map(ProjectRow::from_project).collect();
    output::print_list(&rows, context.format);
    Ok(())
}

async fn create(
    context: &Context,
    name: &str,
    description: Option<&str>,
) -> anyhow::Result<()> {
    let project = context
        .backend
        .create_project(name, description)
        .await
        .map_err(CliError::from_backend)?;

    println!("Created project {} ({})", project.id, project.name);
    println!("Next: mlc source upload {} <file>", project.id);
    Ok(())
}

async fn show(context: &Context, project: i64) -> anyhow::Result<()> {
    let project = context
        .backend
        .fetch_project(ProjectId(project))
        .await
        .map_err(CliError::from_backend)?;

    match context.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        OutputFormat::Text => {
            println!("Project {}: {}", project.id, project.name);
            if let Some(description) = &project.description {
                println!("Description: {}", description);
            }
            if let Some(source) = project.source_type {
                println!("Source: {}", source.name());
            }
            if let (Some(date), Some(value)) = (&project.date_column, &project.value_column) {
                let product = project
                    .product_column
                    .as_deref()
                    .map(|p| format!(", product={p}"))
                    .unwrap_or_default();
                println!("Mapping: date={date}, value={value}{product}");
            }
            if let Some(ratio) = project.test_ratio {
                println!(
                    "Training: test_ratio={ratio}, cv_folds={}",
                    project.cv_folds.unwrap_or(0)
                );
            }
        }
    }
    Ok(())
}

async fn delete(context: &Context, project: i64) -> anyhow::Result<()> {
    context
        .backend
        .delete_project(ProjectId(project))
        .await
        .map_err(CliError::from_backend)?;
    println!("Deleted project {}", project);
    Ok(())
}
