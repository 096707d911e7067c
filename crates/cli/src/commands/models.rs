// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Trained model commands

use crate::error::CliError;
use crate::output::OutputFormat;
use crate::Context;
use clap::{Args, Subcommand};
use mlc_core::{ProjectBackend, ProjectId};

#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// List models trained for a project
    List {
        /// Project id
        project: i64,
    },
    /// Delete a trained model
    Rm {
        /// Model id
        model: i64,
    },
}

pub async fn handle(context: &Context, args: ModelsArgs) -> anyhow::Result<()> {
    match args.command {
        ModelsCommand::List { project } => list(context, project).await,
        ModelsCommand::Rm { model } => rm(context, model).await,
    }
}

async fn list(context: &Context, project: i64) -> anyhow::Result<()> {
    let models = context
        .backend
        .list_models(ProjectId(project))
        .await
        .map_err(CliError::from_backend)?;

    if models.is_empty() {
        println!("No models trained yet: mlc train {} --name <name>", project);
        return Ok(());
    }

    if matches!(context.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&models)?);
        return Ok(());
    }

    println!("{:<6} {:<24} {:<20} {:<8} {}", "ID", "NAME", "TYPE", "TEST R2", "CV");
    for model in models {
        let (test_r2, cv) = model
            .metrics
            .as_ref()
            .map(|m| {
                (
                    m.test.map(|t| format!("{:.3}", t.r2)),
                    m.cv_mean.map(|mean| format!("{:.3}", mean)),
                )
            })
            .unwrap_or((None, None));
        println!(
            "{:<6} {:<24} {:<20} {:<8} {}",
            model.id,
            model.name,
            model.model_type.name(),
            test_r2.unwrap_or_else(|| "-".to_string()),
            cv.unwrap_or_else(|| "-".to_string())
        );
    }
    Ok(())
}

async fn rm(context: &Context, model: i64) -> anyhow::Result<()> {
    context
        .backend
        .delete_model(model)
        .await
        .map_err(CliError::from_backend)?;
    println!("Deleted model {}", model);
    Ok(())
}
