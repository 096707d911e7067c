// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Data source commands: file upload, database tables, additional files

use crate::error::CliError;
use crate::output::OutputFormat;
use crate::Context;
use clap::{Args, Subcommand};
use mlc_core::{NewDbConnection, ProjectBackend, ProjectId};
use std::path::PathBuf;

#[derive(Args)]
pub struct SourceArgs {
    #[command(subcommand)]
    command: SourceCommand,
}

#[derive(Subcommand)]
enum SourceCommand {
    /// Upload a file as the project's data source
    Upload {
        /// Project id
        project: i64,
        /// CSV, JSON or Excel file
        file: PathBuf,
    },
    /// Use a database table as the project's data source
    UseTable {
        /// Project id
        project: i64,
        /// Saved connection id
        connection: i64,
        /// Table name
        table: String,
    },
    /// List saved database connections
    Connections,
    /// Add a database connection (tested before saving)
    AddConnection {
        /// Display name
        name: String,
        #[arg(long)]
        host: String,
        #[arg(long, default_value_t = 5432)]
        port: u16,
        #[arg(long)]
        database: String,
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// List tables available on a connection
    Tables {
        /// Saved connection id
        connection: i64,
    },
    /// Supplementary files (extended flow)
    Extra {
        #[command(subcommand)]
        command: ExtraCommand,
    },
}

#[derive(Subcommand)]
enum ExtraCommand {
    /// Upload a supplementary file
    Add { project: i64, file: PathBuf },
    /// List supplementary files
    List { project: i64 },
    /// Remove a supplementary file
    Rm { project: i64, file: i64 },
}

pub async fn handle(context: &Context, args: SourceArgs) -> anyhow::Result<()> {
    match args.command {
        SourceCommand::Upload { project, file } => upload(context, project, &file).await,
        SourceCommand::UseTable {
            project,
            connection,
            table,
        } => use_table(context, project, connection, &table).await,
        SourceCommand::Connections => connections(context).await,
        SourceCommand::AddConnection {
            name,
            host,
            port,
            database,
            username,
            password,
        } => {
            add_connection(
                context,
                NewDbConnection {
                    name,
                    host,
                    port,
                    database,
                    username,
                    password,
                },
            )
            .await
        }
        SourceCommand::Tables { connection } => tables(context, connection).await,
        SourceCommand::Extra { command } => extra(context, command).await,
    }
}

async fn upload(context: &Context, project: i64, file: &std::path::Path) -> anyhow::Result<()> {
    let mut wizard = context.wizard(project).await?;
    wizard
        .load_file(file)
        .await
        .map_err(CliError::from_wizard)?;

    println!("Data loaded from {}", file.display());
    if let Ok(mlc_core::StepContent::ColumnMapping { preview, .. }) = wizard.content() {
        println!(
            "{} rows, columns: {}",
            preview.row_count,
            preview.columns.join(", ")
        );
    }
    println!("Next: mlc map {} --date <column> --value <column>", project);
    Ok(())
}

async fn use_table(
    context: &Context,
    project: i64,
    connection: i64,
    table: &str,
) -> anyhow::Result<()> {
    let mut wizard = context.wizard(project).await?;
    wizard
        .load_table(connection, table)
        .await
        .map_err(CliError::from_wizard)?;

    println!("Data loaded from table {}", table);
    println!("Next: mlc map {} --date <column> --value <column>", project);
    Ok(())
}

async fn connections(context: &Context) -> anyhow::Result<()> {
    let connections = context
        .backend
        .list_connections()
        .await
        .map_err(CliError::from_backend)?;

    if connections.is_empty() {
        println!("No saved connections.");
        return Ok(());
    }

    if matches!(context.format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&connections)?);
        return Ok(());
    }

    println!("{:<6} {:<20} {:<24} {}", "ID", "NAME", "HOST", "DATABASE");
    for connection in connections {
        println!(
            "{:<6} {:<20} {:<24} {}",
            connection.id,
            connection.name,
            format!("{}:{}", connection.host, connection.port),
            connection.database
        );
    }
    Ok(())
}

async fn add_connection(context: &Context, connection: NewDbConnection) -> anyhow::Result<()> {
    context
        .backend
        .test_connection(&connection)
        .await
        .map_err(|err| {
            CliError::from_backend(err)
                .with_context("The connection test failed before saving anything")
        })?;

    let saved = context
        .backend
        .create_connection(&connection)
        .await
        .map_err(CliError::from_backend)?;

    println!("Saved connection {} ({})", saved.id, saved.name);
    Ok(())
}

async fn tables(context: &Context, connection: i64) -> anyhow::Result<()> {
    let tables = context
        .backend
        .list_tables(connection)
        .await
        .map_err(CliError::from_backend)?;

    for table in tables {
        println!("{}", table);
    }
    Ok(())
}

async fn extra(context: &Context, command: ExtraCommand) -> anyhow::Result<()> {
    match command {
        ExtraCommand::Add { project, file } => {
            let mut wizard = context.wizard(project).await?;
            let record = wizard
                .add_file(&file)
                .await
                .map_err(CliError::from_wizard)?;
            println!("Uploaded {} (id {})", record.filename, record.id);
            Ok(())
        }
        ExtraCommand::List { project } => {
            let files = context
                .backend
                .list_additional_files(ProjectId(project))
                .await
                .map_err(CliError::from_backend)?;
            if files.is_empty() {
                println!("No supplementary files.");
                return Ok(());
            }
            for file in files {
                println!("{:<6} {}", file.id, file.filename);
            }
            Ok(())
        }
        ExtraCommand::Rm { project, file } => {
            context
                .backend
                .delete_additional_file(ProjectId(project), file)
                .await
                .map_err(CliError::from_backend)?;
            println!("Removed file {}", file);
            Ok(())
        }
    }
}
