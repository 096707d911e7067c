// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Output formatting for CLI commands

use clap::ValueEnum;
use mlc_core::{Flow, PipelineState, Project, SourceType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + std::fmt::Display>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            for item in items {
                println!("{}", item);
            }
        }
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(items) {
                println!("{}", json);
            }
        }
    }
}

/// One row of the rendered stepper
#[derive(Debug, Serialize)]
pub struct StepperRow {
    pub index: usize,
    pub label: String,
    pub completed: bool,
    pub active: bool,
    pub reachable: bool,
}

/// A project's pipeline position, renderable as text or JSON
#[derive(Debug, Serialize)]
pub struct StatusView {
    pub project: i64,
    pub name: String,
    pub source: Option<String>,
    pub steps: Vec<StepperRow>,
    pub progress_percent: u32,
}

impl StatusView {
    pub fn build(flow: &Flow, state: &PipelineState, project: &Project) -> Self {
        let reachable = state.reachable(flow);
        let steps = flow
            .steps()
            .iter()
            .enumerate()
            .map(|(index, step)| StepperRow {
                index,
                label: step.label().to_string(),
                completed: state.completed.contains(&index),
                active: index == state.current,
                reachable: index <= reachable,
            })
            .collect();

        let source = project.source_type.map(|source| match source {
            SourceType::File => project
                .file_path
                .clone()
                .map_or_else(|| "file".to_string(), |path| format!("file: {path}")),
            SourceType::Db => project
                .table_name
                .clone()
                .map_or_else(|| "database".to_string(), |table| format!("table: {table}")),
        });

        Self {
            project: project.id.0,
            name: project.name.clone(),
            source,
            steps,
            progress_percent: (state.progress(flow) * 100.0).round() as u32,
        }
    }
}

impl std::fmt::Display for StatusView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Project {}: {}", self.project, self.name)?;
        if let Some(source) = &self.source {
            writeln!(f, "Source: {}", source)?;
        }
        for row in &self.steps {
            let marker = if row.active {
                ">"
            } else if row.completed {
                "x"
            } else {
                " "
            };
            let lock = if row.reachable { "" } else { "  [locked]" };
            writeln!(
                f,
                "  [{}] {}. {}{}",
                marker,
                row.index + 1,
                row.label,
                lock
            )?;
        }
        write!(f, "Progress: {}%", self.progress_percent)
    }
}
