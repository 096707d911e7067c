// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Pipeline status command

use crate::output::{self, StatusView};
use crate::Context;
use clap::Args;
use mlc_core::{ResolveError, StepContent};

#[derive(Args)]
pub struct StatusArgs {
    /// Project id
    project: i64,
}

pub async fn handle(context: &Context, args: StatusArgs) -> anyhow::Result<()> {
    let wizard = context.wizard(args.project).await?;

    let view = StatusView::build(wizard.flow(), wizard.state(), wizard.project());
    output::print(&view, context.format);

    // Hint at what the active step needs, including the stale-preview
    // recovery path.
    match wizard.content() {
        Ok(StepContent::DataLoading) => {
            println!();
            println!("Next: mlc source upload {} <file>", args.project);
        }
        Ok(StepContent::AdditionalFiles) => {
            println!();
            println!(
                "Optional: mlc --extended source extra add {} <file>; continue with the next step when ready",
                args.project
            );
        }
        Ok(StepContent::ColumnMapping { preview, .. }) => {
            println!();
            println!(
                "Loaded data: {} rows, columns: {}",
                preview.row_count,
                preview.columns.join(", ")
            );
            println!(
                "Next: mlc map {} --date <column> --value <column>",
                args.project
            );
        }
        Ok(StepContent::Aggregation { .. }) => {
            println!();
            println!(
                "Next: mlc --extended aggregate {} --period <period> --function <function>",
                args.project
            );
        }
        Ok(StepContent::FeatureGeneration { .. }) => {
            println!();
            println!("Next: mlc features {} --lags 1,7 --month", args.project);
        }
        Ok(StepContent::ModelTraining {
            test_ratio,
            cv_folds,
        }) => {
            println!();
            println!(
                "Next: mlc train {} --name <name> (test ratio {}, {} folds)",
                args.project, test_ratio, cv_folds
            );
        }
        Err(ResolveError::PreviewMissing(project)) => {
            println!();
            println!("Sample data for project {} is no longer available.", project);
            println!("Run data loading again: mlc source upload {} <file>", project);
        }
        Err(err) => {
            println!();
            println!("{}", err);
        }
    }

    Ok(())
}
