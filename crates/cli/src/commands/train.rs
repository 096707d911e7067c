// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Model training command

use crate::error::CliError;
use crate::Context;
use clap::{Args, ValueEnum};
use mlc_core::{ModelType, TrainRequest};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelKind {
    RandomForest,
    LinearRegression,
}

impl From<ModelKind> for ModelType {
    fn from(kind: ModelKind) -> Self {
        match kind {
            ModelKind::RandomForest => ModelType::RandomForest,
            ModelKind::LinearRegression => ModelType::LinearRegression,
        }
    }
}

#[derive(Args)]
pub struct TrainArgs {
    /// Project id
    project: i64,
    /// Name for the trained model
    #[arg(long)]
    name: String,
    /// Model family
    #[arg(long, value_enum, default_value_t = ModelKind::RandomForest)]
    model: ModelKind,
    /// Fraction of data held out for testing
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,
    /// Cross-validation folds
    #[arg(long, default_value_t = 3)]
    folds: u32,
    /// Model parameters as JSON, e.g. '{"n_estimators": 200}'
    #[arg(long)]
    params: Option<String>,
}

pub async fn handle(context: &Context, args: TrainArgs) -> anyhow::Result<()> {
    let mut request = TrainRequest::new(&args.name, args.model.into());
    if let Some(params) = &args.params {
        let parameters: serde_json::Value = serde_json::from_str(params)
            .map_err(|err| CliError::new(format!("--params is not valid JSON: {err}")))?;
        request = request.with_parameters(parameters);
    }

    let mut wizard = context.wizard(args.project).await?;
    let record = wizard
        .train(args.test_ratio, args.folds, request)
        .await
        .map_err(CliError::from_wizard)?;

    println!("Trained model {} (id {})", record.name, record.id);
    if let Some(metrics) = &record.metrics {
        if let Some(test) = &metrics.test {
            println!(
                "Test: r2={:.3} mae={:.3} mse={:.3}",
                test.r2, test.mae, test.mse
            );
        }
        if let (Some(mean), Some(std)) = (metrics.cv_mean, metrics.cv_std) {
            println!("CV: {:.3} +/- {:.3}", mean, std);
        }
    }
    Ok(())
}
