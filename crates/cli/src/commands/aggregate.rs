// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Aggregation command (extended flow)

use crate::error::CliError;
use crate::Context;
use clap::{Args, ValueEnum};
use mlc_core::{AggregationConfig, AggregationFunction, AggregationPeriod};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Period {
    DailyToWeekly,
    DailyToMonthly,
    WeeklyToMonthly,
}

impl From<Period> for AggregationPeriod {
    fn from(period: Period) -> Self {
        match period {
            Period::DailyToWeekly => AggregationPeriod::DailyToWeekly,
            Period::DailyToMonthly => AggregationPeriod::DailyToMonthly,
            Period::WeeklyToMonthly => AggregationPeriod::WeeklyToMonthly,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Function {
    Sum,
    Mean,
    Min,
    Max,
}

impl From<Function> for AggregationFunction {
    fn from(function: Function) -> Self {
        match function {
            Function::Sum => AggregationFunction::Sum,
            Function::Mean => AggregationFunction::Mean,
            Function::Min => AggregationFunction::Min,
            Function::Max => AggregationFunction::Max,
        }
    }
}

#[derive(Args)]
pub struct AggregateArgs {
    /// Project id
    project: i64,
    /// Target period
    #[arg(long, value_enum)]
    period: Period,
    /// Aggregation applied to the value column
    #[arg(long, value_enum, default_value_t = Function::Sum)]
    function: Function,
}

pub async fn handle(context: &Context, args: AggregateArgs) -> anyhow::Result<()> {
    let mut wizard = context.wizard(args.project).await?;
    let report = wizard
        .save_aggregation(AggregationConfig {
            period: args.period.into(),
            main_value_aggregation: args.function.into(),
        })
        .await
        .map_err(CliError::from_wizard)?;

    match report.row_count {
        Some(rows) => println!("Aggregated to {} rows", rows),
        None => println!("Aggregation saved"),
    }
    Ok(())
}
