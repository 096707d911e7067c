// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Feature generation command

use crate::error::CliError;
use crate::Context;
use clap::Args;
use mlc_core::{DateFeatures, FeaturePlan, NumericalFeatures};
use std::collections::BTreeSet;

#[derive(Args)]
pub struct FeaturesArgs {
    /// Project id
    project: i64,

    // Date features
    /// Month number (1-12)
    #[arg(long)]
    month: bool,
    /// Year
    #[arg(long)]
    year: bool,
    /// Quarter (1-4)
    #[arg(long)]
    quarter: bool,
    /// Cyclic month encoding (sine and cosine)
    #[arg(long)]
    cyclic_month: bool,
    /// Cyclic quarter encoding (sine and cosine)
    #[arg(long)]
    cyclic_quarter: bool,
    /// Holiday counts and distances
    #[arg(long)]
    holidays: bool,

    // Numerical features
    /// Lag periods, comma separated
    #[arg(long, value_delimiter = ',')]
    lags: Vec<u32>,
    /// Rolling window sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    windows: Vec<u32>,
    /// Trend window sizes, comma separated
    #[arg(long, value_delimiter = ',')]
    trends: Vec<u32>,
    /// Change periods, comma separated
    #[arg(long, value_delimiter = ',')]
    changes: Vec<u32>,
    /// Emit mean/std/min/max for each rolling window
    #[arg(long)]
    stats: bool,
}

impl FeaturesArgs {
    fn plan(&self) -> FeaturePlan {
        FeaturePlan {
            date_features: DateFeatures {
                month: self.month,
                year: self.year,
                quarter: self.quarter,
                month_sin: self.cyclic_month,
                month_cos: self.cyclic_month,
                quarter_sin: self.cyclic_quarter,
                quarter_cos: self.cyclic_quarter,
                number_of_holidays_governmental: self.holidays,
                number_of_holidays_religious: self.holidays,
                periods_until_next_governmental_holiday: self.holidays,
                periods_until_next_religious_holiday: self.holidays,
                number_of_ramadan_days_in_month: self.holidays,
            },
            numerical_features: NumericalFeatures {
                lag_periods: BTreeSet::from_iter(self.lags.iter().copied()),
                rolling_windows: BTreeSet::from_iter(self.windows.iter().copied()),
                trend_periods: BTreeSet::from_iter(self.trends.iter().copied()),
                change_periods: BTreeSet::from_iter(self.changes.iter().copied()),
                include_statistics: self.stats,
                include_trend_features: !self.trends.is_empty(),
            },
        }
    }
}

pub async fn handle(context: &Context, args: FeaturesArgs) -> anyhow::Result<()> {
    let mut wizard = context.wizard(args.project).await?;
    let report = wizard
        .generate_features(args.plan())
        .await
        .map_err(CliError::from_wizard)?;

    println!(
        "Generated {} feature columns",
        report.generated_features.len()
    );
    if !report.generated_features.is_empty() {
        println!("  {}", report.generated_features.join(", "));
    }
    println!("Next: mlc train {} --name <name>", args.project);
    Ok(())
}
