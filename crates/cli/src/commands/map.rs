// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Column mapping command

use crate::error::CliError;
use crate::Context;
use clap::Args;

#[derive(Args)]
pub struct MapArgs {
    /// Project id
    project: i64,
    /// Column holding the observation date
    #[arg(long)]
    date: String,
    /// Column holding the value to forecast
    #[arg(long)]
    value: String,
    /// Optional column separating product series
    #[arg(long)]
    product: Option<String>,
}

pub async fn handle(context: &Context, args: MapArgs) -> anyhow::Result<()> {
    let mut wizard = context.wizard(args.project).await?;
    wizard
        .save_mapping(&args.date, &args.value, args.product.as_deref())
        .await
        .map_err(CliError::from_wizard)?;

    println!(
        "Mapped date={}, value={}{}",
        args.date,
        args.value,
        args.product
            .as_deref()
            .map(|p| format!(", product={p}"))
            .unwrap_or_default()
    );
    println!("Next: mlc features {} --lags 1,7 --month", args.project);
    Ok(())
}
