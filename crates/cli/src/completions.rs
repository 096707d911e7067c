// SPDX-License-Identifier: MIT
// Copyright (c) 2026 MLC Authors

//! Shell completion generation

use clap::{Args, CommandFactory};
use clap_complete::Shell;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn handle(args: &CompletionsArgs) {
    let mut command = crate::Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(args.shell, &mut command, name, &mut std::io::stdout());
}
