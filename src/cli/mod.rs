//
//  appveyor-client
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod build;
mod completion;
mod project;

pub use build::BuildCommand;
pub use completion::CompletionCommand;
pub use project::ProjectCommand;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

/// AppVeyor CLI - Work with AppVeyor CI from the command line
#[derive(Parser, Debug)]
#[command(
    name = "av",
    version,
    about = "Work with AppVeyor CI from the command line",
    long_about = "av is a CLI for the AppVeyor continuous-integration service.\n\n\
                  It brings projects, builds, artifacts, and status badges to your terminal.\n\
                  Authentication uses the $APPVEYOR_API_TOKEN environment variable.",
    propagate_version = true,
    after_help = "Use 'av <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Global options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Account name owning the projects being addressed
    #[arg(long, short = 'a', global = true, env = "APPVEYOR_ACCOUNT")]
    pub account: Option<String>,

    /// Output raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOptions {
    /// Returns the account name, failing with a usage hint when unset.
    pub fn account(&self) -> Result<&str> {
        self.account
            .as_deref()
            .context("account name required: pass --account or set $APPVEYOR_ACCOUNT")
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage projects
    #[command(visible_alias = "proj")]
    Project(ProjectCommand),

    /// Manage builds
    Build(BuildCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Show version information
    Version,
}
