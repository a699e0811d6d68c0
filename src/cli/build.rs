//
//  appveyor-client
//  cli/build.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Build commands: starting, cancelling, logs, and artifacts.
//!
//! ## Examples
//!
//! ```bash
//! # Start a build of master and wait for it to finish
//! av -a my-account build start my-project --wait
//!
//! # Start a build with extra environment variables
//! av -a my-account build start my-project -e DEPLOY=1 -e TARGET=prod
//!
//! # Cancel a running build
//! av -a my-account build cancel my-project 1.0.45
//!
//! # Fetch a job's console log
//! av build log v3wsa7iv5mvrmn4d
//! ```

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::api::builds::BuildStartRequest;
use crate::api::AppVeyorClient;
use crate::util::format_duration;

use super::GlobalOptions;

/// Manage builds
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(subcommand)]
    pub command: BuildSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BuildSubcommand {
    /// Start a build
    Start(StartArgs),

    /// Cancel a queued or running build
    Cancel(CancelArgs),

    /// Fetch a build job's console log
    Log(LogArgs),

    /// List a build job's artifacts
    Artifacts(ArtifactsArgs),
}

#[derive(Args, Debug)]
pub struct StartArgs {
    /// Project slug
    pub slug: String,

    /// Branch to build
    #[arg(long, short = 'b', default_value = "master")]
    pub branch: String,

    /// Set a build environment variable (KEY=VALUE)
    #[arg(long, short = 'e', action = clap::ArgAction::Append)]
    pub env: Vec<String>,

    /// Wait for the build to finish
    #[arg(long, short = 'w')]
    pub wait: bool,
}

#[derive(Args, Debug)]
pub struct CancelArgs {
    /// Project slug
    pub slug: String,

    /// Build version to cancel
    #[arg(id = "build_version", value_name = "VERSION")]
    pub version: String,
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Build job identifier
    pub job_id: String,
}

#[derive(Args, Debug)]
pub struct ArtifactsArgs {
    /// Build job identifier
    pub job_id: String,
}

impl BuildCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = AppVeyorClient::from_env()?;

        match &self.command {
            BuildSubcommand::Start(args) => {
                let account = global.account()?;
                let mut request = BuildStartRequest::new(account, &args.slug, &args.branch);
                for pair in &args.env {
                    let Some((name, value)) = pair.split_once('=') else {
                        bail!("invalid environment variable `{pair}`, expected KEY=VALUE");
                    };
                    request = request.environment_variable(name, value);
                }

                let build = client.start_build(&request).await?;
                println!("Started build {} on {}", build.version, build.branch);

                if !args.wait {
                    return Ok(());
                }

                let results = client
                    .wait_for_build(account, &args.slug, &build.version)
                    .await?;
                let build = results.build;
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&build)?);
                    return Ok(());
                }

                println!("Build {} finished: {:?}", build.version, build.status);
                if let (Some(started), Some(finished)) = (build.started, build.finished) {
                    let elapsed = (finished - started).to_std().unwrap_or_default();
                    println!("Duration: {}", format_duration(elapsed));
                }
                Ok(())
            }
            BuildSubcommand::Cancel(args) => {
                let account = global.account()?;
                client
                    .cancel_build(account, &args.slug, &args.version)
                    .await?;
                println!("Cancelled build {} of {}", args.version, args.slug);
                Ok(())
            }
            BuildSubcommand::Log(args) => {
                let log = client
                    .build_log(&args.job_id)
                    .await
                    .with_context(|| format!("could not fetch log for job {}", args.job_id))?;
                print!("{log}");
                Ok(())
            }
            BuildSubcommand::Artifacts(args) => {
                let artifacts = client.build_artifacts(&args.job_id).await?;
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&artifacts)?);
                    return Ok(());
                }

                if artifacts.is_empty() {
                    println!("No artifacts found");
                    return Ok(());
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["FILE", "NAME", "TYPE", "SIZE"]);
                for artifact in &artifacts {
                    table.add_row(vec![
                        artifact.file_name.clone(),
                        artifact.name.clone().unwrap_or_default(),
                        artifact.artifact_type.clone().unwrap_or_default(),
                        artifact
                            .size
                            .map(|size| size.to_string())
                            .unwrap_or_default(),
                    ]);
                }
                println!("{table}");
                Ok(())
            }
        }
    }
}
