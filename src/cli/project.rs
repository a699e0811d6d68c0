//
//  appveyor-client
//  cli/project.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project commands: listing, inspection, history, and status badges.
//!
//! ## Examples
//!
//! ```bash
//! # List projects in the account
//! av project list
//!
//! # Show a project's last build
//! av -a my-account project view my-project
//!
//! # Recent build history
//! av -a my-account project history my-project --limit 20
//!
//! # Download the SVG status badge
//! av project badge gxv98u4vhvkn9mu7 --svg -o badge.svg
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::api::projects::BadgeOptions;
use crate::api::AppVeyorClient;
use crate::util::media_type;

use super::GlobalOptions;

/// Manage projects
#[derive(Args, Debug)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// List projects in the account
    #[command(visible_alias = "ls")]
    List,

    /// Show a project and its last build
    View(ViewArgs),

    /// Show recent build history
    History(HistoryArgs),

    /// Download a status badge
    Badge(BadgeArgs),
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Project slug
    pub slug: String,

    /// Restrict to a branch
    #[arg(long, short = 'b')]
    pub branch: Option<String>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Project slug
    pub slug: String,

    /// Maximum number of builds to list
    #[arg(long, short = 'L', default_value = "10")]
    pub limit: u32,
}

#[derive(Args, Debug)]
pub struct BadgeArgs {
    /// Status badge identifier (from the project settings)
    pub badge_id: String,

    /// Download the SVG variant instead of PNG
    #[arg(long)]
    pub svg: bool,

    /// Download the high-resolution PNG variant
    #[arg(long, conflicts_with = "svg")]
    pub retina: bool,

    /// File to write the badge to
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}

impl ProjectCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let client = AppVeyorClient::from_env()?;

        match &self.command {
            ProjectSubcommand::List => {
                let projects = client.projects().await?;
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&projects)?);
                    return Ok(());
                }

                if projects.is_empty() {
                    println!("No projects found");
                    return Ok(());
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["SLUG", "NAME", "PROVIDER", "REPOSITORY"]);
                for project in &projects {
                    table.add_row(vec![
                        project.slug.clone(),
                        project.name.clone(),
                        project.repository_type.as_str().to_string(),
                        project.repository_name.clone(),
                    ]);
                }
                println!("{table}");
                Ok(())
            }
            ProjectSubcommand::View(args) => {
                let account = global.account()?;
                let results = match &args.branch {
                    Some(branch) => {
                        client
                            .project_last_build_branch(account, &args.slug, branch)
                            .await?
                    }
                    None => client.project_last_build(account, &args.slug).await?,
                };
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&results)?);
                    return Ok(());
                }

                let project = &results.project;
                let build = &results.build;
                println!("{}/{} ({})", project.account_name, project.slug, project.name);
                println!("  repository: {}", project.repository_name);
                println!("  last build: {} on {}", build.version, build.branch);
                println!("  status:     {:?}", build.status);
                if let (Some(started), Some(finished)) = (build.started, build.finished) {
                    let elapsed = (finished - started).to_std().unwrap_or_default();
                    println!("  duration:   {}", crate::util::format_duration(elapsed));
                }
                Ok(())
            }
            ProjectSubcommand::History(args) => {
                let account = global.account()?;
                let history = client
                    .project_history(account, &args.slug, args.limit)
                    .await?;
                if global.json {
                    println!("{}", serde_json::to_string_pretty(&history)?);
                    return Ok(());
                }

                if history.builds.is_empty() {
                    println!("No builds found");
                    return Ok(());
                }

                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(vec!["VERSION", "BRANCH", "STATUS", "CREATED"]);
                for build in &history.builds {
                    table.add_row(vec![
                        build.version.clone(),
                        build.branch.clone(),
                        format!("{:?}", build.status),
                        build
                            .created
                            .map(|created| created.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                    ]);
                }
                println!("{table}");
                Ok(())
            }
            ProjectSubcommand::Badge(args) => {
                let options = if args.svg {
                    BadgeOptions::svg()
                } else if args.retina {
                    BadgeOptions::retina()
                } else {
                    BadgeOptions::png()
                };
                let bytes = client.project_status_badge(&args.badge_id, &options).await?;
                fs::write(&args.output, &bytes).with_context(|| {
                    format!("could not write badge to {}", args.output.display())
                })?;
                println!(
                    "Wrote {} bytes ({}) to {}",
                    bytes.len(),
                    media_type(&bytes).unwrap_or("unknown type"),
                    args.output.display()
                );
                Ok(())
            }
        }
    }
}
