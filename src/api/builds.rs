//
//  appveyor-client
//  api/builds.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Builds API
//!
//! Starting, re-running, and cancelling builds, plus the per-job artifact
//! and log downloads.
//!
//! ## Waiting for completion
//!
//! [`AppVeyorClient::wait_for_build`] polls the build once per second
//! until it leaves the queued/running states. There is no built-in
//! timeout; callers that need one wrap the future:
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use appveyor_client::api::AppVeyorClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = AppVeyorClient::from_env()?;
//! let results = tokio::time::timeout(
//!     Duration::from_secs(600),
//!     client.wait_for_build("my-account", "my-project", "1.0.45"),
//! )
//! .await??;
//! println!("finished: {:?}", results.build.status);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::client::AppVeyorClient;
use crate::api::common::Status;
use crate::api::error::Result;
use crate::api::projects::ProjectBuildResults;

/// Delay between polls while waiting for a build or deployment.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A build of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    /// Build identifier.
    pub build_id: i32,

    /// Sequential build number within the project.
    pub build_number: i64,

    /// Build version, derived from the project's version format.
    pub version: String,

    /// Branch the build ran against.
    pub branch: String,

    /// Commit message headline.
    pub message: Option<String>,

    /// Commit hash the build ran against.
    pub commit_id: Option<String>,

    /// Commit author display name.
    pub author_name: Option<String>,

    /// Current lifecycle status.
    pub status: Status,

    /// Per-job results. Some operations omit this and return an empty list.
    #[serde(default)]
    pub jobs: Vec<Job>,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Time the first job started.
    pub started: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,

    /// Completion time, present once the build reaches a terminal state.
    pub finished: Option<DateTime<Utc>>,
}

/// A single job within a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Job identifier, used for artifact and log downloads.
    pub job_id: String,

    /// Job display name (build matrix row).
    pub name: String,

    /// Current lifecycle status.
    pub status: Status,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Start time.
    pub started: Option<DateTime<Utc>>,

    /// Completion time.
    pub finished: Option<DateTime<Utc>>,
}

/// Request body for starting a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStartRequest {
    /// Account owning the project.
    pub account_name: String,

    /// Project slug.
    pub project_slug: String,

    /// Branch to build.
    pub branch: String,

    /// Extra environment variables for this build.
    #[serde(default)]
    pub environment_variables: BTreeMap<String, String>,
}

impl BuildStartRequest {
    /// Creates a start request for a branch build.
    pub fn new(
        account_name: impl Into<String>,
        project_slug: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            project_slug: project_slug.into(),
            branch: branch.into(),
            environment_variables: BTreeMap::new(),
        }
    }

    /// Adds an environment variable to the request.
    pub fn environment_variable(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.environment_variables.insert(name.into(), value.into());
        self
    }
}

/// Request body for re-running a build.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReBuildRequest {
    /// Identifier of the build to re-run.
    pub build_id: i32,

    /// Re-run only the failed or cancelled jobs instead of the whole build.
    pub re_run_incomplete: bool,
}

/// An artifact published by a build job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Path of the artifact within the job, used for downloads.
    pub file_name: String,

    /// Deployment name assigned in the build configuration.
    pub name: Option<String>,

    /// Artifact kind, e.g. `File` or `Zip`.
    #[serde(rename = "type")]
    pub artifact_type: Option<String>,

    /// Size in bytes.
    pub size: Option<u64>,
}

impl AppVeyorClient {
    /// Starts a build of a project branch.
    pub async fn start_build(&self, request: &BuildStartRequest) -> Result<Build> {
        self.post("/builds", request).await
    }

    /// Re-runs a finished build, optionally only its incomplete jobs.
    pub async fn re_run_build(&self, request: &ReBuildRequest) -> Result<Build> {
        self.put("/builds", request).await
    }

    /// Cancels a queued or running build.
    pub async fn cancel_build(
        &self,
        account_name: &str,
        project_slug: &str,
        build_version: &str,
    ) -> Result<()> {
        self.delete(&format!(
            "/builds/{account_name}/{project_slug}/{build_version}"
        ))
        .await
    }

    /// Polls a build once per second until it leaves the queued/running
    /// states, then returns the final project/build pair.
    ///
    /// No timeout is applied; see the module documentation for wrapping
    /// the call with a deadline.
    pub async fn wait_for_build(
        &self,
        account_name: &str,
        project_slug: &str,
        build_version: &str,
    ) -> Result<ProjectBuildResults> {
        loop {
            let results = self
                .project_build_by_version(account_name, project_slug, build_version)
                .await?;
            if !results.build.status.is_pending() {
                return Ok(results);
            }
            debug!(build_version, status = ?results.build.status, "build still pending");
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Lists the artifacts published by a build job.
    pub async fn build_artifacts(&self, job_id: &str) -> Result<Vec<Artifact>> {
        self.get(&format!("/buildjobs/{job_id}/artifacts")).await
    }

    /// Downloads a single artifact of a build job.
    pub async fn build_artifact(&self, job_id: &str, file_name: &str) -> Result<Vec<u8>> {
        self.get_bytes(&format!("/buildjobs/{job_id}/artifacts/{file_name}"))
            .await
    }

    /// Downloads an artifact from a project's latest build.
    pub async fn project_artifact(
        &self,
        account_name: &str,
        project_slug: &str,
        file_name: &str,
    ) -> Result<Vec<u8>> {
        self.get_bytes(&format!(
            "/projects/{account_name}/{project_slug}/artifacts/{file_name}"
        ))
        .await
    }

    /// Downloads the console log of a build job.
    pub async fn build_log(&self, job_id: &str) -> Result<String> {
        self.get_text(&format!("/buildjobs/{job_id}/log")).await
    }
}
