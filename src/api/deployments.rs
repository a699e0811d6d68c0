//
//  appveyor-client
//  api/deployments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Deployments API
//!
//! Starting deployments of finished builds into deployment environments,
//! and querying deployment history per project.
//!
//! [`AppVeyorClient::wait_for_deployment`] follows the same polling
//! contract as [`AppVeyorClient::wait_for_build`]: one poll per second,
//! no built-in timeout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::builds::{Build, POLL_INTERVAL};
use crate::api::client::AppVeyorClient;
use crate::api::common::Status;
use crate::api::environments::DeploymentEnvironment;
use crate::api::error::Result;
use crate::api::projects::Project;

/// A deployment of a build into an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Deployment identifier.
    pub deployment_id: i32,

    /// Current lifecycle status.
    pub status: Status,

    /// The build being deployed. Some operations omit the build's jobs.
    pub build: Option<Build>,

    /// The target environment.
    pub environment: Option<DeploymentEnvironment>,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Start time.
    pub started: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,

    /// Completion time, present once the deployment reaches a terminal
    /// state.
    pub finished: Option<DateTime<Utc>>,
}

/// Request body for starting a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentStartRequest {
    /// Name of the target environment.
    pub environment_name: String,

    /// Account owning the project.
    pub account_name: String,

    /// Project slug.
    pub project_slug: String,

    /// Version of the build to deploy.
    pub build_version: String,

    /// Job whose artifacts are deployed.
    pub build_job_id: String,
}

/// Deployment and project pair returned by the single-deployment
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeployment {
    /// The deployment record.
    pub deployment: Deployment,

    /// The project the deployment belongs to.
    pub project: Project,
}

/// A project and its deployment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDeploymentsResults {
    /// The project record.
    pub project: Project,

    /// Deployments of the project, newest first.
    pub deployments: Vec<Deployment>,
}

impl AppVeyorClient {
    /// Starts a deployment of a build into an environment.
    pub async fn start_deployment(&self, request: &DeploymentStartRequest) -> Result<Deployment> {
        self.post("/deployments", request).await
    }

    /// Gets a deployment with its project.
    pub async fn deployment(&self, deployment_id: i32) -> Result<ProjectDeployment> {
        self.get(&format!("/deployments/{deployment_id}")).await
    }

    /// Polls a deployment once per second until it leaves the
    /// queued/running states, then returns the final record.
    ///
    /// No timeout is applied; wrap with `tokio::time::timeout` when a
    /// deadline is needed.
    pub async fn wait_for_deployment(&self, deployment_id: i32) -> Result<ProjectDeployment> {
        loop {
            let results = self.deployment(deployment_id).await?;
            if !results.deployment.status.is_pending() {
                return Ok(results);
            }
            debug!(
                deployment_id,
                status = ?results.deployment.status,
                "deployment still pending"
            );
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Gets the deployment history of a project, newest first.
    pub async fn project_deployments(
        &self,
        account_name: &str,
        project_slug: &str,
    ) -> Result<ProjectDeploymentsResults> {
        self.get(&format!(
            "/projects/{account_name}/{project_slug}/deployments"
        ))
        .await
    }
}
