//
//  appveyor-client
//  api/environments.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Deployment Environments API
//!
//! Deployment environments name a deployment provider plus its settings
//! (provider configuration and environment variables). Deployments are
//! started *into* an environment; see [`crate::api::deployments`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::AppVeyorClient;
use crate::api::common::StoredNameValue;
use crate::api::deployments::Deployment;
use crate::api::error::Result;

/// A deployment environment, as returned by the list operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironment {
    /// Environment identifier.
    pub deployment_environment_id: i32,

    /// Environment name, unique within the account.
    pub name: String,

    /// Deployment provider, e.g. `Webhook` or `FTP`.
    pub provider: Option<String>,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,
}

/// Provider configuration and variables of an environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironmentSettings {
    /// Deployment provider, e.g. `Webhook` or `FTP`.
    pub provider: Option<String>,

    /// Variables passed to the provider on each deployment.
    #[serde(default)]
    pub environment_variables: Vec<StoredNameValue>,
}

/// An environment together with its settings, as returned by the
/// single-environment operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironmentWithSettings {
    /// Environment identifier.
    pub deployment_environment_id: i32,

    /// Environment name, unique within the account.
    pub name: String,

    /// Provider configuration and variables.
    pub settings: DeploymentEnvironmentSettings,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,
}

/// Request body for creating a deployment environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironmentAddition {
    /// Environment name, unique within the account.
    pub name: String,

    /// Deployment provider, e.g. `Webhook` or `FTP`.
    pub provider: Option<String>,

    /// Variables passed to the provider on each deployment.
    #[serde(default)]
    pub environment_variables: Vec<StoredNameValue>,
}

/// Wrapper returned by the environment settings operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironmentSettingsResults {
    /// The environment with its settings.
    pub environment: DeploymentEnvironmentWithSettings,
}

/// An environment and its deployment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentEnvironmentDeploymentsResults {
    /// The environment record.
    pub environment: DeploymentEnvironment,

    /// Deployments into the environment, newest first.
    pub deployments: Vec<Deployment>,
}

impl AppVeyorClient {
    /// Lists all deployment environments in the account.
    pub async fn environments(&self) -> Result<Vec<DeploymentEnvironment>> {
        self.get("/environments").await
    }

    /// Creates a deployment environment.
    pub async fn add_environment(
        &self,
        addition: &DeploymentEnvironmentAddition,
    ) -> Result<DeploymentEnvironmentWithSettings> {
        self.post("/environments", addition).await
    }

    /// Updates a deployment environment and its settings.
    pub async fn update_environment(
        &self,
        environment: &DeploymentEnvironmentWithSettings,
    ) -> Result<DeploymentEnvironmentWithSettings> {
        self.put("/environments", environment).await
    }

    /// Deletes a deployment environment.
    pub async fn delete_environment(&self, deployment_environment_id: i32) -> Result<()> {
        self.delete(&format!("/environments/{deployment_environment_id}"))
            .await
    }

    /// Gets an environment with its settings.
    pub async fn environment_settings(
        &self,
        deployment_environment_id: i32,
    ) -> Result<DeploymentEnvironmentSettingsResults> {
        self.get(&format!(
            "/environments/{deployment_environment_id}/settings"
        ))
        .await
    }

    /// Gets the deployment history of an environment, newest first.
    pub async fn environment_deployments(
        &self,
        deployment_environment_id: i32,
    ) -> Result<DeploymentEnvironmentDeploymentsResults> {
        self.get(&format!(
            "/environments/{deployment_environment_id}/deployments"
        ))
        .await
    }
}
