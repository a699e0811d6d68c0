//
//  appveyor-client
//  api/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Projects API
//!
//! Project CRUD, settings (structured and YAML), environment variables,
//! build history, and status badges.
//!
//! Projects are addressed by `{account_name}/{slug}`; badges are addressed
//! by the opaque `status_badge_id` from the project settings (or by
//! repository coordinates for the public badge endpoint, which requires no
//! authentication).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::api::builds::Build;
use crate::api::client::AppVeyorClient;
use crate::api::common::StoredNameValue;
use crate::api::error::Result;

/// Source repository provider of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RepositoryProvider {
    GitHub,
    BitBucket,
    Vso,
    GitLab,
    Kiln,
    Git,
    Mercurial,
    Subversion,
}

impl RepositoryProvider {
    /// Wire name of the provider, as used in URL paths and JSON bodies.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GitHub => "gitHub",
            Self::BitBucket => "bitBucket",
            Self::Vso => "vso",
            Self::GitLab => "gitLab",
            Self::Kiln => "kiln",
            Self::Git => "git",
            Self::Mercurial => "mercurial",
            Self::Subversion => "subversion",
        }
    }
}

/// A project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Project identifier.
    pub project_id: i32,

    /// Identifier of the owning account.
    pub account_id: Option<i32>,

    /// Name of the owning account.
    pub account_name: String,

    /// Project display name.
    pub name: String,

    /// URL slug, unique within the account.
    pub slug: String,

    /// Source repository provider.
    pub repository_type: RepositoryProvider,

    /// Repository name or clone URL, provider-dependent.
    pub repository_name: String,

    /// Default branch built for badge purposes.
    pub repository_branch: Option<String>,

    /// Whether the repository is private.
    pub is_private: Option<bool>,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,
}

/// Request body for adding a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAddition {
    /// Provider hosting the repository.
    pub repository_provider: RepositoryProvider,

    /// Repository name or clone URL, provider-dependent.
    pub repository_name: String,
}

/// Structured project configuration, a subset of the YAML settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfiguration {
    /// Opaque identifier used by the status-badge endpoints.
    pub status_badge_id: Option<String>,

    /// Format string for build versions, e.g. `1.0.{build}`.
    pub version_format: Option<String>,

    /// Number assigned to the next build.
    pub next_build_number: Option<i64>,
}

/// Project and configuration pair returned by the settings operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettingsResults {
    /// The project record.
    pub project: Project,

    /// The project's structured configuration.
    pub settings: ProjectConfiguration,
}

/// Project and build pair returned by the single-build operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBuildResults {
    /// The project record.
    pub project: Project,

    /// The requested build.
    pub build: Build,
}

/// Project history page: the project and a window of its builds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectHistory {
    /// The project record.
    pub project: Project,

    /// Builds, newest first.
    pub builds: Vec<Build>,
}

/// Request body for setting the next build number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBuildNumberUpdate {
    /// Number to assign to the next build.
    pub next_build_number: i64,
}

/// Rendering options for status badges.
///
/// The default is the standard-resolution PNG badge. Custom texts are only
/// honored by the SVG variant.
///
/// # Example
///
/// ```rust
/// use appveyor_client::api::BadgeOptions;
///
/// let options = BadgeOptions::svg().pending_text("building…");
/// assert_eq!(options.query(), "?svg=true&pendingText=building%E2%80%A6");
/// ```
#[derive(Debug, Clone, Default)]
pub struct BadgeOptions {
    svg: bool,
    retina: bool,
    passing_text: Option<String>,
    failing_text: Option<String>,
    pending_text: Option<String>,
}

impl BadgeOptions {
    /// Standard-resolution PNG badge.
    pub fn png() -> Self {
        Self::default()
    }

    /// High-resolution (retina) PNG badge.
    pub fn retina() -> Self {
        Self {
            retina: true,
            ..Self::default()
        }
    }

    /// SVG badge.
    pub fn svg() -> Self {
        Self {
            svg: true,
            ..Self::default()
        }
    }

    /// Overrides the badge text for passing builds (SVG only).
    pub fn passing_text(mut self, text: impl Into<String>) -> Self {
        self.passing_text = Some(text.into());
        self
    }

    /// Overrides the badge text for failing builds (SVG only).
    pub fn failing_text(mut self, text: impl Into<String>) -> Self {
        self.failing_text = Some(text.into());
        self
    }

    /// Overrides the badge text for pending builds (SVG only).
    pub fn pending_text(mut self, text: impl Into<String>) -> Self {
        self.pending_text = Some(text.into());
        self
    }

    /// Renders the options as a query string, empty for the defaults.
    pub fn query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if self.svg {
            serializer.append_pair("svg", "true");
        }
        if self.retina {
            serializer.append_pair("retina", "true");
        }
        if let Some(text) = &self.passing_text {
            serializer.append_pair("passingText", text);
        }
        if let Some(text) = &self.failing_text {
            serializer.append_pair("failingText", text);
        }
        if let Some(text) = &self.pending_text {
            serializer.append_pair("pendingText", text);
        }
        let query = serializer.finish();
        if query.is_empty() {
            query
        } else {
            format!("?{query}")
        }
    }
}

impl AppVeyorClient {
    /// Lists all projects in the account.
    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.get("/projects").await
    }

    /// Adds a project from a repository.
    pub async fn add_project(&self, addition: &ProjectAddition) -> Result<Project> {
        self.post("/projects", addition).await
    }

    /// Updates a project and its configuration.
    pub async fn update_project(&self, settings: &ProjectSettingsResults) -> Result<()> {
        self.put_empty("/projects", settings).await
    }

    /// Deletes a project.
    pub async fn delete_project(&self, account_name: &str, project_slug: &str) -> Result<()> {
        self.delete(&format!("/projects/{account_name}/{project_slug}"))
            .await
    }

    /// Gets a project's last build on the default branch.
    pub async fn project_last_build(
        &self,
        account_name: &str,
        project_slug: &str,
    ) -> Result<ProjectBuildResults> {
        self.get(&format!("/projects/{account_name}/{project_slug}"))
            .await
    }

    /// Gets a project's last build on a specific branch.
    pub async fn project_last_build_branch(
        &self,
        account_name: &str,
        project_slug: &str,
        branch: &str,
    ) -> Result<ProjectBuildResults> {
        self.get(&format!(
            "/projects/{account_name}/{project_slug}/branch/{branch}"
        ))
        .await
    }

    /// Gets a specific build of a project by version.
    pub async fn project_build_by_version(
        &self,
        account_name: &str,
        project_slug: &str,
        build_version: &str,
    ) -> Result<ProjectBuildResults> {
        self.get(&format!(
            "/projects/{account_name}/{project_slug}/build/{build_version}"
        ))
        .await
    }

    /// Gets a window of a project's build history, newest first.
    pub async fn project_history(
        &self,
        account_name: &str,
        project_slug: &str,
        records: u32,
    ) -> Result<ProjectHistory> {
        self.get(&format!(
            "/projects/{account_name}/{project_slug}/history?recordsNumber={records}"
        ))
        .await
    }

    /// Gets a project's structured settings.
    pub async fn project_settings(
        &self,
        account_name: &str,
        project_slug: &str,
    ) -> Result<ProjectSettingsResults> {
        self.get(&format!("/projects/{account_name}/{project_slug}/settings"))
            .await
    }

    /// Gets a project's settings in YAML format.
    pub async fn project_settings_yaml(
        &self,
        account_name: &str,
        project_slug: &str,
    ) -> Result<String> {
        self.get_text(&format!(
            "/projects/{account_name}/{project_slug}/settings/yaml"
        ))
        .await
    }

    /// Replaces a project's settings with the given YAML document.
    pub async fn update_project_settings_yaml(
        &self,
        account_name: &str,
        project_slug: &str,
        yaml: &str,
    ) -> Result<()> {
        self.put_text(
            &format!("/projects/{account_name}/{project_slug}/settings/yaml"),
            yaml,
        )
        .await
    }

    /// Sets the number assigned to the project's next build.
    pub async fn update_project_build_number(
        &self,
        account_name: &str,
        project_slug: &str,
        update: &ProjectBuildNumberUpdate,
    ) -> Result<()> {
        self.put_empty(
            &format!("/projects/{account_name}/{project_slug}/settings/build-number"),
            update,
        )
        .await
    }

    /// Gets a project's environment variables.
    pub async fn project_environment_variables(
        &self,
        account_name: &str,
        project_slug: &str,
    ) -> Result<Vec<StoredNameValue>> {
        self.get(&format!(
            "/projects/{account_name}/{project_slug}/settings/environment-variables"
        ))
        .await
    }

    /// Replaces a project's environment variables.
    pub async fn update_project_environment_variables(
        &self,
        account_name: &str,
        project_slug: &str,
        variables: &[StoredNameValue],
    ) -> Result<()> {
        self.put_empty(
            &format!("/projects/{account_name}/{project_slug}/settings/environment-variables"),
            &variables,
        )
        .await
    }

    /// Downloads a project's status badge by its badge identifier.
    ///
    /// Returns PNG or SVG image bytes depending on `options`.
    pub async fn project_status_badge(
        &self,
        status_badge_id: &str,
        options: &BadgeOptions,
    ) -> Result<Vec<u8>> {
        self.get_bytes(&format!(
            "/projects/status/{status_badge_id}{}",
            options.query()
        ))
        .await
    }

    /// Downloads the status badge of a public project by repository
    /// coordinates, without requiring its badge identifier.
    pub async fn public_project_status_badge(
        &self,
        provider: RepositoryProvider,
        account_name: &str,
        project_slug: &str,
        options: &BadgeOptions,
    ) -> Result<Vec<u8>> {
        self.get_bytes(&format!(
            "/projects/status/{}/{account_name}/{project_slug}{}",
            provider.as_str(),
            options.query()
        ))
        .await
    }
}
