//
//  appveyor-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client and typed resource operations for
//! the AppVeyor REST API at `https://ci.appveyor.com/api`.
//!
//! ## Architecture
//!
//! - [`client`]: Core HTTP client with bearer authentication, error
//!   enrichment, and the optional lossless decode check
//! - [`error`]: Unified error type, including the structured error model
//!   parsed from failure responses
//! - [`common`]: Types shared across resources (status lifecycle, stored
//!   values)
//! - One module per resource: [`roles`], [`users`], [`collaborators`],
//!   [`environments`], [`projects`], [`builds`], [`deployments`]; each
//!   defines its models and implements its operations on
//!   [`AppVeyorClient`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use appveyor_client::api::AppVeyorClient;
//!
//! # async fn example() -> Result<(), appveyor_client::ApiError> {
//! let client = AppVeyorClient::from_env()?;
//! for project in client.projects().await? {
//!     println!("{}/{}", project.account_name, project.slug);
//! }
//! # Ok(())
//! # }
//! ```

/// Core HTTP client wrapper for the AppVeyor API.
pub mod client;

/// Types shared across resources: status lifecycle, stored values.
pub mod common;

/// Unified error type and the structured error model.
pub mod error;

/// Roles and the memoized system-role lookup.
pub mod roles;

/// Account users.
pub mod users;

/// Cross-account collaborators.
pub mod collaborators;

/// Deployment environments.
pub mod environments;

/// Projects, settings, history, and status badges.
pub mod projects;

/// Builds, artifacts, and logs.
pub mod builds;

/// Deployments into environments.
pub mod deployments;

pub use builds::{Artifact, Build, BuildStartRequest, Job, ReBuildRequest};
pub use client::AppVeyorClient;
pub use collaborators::{CollaboratorAddition, CollaboratorUpdate};
pub use common::{Status, StoredNameValue, StoredValue};
pub use deployments::{Deployment, DeploymentStartRequest, ProjectDeployment};
pub use environments::{DeploymentEnvironment, DeploymentEnvironmentWithSettings};
pub use error::{ApiError, ErrorModel, HttpError};
pub use projects::{
    BadgeOptions, Project, ProjectAddition, ProjectBuildResults, RepositoryProvider,
};
pub use roles::{Role, RoleAddition, RoleWithGroups};
pub use users::{UserAccount, UserAddition};
