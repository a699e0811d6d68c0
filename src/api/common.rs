//
//  appveyor-client
//  api/common.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API types shared across resources.
//!
//! Builds and deployments report progress through the same [`Status`]
//! lifecycle, and secure values (project and environment variables) share
//! the [`StoredValue`] representation.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a build or deployment.
///
/// ```text
/// queued -> starting -> running -> success | failed | cancelled
///                              \-> cancelling -> cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Accepted, waiting for a worker.
    Queued,

    /// Worker assigned, environment being prepared.
    Starting,

    /// Currently executing.
    Running,

    /// Finished successfully.
    Success,

    /// Finished with a failure.
    Failed,

    /// Cancellation requested, not yet complete.
    Cancelling,

    /// Cancelled before completion.
    Cancelled,
}

impl Status {
    /// Whether the operation is still queued or executing. This is the
    /// predicate polled by [`crate::AppVeyorClient::wait_for_build`] and
    /// [`crate::AppVeyorClient::wait_for_deployment`].
    pub fn is_pending(self) -> bool {
        matches!(self, Status::Queued | Status::Running)
    }

    /// Whether the operation has reached a terminal state.
    pub fn is_complete(self) -> bool {
        matches!(self, Status::Success | Status::Failed | Status::Cancelled)
    }
}

/// A possibly-encrypted stored value.
///
/// Secure variables come back with `is_encrypted` set and no plain value;
/// ordinary variables carry their value verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredValue {
    /// Whether the value is stored encrypted.
    pub is_encrypted: Option<bool>,

    /// The plain value, absent for encrypted entries.
    pub value: Option<String>,
}

/// A named stored value, as used by project and environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredNameValue {
    /// Variable name.
    pub name: String,

    /// Variable value.
    pub value: StoredValue,
}

impl StoredNameValue {
    /// Convenience constructor for a plain (unencrypted) variable.
    pub fn plain(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: StoredValue {
                is_encrypted: Some(false),
                value: Some(value.into()),
            },
        }
    }
}
