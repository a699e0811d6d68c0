//
//  appveyor-client
//  api/roles.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Roles API
//!
//! Account roles and their permission groups. Besides the CRUD surface,
//! this module maintains a memoized lookup of the account's *system* roles
//! (Administrator, User, and so on). System roles are immutable, so the
//! lookup is populated exactly once per client.
//!
//! ## Cache population
//!
//! The first call to [`AppVeyorClient::roles`] primes the cache as a side
//! effect, double-checked under an exclusive lock. The lock is taken with
//! a non-blocking `try_lock` so concurrent list calls never queue behind
//! the populating caller; a contended caller simply performs an uncached
//! fetch. [`AppVeyorClient::system_role`] must have the cache, so it takes
//! the blocking variant of the same lock.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::api::client::AppVeyorClient;
use crate::api::error::Result;

/// An account role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role identifier.
    pub role_id: i32,

    /// Role name, unique within the account.
    pub name: String,

    /// Whether this is a built-in system role.
    pub is_system: bool,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,
}

/// A role together with its permission groups, as returned by the
/// single-role operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleWithGroups {
    /// Role identifier.
    pub role_id: i32,

    /// Role name, unique within the account.
    pub name: String,

    /// Whether this is a built-in system role.
    pub is_system: bool,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,

    /// Permission groups with their individual grants.
    pub groups: Vec<GroupPermissions>,
}

/// A named group of permissions within a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPermissions {
    /// Group name, e.g. `Projects` or `Environments`.
    pub name: String,

    /// The individual permissions in this group.
    pub permissions: Vec<Permission>,
}

/// A single permission grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// Permission name, e.g. `UpdateProjectSettings`.
    pub name: String,

    /// Human-readable description.
    pub description: Option<String>,

    /// Whether the permission is granted; unset means inherited.
    pub allowed: Option<bool>,
}

/// Request body for creating a role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAddition {
    /// Name of the role to create.
    pub name: String,
}

impl RoleAddition {
    /// Creates an addition request for the given role name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Memoized system-roles-by-name lookup.
///
/// Population happens at most once; readers after population are
/// lock-free. See the module documentation for the locking protocol.
#[derive(Debug, Default)]
pub(crate) struct SystemRoleCache {
    populate: Mutex<()>,
    by_name: OnceCell<BTreeMap<String, Role>>,
}

impl SystemRoleCache {
    fn prime(&self, roles: &[Role]) {
        let by_name = roles
            .iter()
            .filter(|role| role.is_system)
            .map(|role| (role.name.clone(), role.clone()))
            .collect();
        // Lost set race means another caller primed with the same data.
        let _ = self.by_name.set(by_name);
    }

    fn lookup(&self, name: &str) -> Option<Role> {
        self.by_name.get().and_then(|map| map.get(name).cloned())
    }
}

impl AppVeyorClient {
    /// Lists all roles in the account.
    ///
    /// The first successful call also primes the system-role cache used by
    /// [`AppVeyorClient::system_role`]; a call racing the priming falls
    /// back to an uncached fetch rather than waiting.
    pub async fn roles(&self) -> Result<Vec<Role>> {
        if self.system_roles.by_name.get().is_none() {
            if let Ok(_guard) = self.system_roles.populate.try_lock() {
                if self.system_roles.by_name.get().is_none() {
                    let roles: Vec<Role> = self.get("/roles").await?;
                    self.system_roles.prime(&roles);
                    return Ok(roles);
                }
            }
        }

        self.get("/roles").await
    }

    /// Looks up a system role by name, from the cache when populated.
    ///
    /// Returns `Ok(None)` for names that are not system roles (including
    /// user-defined roles, which change and are never cached).
    pub async fn system_role(&self, name: &str) -> Result<Option<Role>> {
        if self.system_roles.by_name.get().is_none() {
            let _guard = self.system_roles.populate.lock().await;
            if self.system_roles.by_name.get().is_none() {
                let roles: Vec<Role> = self.get("/roles").await?;
                self.system_roles.prime(&roles);
            }
        }

        Ok(self.system_roles.lookup(name))
    }

    /// Gets a role with its permission groups.
    pub async fn role(&self, role_id: i32) -> Result<RoleWithGroups> {
        self.get(&format!("/roles/{role_id}")).await
    }

    /// Creates a role.
    pub async fn add_role(&self, addition: &RoleAddition) -> Result<RoleWithGroups> {
        self.post("/roles", addition).await
    }

    /// Updates a role, including its permission grants.
    pub async fn update_role(&self, role: &RoleWithGroups) -> Result<RoleWithGroups> {
        self.put("/roles", role).await
    }

    /// Deletes a role.
    pub async fn delete_role(&self, role_id: i32) -> Result<()> {
        self.delete(&format!("/roles/{role_id}")).await
    }
}
