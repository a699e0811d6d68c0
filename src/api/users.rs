//
//  appveyor-client
//  api/users.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Users API
//!
//! Account user management. Users are created with a role assignment and
//! addressed by their numeric identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::client::AppVeyorClient;
use crate::api::error::Result;
use crate::api::roles::Role;

/// An account user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    /// User identifier.
    pub user_id: i32,

    /// Full display name.
    pub full_name: String,

    /// E-mail address, unique within the account.
    pub email: String,

    /// Identifier of the assigned role.
    pub role_id: i32,

    /// Name of the assigned role.
    pub role_name: Option<String>,

    /// Creation time.
    pub created: Option<DateTime<Utc>>,

    /// Last modification time.
    pub updated: Option<DateTime<Utc>>,
}

/// A user together with the roles assignable to them, as returned by the
/// single-user operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccountRolesResults {
    /// The user record.
    pub user: UserAccount,

    /// Roles that can be assigned to the user.
    pub roles: Vec<Role>,
}

/// Request body for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAddition {
    /// Full display name.
    pub full_name: String,

    /// E-mail address; an invitation is sent here.
    pub email: String,

    /// Identifier of the role to assign.
    pub role_id: i32,
}

impl AppVeyorClient {
    /// Lists all users in the account.
    pub async fn users(&self) -> Result<Vec<UserAccount>> {
        self.get("/users").await
    }

    /// Gets a user with their assignable roles.
    pub async fn user(&self, user_id: i32) -> Result<UserAccountRolesResults> {
        self.get(&format!("/users/{user_id}")).await
    }

    /// Creates a user.
    pub async fn add_user(&self, addition: &UserAddition) -> Result<()> {
        self.post_empty("/users", addition).await
    }

    /// Updates a user record.
    pub async fn update_user(&self, user: &UserAccount) -> Result<()> {
        self.put_empty("/users", user).await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, user_id: i32) -> Result<()> {
        self.delete(&format!("/users/{user_id}")).await
    }
}
