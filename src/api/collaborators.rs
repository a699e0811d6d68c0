//
//  appveyor-client
//  api/collaborators.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Collaborators API
//!
//! Collaborators are users from other AppVeyor accounts granted a role in
//! this one. They share the [`UserAccount`] representation; only the
//! request bodies differ from the users surface.

use serde::{Deserialize, Serialize};

use crate::api::client::AppVeyorClient;
use crate::api::error::Result;
use crate::api::users::{UserAccount, UserAccountRolesResults};

/// Request body for inviting a collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorAddition {
    /// E-mail address of the user to invite.
    pub email: String,

    /// Identifier of the role to grant.
    pub role_id: i32,
}

/// Request body for changing a collaborator's role.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorUpdate {
    /// Identifier of the collaborator's user record.
    pub user_id: i32,

    /// Identifier of the role to grant.
    pub role_id: i32,
}

impl AppVeyorClient {
    /// Lists all collaborators in the account.
    pub async fn collaborators(&self) -> Result<Vec<UserAccount>> {
        self.get("/collaborators").await
    }

    /// Gets a collaborator with their assignable roles.
    pub async fn collaborator(&self, user_id: i32) -> Result<UserAccountRolesResults> {
        self.get(&format!("/collaborators/{user_id}")).await
    }

    /// Invites a collaborator.
    pub async fn add_collaborator(&self, addition: &CollaboratorAddition) -> Result<()> {
        self.post_empty("/collaborators", addition).await
    }

    /// Changes a collaborator's role.
    pub async fn update_collaborator(&self, update: &CollaboratorUpdate) -> Result<()> {
        self.put_empty("/collaborators", update).await
    }

    /// Removes a collaborator from the account.
    pub async fn delete_collaborator(&self, user_id: i32) -> Result<()> {
        self.delete(&format!("/collaborators/{user_id}")).await
    }
}
