//
//  appveyor-client
//  tests/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! End-to-end tests of the API client against a mock HTTP server.
//!
//! Every client in this suite runs with the lossless round-trip check
//! enabled, so each response body here doubles as a fixture proving the
//! typed models drop nothing the server sends. Bodies carry every field a
//! model serializes (including explicit nulls), matching the wire format
//! of the real service.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use mockito::{Matcher, Server};
use serde_json::{json, Value};

use appveyor_client::api::builds::{BuildStartRequest, ReBuildRequest};
use appveyor_client::api::collaborators::{CollaboratorAddition, CollaboratorUpdate};
use appveyor_client::api::common::{Status, StoredNameValue};
use appveyor_client::api::deployments::DeploymentStartRequest;
use appveyor_client::api::environments::DeploymentEnvironmentAddition;
use appveyor_client::api::projects::{
    BadgeOptions, ProjectAddition, ProjectBuildNumberUpdate, RepositoryProvider,
};
use appveyor_client::api::roles::{RoleAddition, RoleWithGroups};
use appveyor_client::api::users::UserAddition;
use appveyor_client::api::{ApiError, AppVeyorClient};
use appveyor_client::compare::{to_tree, Comparison, LosslessError};
use appveyor_client::util::{is_png, is_svg};

const TOKEN: &str = "v2.test-token";

fn client_for(server: &Server) -> AppVeyorClient {
    AppVeyorClient::new(TOKEN)
        .unwrap()
        .with_base_url(server.url())
        .with_lossless_check()
}

fn role_body(role_id: i32, name: &str, is_system: bool) -> Value {
    json!({
        "roleId": role_id,
        "name": name,
        "isSystem": is_system,
        "created": "2014-08-16T00:52:15.6604826+00:00",
        "updated": null,
    })
}

fn role_with_groups_body(role_id: i32, name: &str) -> Value {
    // Dates in canonical form: this body is also used to match a request
    // the client serializes itself.
    json!({
        "roleId": role_id,
        "name": name,
        "isSystem": false,
        "created": "2018-04-08T21:35:21Z",
        "updated": null,
        "groups": [
            {
                "name": "Projects",
                "permissions": [
                    {
                        "name": "UpdateProjectSettings",
                        "description": "Update project settings",
                        "allowed": false,
                    },
                ],
            },
        ],
    })
}

fn user_body(user_id: i32, full_name: &str, email: &str) -> Value {
    json!({
        "userId": user_id,
        "fullName": full_name,
        "email": email,
        "roleId": 4,
        "roleName": "User",
        "created": "2017-02-25T11:19:30.9562537+00:00",
        "updated": null,
    })
}

fn project_body(slug: &str) -> Value {
    json!({
        "projectId": 42438,
        "accountId": 2,
        "accountName": "test-account",
        "name": "Test Project",
        "slug": slug,
        "repositoryType": "git",
        "repositoryName": "https://github.com/test-account/empty.git",
        "repositoryBranch": "master",
        "isPrivate": false,
        "created": "2017-02-25T11:19:30.9562537+00:00",
        "updated": "2017-02-25T11:22:08.8954459+00:00",
    })
}

fn job_body(job_id: &str, status: &str) -> Value {
    json!({
        "jobId": job_id,
        "name": "Configuration: Release",
        "status": status,
        "created": "2017-02-25T11:19:35.7035245+00:00",
        "started": "2017-02-25T11:19:50.0000000+00:00",
        "finished": null,
    })
}

fn build_body(status: &str, finished: bool) -> Value {
    json!({
        "buildId": 12972040,
        "buildNumber": 45,
        "version": "1.0.45",
        "branch": "master",
        "message": "initial commit",
        "commitId": "9d239cbb0a6e2f2b4dbcfa83ccf1846cd1d4c29e",
        "authorName": "Test Author",
        "status": status,
        "jobs": [job_body("v3wsa7iv5mvrmn4d", status)],
        "created": "2017-02-25T11:19:34.4651884+00:00",
        "started": "2017-02-25T11:19:51.0000000+00:00",
        "updated": "2017-02-25T11:20:44.0000000+00:00",
        "finished": if finished { json!("2017-02-25T11:20:44.0000000+00:00") } else { Value::Null },
    })
}

fn environment_body(id: i32, name: &str) -> Value {
    json!({
        "deploymentEnvironmentId": id,
        "name": name,
        "provider": "Webhook",
        "created": "2017-02-26T02:44:28.5445085+00:00",
        "updated": null,
    })
}

fn deployment_body(deployment_id: i32, status: &str, finished: bool) -> Value {
    json!({
        "deploymentId": deployment_id,
        "status": status,
        "build": build_body("success", true),
        "environment": environment_body(92081, "Test Env"),
        "created": "2017-02-26T02:44:45.0000000+00:00",
        "started": "2017-02-26T02:44:50.0000000+00:00",
        "updated": "2017-02-26T02:45:10.0000000+00:00",
        "finished": if finished { json!("2017-02-26T02:45:10.0000000+00:00") } else { Value::Null },
    })
}

// ---------------------------------------------------------------------------
// Error enrichment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_enrichment_parses_structured_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/projects")
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"No failed or cancelled jobs in build with ID 123"}"#)
        .create_async()
        .await;

    let error = client_for(&server).projects().await.unwrap_err();
    let http = error.http().expect("expected an HTTP error");
    assert_eq!(http.status.as_u16(), 500);
    assert_eq!(
        http.body,
        r#"{"message":"No failed or cancelled jobs in build with ID 123"}"#
    );
    let model = http.model.as_ref().expect("expected a parsed error model");
    assert_eq!(
        model.message,
        "No failed or cancelled jobs in build with ID 123"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn error_enrichment_preserves_plain_text_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/projects/test-account/no-such-project")
        .with_status(404)
        .with_header("content-type", "text/plain")
        .with_body("plain text not found")
        .create_async()
        .await;

    let error = client_for(&server)
        .project_last_build("test-account", "no-such-project")
        .await
        .unwrap_err();
    let http = error.http().expect("expected an HTTP error");
    assert_eq!(http.status.as_u16(), 404);
    assert!(http.model.is_none());
    assert_eq!(http.body, "plain text not found");
    assert_eq!(http.message(), "plain text not found");
}

// ---------------------------------------------------------------------------
// Lossless decode check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lossless_check_flags_dropped_fields() {
    let mut server = Server::new_async().await;
    let mut body = role_with_groups_body(3040, "Test Role");
    body.as_object_mut()
        .unwrap()
        .insert("color".to_string(), json!("#ff0000"));
    server
        .mock("GET", "/roles/3040")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .expect(2)
        .create_async()
        .await;

    // With the check enabled the unknown field fails the call.
    let error = client_for(&server).role(3040).await.unwrap_err();
    match error {
        ApiError::Lossless(LosslessError::NotLossless(failure)) => {
            assert_eq!(failure.path, "$.color");
        }
        other => panic!("expected a lossless failure, got {other}"),
    }

    // The production decode (no check) drops the field silently.
    let plain = AppVeyorClient::new(TOKEN)
        .unwrap()
        .with_base_url(server.url());
    let role = plain.role(3040).await.unwrap();
    assert_eq!(role.name, "Test Role");
}

// ---------------------------------------------------------------------------
// Roles and the system-role cache
// ---------------------------------------------------------------------------

#[tokio::test]
async fn system_roles_cached_after_first_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/roles")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                role_body(1, "Administrator", true),
                role_body(4, "User", true),
                role_body(3040, "Test Role", false),
            ])
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let roles = client.roles().await.unwrap();
    assert_eq!(roles.len(), 3);

    // Served from the cache: the mock allows exactly one hit.
    let user = client.system_role("User").await.unwrap();
    assert_eq!(user.unwrap().role_id, 4);
    let admin = client.system_role("Administrator").await.unwrap();
    assert!(admin.is_some());
    // Non-system roles are never cached.
    assert!(client.system_role("Test Role").await.unwrap().is_none());

    mock.assert_async().await;
}

#[tokio::test]
async fn add_role_duplicate_reports_conflict() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/roles")
        .match_body(Matcher::Json(json!({"name": "Test Role"})))
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Role with name \"Test Role\" already exists"}"#)
        .create_async()
        .await;

    let error = client_for(&server)
        .add_role(&RoleAddition::new("Test Role"))
        .await
        .unwrap_err();
    let http = error.http().expect("expected an HTTP error");
    assert!(http.message().contains("already exists"));
}

/// Fixture helper: create a role, and on an "already exists" conflict
/// delete the stale copy and retry exactly once.
async fn create_role_fixture(
    client: &AppVeyorClient,
    name: &str,
    stale_role_id: i32,
) -> Result<RoleWithGroups, ApiError> {
    match client.add_role(&RoleAddition::new(name)).await {
        Ok(role) => Ok(role),
        Err(error) => {
            let conflict = error
                .http()
                .map(|http| http.message().contains("already exists"))
                .unwrap_or(false);
            if !conflict {
                return Err(error);
            }
            client.delete_role(stale_role_id).await?;
            client.add_role(&RoleAddition::new(name)).await
        }
    }
}

#[tokio::test]
async fn stale_fixture_recovery_retries_create_once() {
    let mut server = Server::new_async().await;
    let add = server
        .mock("POST", "/roles")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Role with name \"Test Role\" already exists"}"#)
        .expect(2)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/roles/3040")
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    // Creation keeps failing, so the helper gives up after one retry.
    let error = create_role_fixture(&client_for(&server), "Test Role", 3040)
        .await
        .unwrap_err();
    assert!(error.http().unwrap().message().contains("already exists"));

    add.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn update_role_round_trips() {
    let mut server = Server::new_async().await;
    let body = role_with_groups_body(3040, "Test Role");
    server
        .mock("PUT", "/roles")
        .match_body(Matcher::Json(body.clone()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let role: RoleWithGroups = serde_json::from_value(body).unwrap();
    let updated = client.update_role(&role).await.unwrap();
    assert_eq!(updated.role_id, 3040);
    assert_eq!(updated.groups.len(), 1);
}

// ---------------------------------------------------------------------------
// Users and collaborators
// ---------------------------------------------------------------------------

#[tokio::test]
async fn users_flow() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/users")
        .match_body(Matcher::Json(json!({
            "fullName": "Test User",
            "email": "test-user@example.com",
            "roleId": 4,
        })))
        .with_status(204)
        .create_async()
        .await;
    server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([user_body(92081, "Test User", "test-user@example.com")]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/users/92081")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "user": user_body(92081, "Test User", "test-user@example.com"),
                "roles": [role_body(4, "User", true)],
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("DELETE", "/users/92081")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .add_user(&UserAddition {
            full_name: "Test User".to_string(),
            email: "test-user@example.com".to_string(),
            role_id: 4,
        })
        .await
        .unwrap();

    let users = client.users().await.unwrap();
    let user = users
        .iter()
        .find(|user| user.email == "test-user@example.com")
        .expect("created user not in list");
    assert_eq!(user.full_name, "Test User");

    let results = client.user(user.user_id).await.unwrap();
    assert_eq!(results.user.user_id, 92081);
    assert!(results.roles.iter().any(|role| role.name == "User"));

    // The listed record and the individually fetched record agree.
    let listed = to_tree(user).unwrap();
    let fetched = to_tree(&results.user).unwrap();
    Comparison::strict()
        .exclude("updated")
        .compare(&listed, &fetched)
        .unwrap();

    client.delete_user(user.user_id).await.unwrap();
}

#[tokio::test]
async fn collaborators_flow() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/collaborators")
        .match_body(Matcher::Json(json!({
            "email": "appveyor-collab@example.com",
            "roleId": 4,
        })))
        .with_status(204)
        .create_async()
        .await;
    server
        .mock("PUT", "/collaborators")
        .match_body(Matcher::Json(json!({"userId": 92082, "roleId": 1})))
        .with_status(204)
        .create_async()
        .await;
    server
        .mock("GET", "/collaborators")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([user_body(92082, "Collab User", "appveyor-collab@example.com")]).to_string(),
        )
        .create_async()
        .await;
    server
        .mock("DELETE", "/collaborators/92082")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    client
        .add_collaborator(&CollaboratorAddition {
            email: "appveyor-collab@example.com".to_string(),
            role_id: 4,
        })
        .await
        .unwrap();
    let collaborators = client.collaborators().await.unwrap();
    assert_eq!(collaborators.len(), 1);
    client
        .update_collaborator(&CollaboratorUpdate {
            user_id: 92082,
            role_id: 1,
        })
        .await
        .unwrap();
    client.delete_collaborator(92082).await.unwrap();
}

// ---------------------------------------------------------------------------
// Environments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn environments_flow() {
    let mut server = Server::new_async().await;
    let with_settings = json!({
        "deploymentEnvironmentId": 92081,
        "name": "Test Env",
        "settings": {
            "provider": "Webhook",
            "environmentVariables": [
                {"name": "WEBHOOK_URL", "value": {"isEncrypted": false, "value": "https://example.com/hook"}},
            ],
        },
        "created": "2017-02-26T02:44:28.5445085+00:00",
        "updated": null,
    });
    server
        .mock("POST", "/environments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(with_settings.to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/environments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([environment_body(92081, "Test Env")]).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/environments/92081/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"environment": with_settings}).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/environments/92081/deployments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "environment": environment_body(92081, "Test Env"),
                "deployments": [deployment_body(142, "success", true)],
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("DELETE", "/environments/92081")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    let environment = client
        .add_environment(&DeploymentEnvironmentAddition {
            name: "Test Env".to_string(),
            provider: Some("Webhook".to_string()),
            environment_variables: vec![StoredNameValue::plain(
                "WEBHOOK_URL",
                "https://example.com/hook",
            )],
        })
        .await
        .unwrap();
    assert_eq!(environment.deployment_environment_id, 92081);

    let environments = client.environments().await.unwrap();
    assert_eq!(environments.len(), 1);

    let settings = client.environment_settings(92081).await.unwrap();
    assert_eq!(
        settings.environment.settings.environment_variables[0].name,
        "WEBHOOK_URL"
    );

    let deployments = client.environment_deployments(92081).await.unwrap();
    assert_eq!(deployments.deployments.len(), 1);
    assert_eq!(deployments.deployments[0].status, Status::Success);

    client.delete_environment(92081).await.unwrap();
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_list_projects_agree() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/projects")
        .match_body(Matcher::Json(json!({
            "repositoryProvider": "git",
            "repositoryName": "https://github.com/test-account/empty.git",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(project_body("test-project").to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/projects")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([project_body("test-project")]).to_string())
        .create_async()
        .await;

    let client = client_for(&server);
    let created = client
        .add_project(&ProjectAddition {
            repository_provider: RepositoryProvider::Git,
            repository_name: "https://github.com/test-account/empty.git".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(created.slug, "test-project");

    let projects = client.projects().await.unwrap();
    let listed = projects
        .iter()
        .find(|project| project.slug == created.slug)
        .expect("created project not in list");

    // List entries carry a subset of the full record.
    let expected = to_tree(listed).unwrap();
    let actual = to_tree(&created).unwrap();
    Comparison::agrees().compare(&expected, &actual).unwrap();
}

#[tokio::test]
async fn project_settings_and_yaml() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/projects/test-account/test-project/settings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "project": project_body("test-project"),
                "settings": {
                    "statusBadgeId": "gxv98u4vhvkn9mu7",
                    "versionFormat": "1.0.{build}",
                    "nextBuildNumber": 46,
                },
            })
            .to_string(),
        )
        .create_async()
        .await;
    let yaml = "version: 1.0.{build}\nbuild_script:\n  - ps: echo build\ntest: off\n";
    server
        .mock("GET", "/projects/test-account/test-project/settings/yaml")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body(yaml)
        .create_async()
        .await;
    server
        .mock("PUT", "/projects/test-account/test-project/settings/yaml")
        .match_header("content-type", "text/plain")
        .match_body(Matcher::Exact(yaml.to_string()))
        .with_status(204)
        .create_async()
        .await;
    server
        .mock("PUT", "/projects/test-account/test-project/settings/build-number")
        .match_body(Matcher::Json(json!({"nextBuildNumber": 46})))
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    let settings = client
        .project_settings("test-account", "test-project")
        .await
        .unwrap();
    assert_eq!(
        settings.settings.status_badge_id.as_deref(),
        Some("gxv98u4vhvkn9mu7")
    );

    let fetched = client
        .project_settings_yaml("test-account", "test-project")
        .await
        .unwrap();
    // The settings document must itself be valid YAML.
    let parsed: serde_yaml::Value = serde_yaml::from_str(&fetched).unwrap();
    assert!(parsed.get("version").is_some());

    client
        .update_project_settings_yaml("test-account", "test-project", &fetched)
        .await
        .unwrap();
    client
        .update_project_build_number(
            "test-account",
            "test-project",
            &ProjectBuildNumberUpdate {
                next_build_number: 46,
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn project_environment_variables_round_trip() {
    let mut server = Server::new_async().await;
    let variables = json!([
        {"name": "TEST_VAR", "value": {"isEncrypted": false, "value": "1"}},
        {"name": "SECRET_VAR", "value": {"isEncrypted": true, "value": null}},
    ]);
    server
        .mock(
            "GET",
            "/projects/test-account/test-project/settings/environment-variables",
        )
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(variables.to_string())
        .create_async()
        .await;
    server
        .mock(
            "PUT",
            "/projects/test-account/test-project/settings/environment-variables",
        )
        .match_body(Matcher::Json(variables.clone()))
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    let fetched = client
        .project_environment_variables("test-account", "test-project")
        .await
        .unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[1].value.is_encrypted, Some(true));
    assert_eq!(fetched[1].value.value, None);

    client
        .update_project_environment_variables("test-account", "test-project", &fetched)
        .await
        .unwrap();
}

#[tokio::test]
async fn status_badges_are_images() {
    let mut server = Server::new_async().await;
    let png: &[u8] = &[
        0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n', 0x00, 0x00, 0x00, 0x0d,
    ];
    server
        .mock("GET", "/projects/status/gxv98u4vhvkn9mu7")
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(png)
        .create_async()
        .await;
    let svg = "<?xml version=\"1.0\"?><svg xmlns=\"http://www.w3.org/2000/svg\">ok</svg>";
    server
        .mock("GET", "/projects/status/gxv98u4vhvkn9mu7")
        .match_query(Matcher::UrlEncoded("svg".into(), "true".into()))
        .with_status(200)
        .with_header("content-type", "image/svg+xml")
        .with_body(svg)
        .create_async()
        .await;
    server
        .mock("GET", "/projects/status/gitHub/gruntjs/grunt")
        .match_query(Matcher::UrlEncoded("retina".into(), "true".into()))
        .with_status(200)
        .with_header("content-type", "image/png")
        .with_body(png)
        .create_async()
        .await;

    let client = client_for(&server);
    let badge = client
        .project_status_badge("gxv98u4vhvkn9mu7", &BadgeOptions::png())
        .await
        .unwrap();
    assert!(is_png(&badge));

    let badge = client
        .project_status_badge("gxv98u4vhvkn9mu7", &BadgeOptions::svg())
        .await
        .unwrap();
    assert!(is_svg(&badge));
    assert!(String::from_utf8(badge).unwrap().contains("ok"));

    let badge = client
        .public_project_status_badge(
            RepositoryProvider::GitHub,
            "gruntjs",
            "grunt",
            &BadgeOptions::retina(),
        )
        .await
        .unwrap();
    assert!(is_png(&badge));
}

// ---------------------------------------------------------------------------
// Builds
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_build_and_wait_polls_until_complete() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/builds")
        .match_body(Matcher::Json(json!({
            "accountName": "test-account",
            "projectSlug": "test-project",
            "branch": "master",
            "environmentVariables": {"TEST_VAR": "1"},
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(build_body("queued", false).to_string())
        .create_async()
        .await;

    let polls = Arc::new(AtomicUsize::new(0));
    let poll_counter = Arc::clone(&polls);
    server
        .mock("GET", "/projects/test-account/test-project/build/1.0.45")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let results = |status: &str, finished: bool| {
                json!({
                    "project": project_body("test-project"),
                    "build": build_body(status, finished),
                })
            };
            if poll_counter.fetch_add(1, Ordering::SeqCst) == 0 {
                results("running", false).to_string().into_bytes()
            } else {
                results("success", true).to_string().into_bytes()
            }
        })
        .expect_at_least(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let request = BuildStartRequest::new("test-account", "test-project", "master")
        .environment_variable("TEST_VAR", "1");
    let build = client.start_build(&request).await.unwrap();
    assert_eq!(build.version, "1.0.45");
    assert_eq!(build.status, Status::Queued);

    let results = client
        .wait_for_build("test-account", "test-project", &build.version)
        .await
        .unwrap();
    assert_eq!(results.build.status, Status::Success);
    assert!(results.build.finished.is_some());
    assert!(polls.load(Ordering::SeqCst) >= 2);

    // Apart from job progress, the final build matches the started one.
    let expected = to_tree(&build).unwrap();
    let actual = to_tree(&results.build).unwrap();
    Comparison::strict()
        .exclude("status")
        .exclude("jobs")
        .exclude("updated")
        .exclude("finished")
        .compare(&expected, &actual)
        .unwrap();
}

#[tokio::test]
async fn re_run_and_cancel_build() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/builds")
        .match_body(Matcher::Json(json!({
            "buildId": 12972040,
            "reRunIncomplete": false,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(build_body("queued", false).to_string())
        .create_async()
        .await;
    server
        .mock("DELETE", "/builds/test-account/test-project/1.0.45")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    let rebuild = client
        .re_run_build(&ReBuildRequest {
            build_id: 12972040,
            re_run_incomplete: false,
        })
        .await
        .unwrap();
    assert_eq!(rebuild.status, Status::Queued);

    client
        .cancel_build("test-account", "test-project", "1.0.45")
        .await
        .unwrap();
}

#[tokio::test]
async fn artifacts_and_log_downloads() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/buildjobs/v3wsa7iv5mvrmn4d/artifacts")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {"fileName": "out/test.txt", "name": null, "type": "File", "size": 11},
            ])
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock("GET", "/buildjobs/v3wsa7iv5mvrmn4d/artifacts/out/test.txt")
        .with_status(200)
        .with_header("content-type", "application/octet-stream")
        .with_body("test output")
        .create_async()
        .await;
    server
        .mock("GET", "/buildjobs/v3wsa7iv5mvrmn4d/log")
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("Build started\nBuild completed\n")
        .create_async()
        .await;

    let client = client_for(&server);
    let artifacts = client.build_artifacts("v3wsa7iv5mvrmn4d").await.unwrap();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].file_name, "out/test.txt");

    let bytes = client
        .build_artifact("v3wsa7iv5mvrmn4d", &artifacts[0].file_name)
        .await
        .unwrap();
    assert_eq!(bytes, b"test output");

    // Artifacts are written to disk by consumers; round-trip through a file.
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&bytes).unwrap();
    assert_eq!(std::fs::read(file.path()).unwrap(), bytes);

    let log = client.build_log("v3wsa7iv5mvrmn4d").await.unwrap();
    assert!(log.contains("Build completed"));
}

// ---------------------------------------------------------------------------
// Deployments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_deployment_and_wait_polls_until_complete() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/deployments")
        .match_body(Matcher::Json(json!({
            "environmentName": "Test Env",
            "accountName": "test-account",
            "projectSlug": "test-project",
            "buildVersion": "1.0.45",
            "buildJobId": "v3wsa7iv5mvrmn4d",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(deployment_body(142, "queued", false).to_string())
        .create_async()
        .await;

    let polls = Arc::new(AtomicUsize::new(0));
    let poll_counter = Arc::clone(&polls);
    server
        .mock("GET", "/deployments/142")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let status = if poll_counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ("running", false)
            } else {
                ("success", true)
            };
            json!({
                "deployment": deployment_body(142, status.0, status.1),
                "project": project_body("test-project"),
            })
            .to_string()
            .into_bytes()
        })
        .expect_at_least(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let deployment = client
        .start_deployment(&DeploymentStartRequest {
            environment_name: "Test Env".to_string(),
            account_name: "test-account".to_string(),
            project_slug: "test-project".to_string(),
            build_version: "1.0.45".to_string(),
            build_job_id: "v3wsa7iv5mvrmn4d".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(deployment.status, Status::Queued);

    let finished = client.wait_for_deployment(142).await.unwrap();
    assert_eq!(finished.deployment.status, Status::Success);
    assert!(finished.deployment.finished.is_some());
    assert!(polls.load(Ordering::SeqCst) >= 2);
}

#[tokio::test]
async fn project_deployments_history() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/projects/test-account/test-project/deployments")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "project": project_body("test-project"),
                "deployments": [deployment_body(142, "success", true)],
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let history = client
        .project_deployments("test-account", "test-project")
        .await
        .unwrap();
    assert_eq!(history.deployments.len(), 1);
    assert_eq!(history.deployments[0].deployment_id, 142);
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[tokio::test]
async fn encrypt_value_returns_plain_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/account/encrypt")
        .match_body(Matcher::Json(json!({"plainValue": "encryptme"})))
        .with_status(200)
        .with_header("content-type", "text/plain")
        .with_body("keq2y6ao2b651tju")
        .create_async()
        .await;

    let encrypted = client_for(&server).encrypt_value("encryptme").await.unwrap();
    assert_eq!(encrypted, "keq2y6ao2b651tju");
}
