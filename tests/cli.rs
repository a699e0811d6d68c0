//
//  appveyor-client
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Tests of the `av` binary surface: configuration failures, version
//! output, and completion generation. Commands that talk to the API are
//! covered by `tests/api.rs` through the library.

use assert_cmd::Command;
use predicates::prelude::*;

fn av() -> Command {
    let mut cmd = Command::cargo_bin("av").unwrap();
    // Isolate from the invoking environment.
    cmd.env_remove("APPVEYOR_API_TOKEN")
        .env_remove("APPVEYOR_API_URL")
        .env_remove("APPVEYOR_ACCOUNT");
    cmd
}

#[test]
fn missing_token_is_a_fatal_config_error() {
    av().args(["project", "list"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("APPVEYOR_API_TOKEN"));
}

#[test]
fn blank_token_is_rejected() {
    av().env("APPVEYOR_API_TOKEN", "   ")
        .args(["project", "list"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("APPVEYOR_API_TOKEN"));
}

#[test]
fn invalid_base_url_is_a_fatal_config_error() {
    av().env("APPVEYOR_API_TOKEN", "v2.token")
        .env("APPVEYOR_API_URL", "not a url")
        .args(["project", "list"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("base URL"));
}

#[test]
fn view_without_account_reports_usage_hint() {
    av().env("APPVEYOR_API_TOKEN", "v2.token")
        .args(["project", "view", "my-project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--account"));
}

#[test]
fn version_prints_crate_version() {
    av().arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn completion_generates_bash_script() {
    av().args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("av"));
}

#[test]
fn no_arguments_shows_usage() {
    av().assert().failure().code(2);
}
