//
//  appveyor-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # AppVeyor Client Library
//!
//! A client library for the AppVeyor continuous-integration REST API,
//! powering the `av` CLI tool.
//!
//! ## Overview
//!
//! The library provides typed, async access to the AppVeyor API: roles,
//! users, collaborators, deployment environments, projects, builds,
//! deployments, artifacts, and status badges.
//!
//! Two pieces deserve special mention because they go beyond plain
//! endpoint plumbing:
//!
//! - **Error enrichment**: every non-2xx response is parsed into a
//!   structured error model when its body allows it, with the raw body
//!   preserved verbatim either way. See [`api::error`].
//! - **Structural JSON comparison and the lossless decode check**: generic
//!   tree comparison with strict/agrees modes, date tolerance and field
//!   exclusion, plus an opt-in guard that re-serializes every decoded
//!   response and verifies nothing was silently dropped. See [`compare`].
//!
//! ## Module Structure
//!
//! - [`api`]: HTTP client and per-resource operations
//! - [`compare`]: structural JSON comparison and the round-trip guard
//! - [`config`]: environment-based client configuration
//! - [`cli`]: command-line interface definitions using clap
//! - [`util`]: media sniffing and formatting helpers
//!
//! ## Example
//!
//! ```rust,no_run
//! use appveyor_client::api::{AppVeyorClient, BuildStartRequest};
//!
//! # async fn example() -> Result<(), appveyor_client::ApiError> {
//! let client = AppVeyorClient::from_env()?;
//!
//! let build = client
//!     .start_build(&BuildStartRequest::new("my-account", "my-project", "master"))
//!     .await?;
//! let results = client
//!     .wait_for_build("my-account", "my-project", &build.version)
//!     .await?;
//! println!("build {} finished: {:?}", build.version, results.build.status);
//! # Ok(())
//! # }
//! ```

/// API client and per-resource operations.
pub mod api;

/// Command-line interface definitions.
pub mod cli;

/// Structural JSON comparison and the lossless round-trip guard.
pub mod compare;

/// Environment-based client configuration.
pub mod config;

/// Media sniffing and formatting helpers.
pub mod util;

/// Re-export of the main API client.
pub use api::AppVeyorClient;

/// Re-export of the unified API error type.
pub use api::ApiError;

/// Re-export of the client configuration.
pub use config::Config;

/// Application name constant, used for display and the user agent.
pub const APP_NAME: &str = "av";

/// Application version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Allows scripts to distinguish configuration problems (fix the
/// environment and retry) from API failures.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Missing or invalid configuration (e.g. no API token).
    pub const CONFIG_ERROR: i32 = 4;
}
