//
//  appveyor-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Configuration
//!
//! Configuration for the AppVeyor API client is taken from the process
//! environment at startup:
//!
//! - `APPVEYOR_API_TOKEN`: the bearer token. Absence is a fatal
//!   configuration error; no request is attempted without it.
//! - `APPVEYOR_API_URL`: optional endpoint override, defaulting to the
//!   hosted service at `https://ci.appveyor.com/api`. Used for self-hosted
//!   AppVeyor Server installs and for pointing tests at a local server.
//!
//! # Example
//!
//! ```rust,no_run
//! use appveyor_client::config::Config;
//!
//! let config = Config::from_env().expect("$APPVEYOR_API_TOKEN must be set");
//! println!("talking to {}", config.base_url);
//! ```

use std::env;

use thiserror::Error;
use url::Url;

/// Default API endpoint of the hosted AppVeyor service.
pub const DEFAULT_BASE_URL: &str = "https://ci.appveyor.com/api";

/// Environment variable holding the API bearer token.
pub const TOKEN_ENV: &str = "APPVEYOR_API_TOKEN";

/// Environment variable overriding the API endpoint.
pub const BASE_URL_ENV: &str = "APPVEYOR_API_URL";

/// Errors raised while assembling the client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The token variable was unset or blank.
    #[error("${0} must be set to an AppVeyor API token")]
    MissingToken(&'static str),

    /// The endpoint override was not a valid absolute URL.
    #[error("invalid API base URL `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Resolved client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bearer token sent as `Authorization: Bearer <token>`.
    pub token: String,

    /// API endpoint, without a trailing slash.
    pub base_url: String,
}

impl Config {
    /// Builds a configuration from an explicit token and endpoint.
    ///
    /// The endpoint is validated as an absolute URL and normalized by
    /// stripping any trailing slash, so request paths can always be
    /// appended verbatim.
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken(TOKEN_ENV));
        }

        let base_url = base_url.into();
        Url::parse(&base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            source,
        })?;

        Ok(Self {
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] when `APPVEYOR_API_TOKEN` is
    /// unset or blank, and [`ConfigError::InvalidBaseUrl`] when
    /// `APPVEYOR_API_URL` is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var(TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .ok_or(ConfigError::MissingToken(TOKEN_ENV))?;
        let base_url =
            env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(token, base_url)
    }
}
