//
//  appveyor-client
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Error Types
//!
//! Unified error surface for every AppVeyor API operation.
//!
//! A failed HTTP response is a single tagged value, [`HttpError`], carrying
//! the status code, the response headers, the raw body text, and, when the
//! body parsed as AppVeyor's error schema, the structured [`ErrorModel`].
//! Callers that want to branch on the server's message use the model;
//! everyone else still has the raw body for diagnostics.
//!
//! ## Invariant
//!
//! `HttpError::model` is `Some` if and only if the raw body was
//! syntactically valid JSON matching the error schema. In every case the
//! raw body string is preserved losslessly in `HttpError::body`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use appveyor_client::api::{ApiError, AppVeyorClient};
//!
//! # async fn example() -> Result<(), ApiError> {
//! let client = AppVeyorClient::from_env()?;
//! match client.roles().await {
//!     Ok(roles) => println!("{} roles", roles.len()),
//!     Err(ApiError::Http(error)) => {
//!         eprintln!("server said: {}", error.message());
//!     }
//!     Err(other) => return Err(other),
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::compare::LosslessError;

/// Structured error payload returned by the AppVeyor API.
///
/// Error responses carry a human-readable `message` and, for request
/// validation failures, a `modelState` map of field name to messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorModel {
    /// Human-readable error message.
    pub message: String,

    /// Per-field validation messages, when the request body was rejected.
    #[serde(default)]
    pub model_state: Option<BTreeMap<String, Vec<String>>>,
}

/// A non-2xx HTTP response, enriched with the parsed error model when the
/// body allowed it.
///
/// Error bodies on extension-less paths are served as plain text; those
/// keep `model` empty and are still fully represented by `body`.
#[derive(Debug)]
pub struct HttpError {
    /// HTTP status code of the response.
    pub status: StatusCode,

    /// Response headers, multi-valued.
    pub headers: HeaderMap,

    /// Raw response body text, preserved verbatim.
    pub body: String,

    /// Parsed error payload; present only if `body` matched the schema.
    pub model: Option<ErrorModel>,
}

impl HttpError {
    /// Returns the best available error message: the structured model's
    /// message when parsing succeeded, the raw body otherwise.
    pub fn message(&self) -> &str {
        match &self.model {
            Some(model) => &model.message,
            None => &self.body,
        }
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message())
    }
}

/// Unified error type for all AppVeyor API operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Client configuration was missing or invalid (e.g. no API token).
    #[error("configuration error: {0}")]
    Config(String),

    /// Network-level failure: connection, TLS, DNS, timeout.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body could not be read after the status line arrived.
    #[error("failed to read response body (HTTP {status}): {source}")]
    BodyRead {
        /// Status of the response whose body was unreadable.
        status: StatusCode,
        /// Headers of the response whose body was unreadable.
        headers: HeaderMap,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{0}")]
    Http(Box<HttpError>),

    /// A successful response body did not deserialize into the expected type.
    #[error("could not decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// The body that failed to decode, for diagnostics.
        body: String,
    },

    /// The round-trip guard found a discrepancy while decoding.
    #[error(transparent)]
    Lossless(#[from] LosslessError),
}

impl ApiError {
    /// Returns the enriched HTTP error, if this is a non-2xx failure.
    pub fn http(&self) -> Option<&HttpError> {
        match self {
            ApiError::Http(error) => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status code, when one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Http(error) => Some(error.status),
            ApiError::BodyRead { status, .. } => Some(*status),
            ApiError::Transport(error) => error.status(),
            _ => None,
        }
    }
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        ApiError::Http(Box::new(error))
    }
}

impl From<crate::config::ConfigError> for ApiError {
    fn from(error: crate::config::ConfigError) -> Self {
        ApiError::Config(error.to_string())
    }
}

/// Result alias used throughout the API layer.
pub type Result<T> = std::result::Result<T, ApiError>;
