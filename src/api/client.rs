//
//  appveyor-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the AppVeyor API
//!
//! This module provides the core HTTP client for interacting with the
//! AppVeyor REST API. It handles authentication, request/response
//! serialization, and error-response enrichment.
//!
//! ## Features
//!
//! - Bearer-token authentication on every request
//! - JSON serialization/deserialization, plus text and binary downloads
//!   for logs, artifacts, and status badges
//! - Error enrichment: non-2xx responses are parsed into a structured
//!   error model when the body allows it, with the raw body preserved
//! - Optional lossless round-trip checking of every decoded response
//! - Request/response logging via `tracing`
//!
//! ## Error enrichment
//!
//! Every response passes through the same post-processing: a successful
//! status is handed to normal deserialization unchanged, while a failure
//! status has its body read as text and parsed as AppVeyor's error schema.
//! Parse success yields an [`HttpError`] carrying both the raw body and
//! the structured model; parse failure (e.g. the plain-text error bodies
//! served for extension-less paths) yields the same error without a model
//! and is not itself treated as fatal.

use std::time::Instant;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::error::{ApiError, ErrorModel, HttpError, Result};
use crate::api::roles::SystemRoleCache;
use crate::compare::decode_lossless;
use crate::config::Config;

/// The main HTTP client for the AppVeyor REST API.
///
/// All resource operations (roles, users, projects, builds, deployments,
/// and so on) are methods on this type, defined in their respective
/// modules under [`crate::api`].
///
/// # Creating a Client
///
/// ```rust,no_run
/// use appveyor_client::api::AppVeyorClient;
///
/// // Token and endpoint from $APPVEYOR_API_TOKEN / $APPVEYOR_API_URL
/// let client = AppVeyorClient::from_env()?;
///
/// // Or explicitly, e.g. against a mock server in tests
/// let client = AppVeyorClient::new("v2.tokentokentoken")?
///     .with_base_url("http://127.0.0.1:8080/api")
///     .with_lossless_check();
/// # Ok::<(), appveyor_client::ApiError>(())
/// ```
pub struct AppVeyorClient {
    /// The underlying HTTP client
    http: Client,
    /// API endpoint, without a trailing slash
    base_url: String,
    /// Bearer token applied to every request
    token: String,
    /// Whether decoded responses are round-trip checked
    lossless: bool,
    /// Memoized system-roles lookup, populated on first use
    pub(crate) system_roles: SystemRoleCache,
}

impl AppVeyorClient {
    /// Creates a client for the hosted AppVeyor service with the given token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client could not be built.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: Client::builder()
                .user_agent(format!("av/{}", crate::VERSION))
                .build()?,
            base_url: crate::config::DEFAULT_BASE_URL.to_string(),
            token: token.into(),
            lossless: false,
            system_roles: SystemRoleCache::default(),
        })
    }

    /// Creates a client from the process environment.
    ///
    /// Reads `APPVEYOR_API_TOKEN` (required) and `APPVEYOR_API_URL`
    /// (optional); a missing token is a fatal configuration error.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        Self::from_config(&config)
    }

    /// Creates a client from an explicit configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.token.clone())?.with_base_url(config.base_url.clone()))
    }

    /// Overrides the API endpoint. Trailing slashes are stripped so request
    /// paths can be appended verbatim.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Enables the lossless round-trip check on every decoded response.
    ///
    /// With the check enabled, each successful JSON response is decoded,
    /// re-serialized, and structurally compared against the original body;
    /// a model that silently drops a field fails the call with
    /// [`ApiError::Lossless`]. Intended for integration testing; the
    /// production default decodes directly.
    pub fn with_lossless_check(mut self) -> Self {
        self.lossless = true;
        self
    }

    /// Returns the API endpoint this client targets.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.http.request(method, url).bearer_auth(&self.token)
    }

    async fn send(&self, method: Method, path: &str, request: RequestBuilder) -> Result<Response> {
        let started = Instant::now();
        debug!(%method, path, "sending request");
        let response = request.send().await?;
        debug!(
            %method,
            path,
            status = %response.status(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "received response"
        );
        Ok(response)
    }

    /// Passes 2xx responses through unchanged; turns anything else into an
    /// enriched [`HttpError`].
    async fn check_status(&self, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => {
                return Err(ApiError::BodyRead {
                    status,
                    headers,
                    source,
                })
            }
        };

        let model = serde_json::from_str::<ErrorModel>(&body).ok();
        debug!(%status, structured = model.is_some(), "error response");
        Err(HttpError {
            status,
            headers,
            body,
            model,
        }
        .into())
    }

    async fn read_text(&self, response: Response) -> Result<String> {
        let status = response.status();
        let headers = response.headers().clone();
        response.text().await.map_err(|source| ApiError::BodyRead {
            status,
            headers,
            source,
        })
    }

    fn decode<T>(&self, body: &str) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        if self.lossless {
            Ok(decode_lossless(body)?)
        } else {
            serde_json::from_str(body).map_err(|source| ApiError::Decode {
                source,
                body: body.to_string(),
            })
        }
    }

    async fn handle_json<T>(&self, response: Response) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let response = self.check_status(response).await?;
        let body = self.read_text(response).await?;
        self.decode(&body)
    }

    pub(crate) async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
    {
        let request = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, request).await?;
        self.handle_json(response).await
    }

    pub(crate) async fn get_text(&self, path: &str) -> Result<String> {
        let request = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, request).await?;
        let response = self.check_status(response).await?;
        self.read_text(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let request = self.request(Method::GET, path);
        let response = self.send(Method::GET, path, request).await?;
        let response = self.check_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
        B: Serialize,
    {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, request).await?;
        self.handle_json(response).await
    }

    pub(crate) async fn post_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, request).await?;
        self.check_status(response).await?;
        Ok(())
    }

    pub(crate) async fn post_text<B: Serialize>(&self, path: &str, body: &B) -> Result<String> {
        let request = self.request(Method::POST, path).json(body);
        let response = self.send(Method::POST, path, request).await?;
        let response = self.check_status(response).await?;
        self.read_text(response).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned + Serialize,
        B: Serialize,
    {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.send(Method::PUT, path, request).await?;
        self.handle_json(response).await
    }

    pub(crate) async fn put_empty<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.send(Method::PUT, path, request).await?;
        self.check_status(response).await?;
        Ok(())
    }

    pub(crate) async fn put_text(&self, path: &str, body: impl Into<String>) -> Result<()> {
        let request = self
            .request(Method::PUT, path)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body.into());
        let response = self.send(Method::PUT, path, request).await?;
        self.check_status(response).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let request = self.request(Method::DELETE, path);
        let response = self.send(Method::DELETE, path, request).await?;
        self.check_status(response).await?;
        Ok(())
    }

    /// Encrypts a value for use in project settings and environment
    /// variables.
    ///
    /// The server returns the encrypted form as plain text; it can be
    /// stored wherever a secure variable value is accepted.
    pub async fn encrypt_value(&self, plain_value: &str) -> Result<String> {
        let body = EncryptRequest {
            plain_value: plain_value.to_string(),
        };
        self.post_text("/account/encrypt", &body).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EncryptRequest {
    plain_value: String,
}
