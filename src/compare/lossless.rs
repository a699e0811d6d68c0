//
//  appveyor-client
//  compare/lossless.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Lossless Round-Trip Guard
//!
//! Wraps deserialization of a raw JSON body into a typed model with a
//! check that re-serializing the model reproduces the original payload
//! structurally. A typed model that silently drops or mistranslates a
//! field fails the decode loudly instead of passing corrupted data along.
//!
//! The guard is opt-in: the integration suite enables it on every request
//! via [`crate::AppVeyorClient::with_lossless_check`], while production use
//! decodes directly.
//!
//! Because unset optional fields serialize as explicit nulls, a payload
//! must carry the same explicit nulls for a strict round-trip to hold;
//! date-time fields are compared with the one-millisecond tolerance of the
//! parent module, so formatting differences between the server and the
//! local serializer do not trip the guard.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::{compare_strict, parse_tree, ComparisonFailure, MalformedJson};

/// Failure of the round-trip guarded decode.
#[derive(Debug, Error)]
pub enum LosslessError {
    /// The raw body was not valid JSON text.
    #[error(transparent)]
    Malformed(#[from] MalformedJson),

    /// The body parsed as JSON but did not deserialize into the model.
    #[error("deserialization failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The model could not be serialized back to a JSON tree.
    #[error("re-serialization failed: {0}")]
    Reserialize(#[source] serde_json::Error),

    /// The re-serialized model differs structurally from the raw body.
    #[error("deserialization was not lossless: {0}")]
    NotLossless(#[from] ComparisonFailure),
}

/// Decodes `raw` into `T`, asserting the decode is lossless.
///
/// The raw body is parsed to a generic tree, deserialized into `T`,
/// serialized back to a tree, and the two trees are compared strictly.
/// Any discrepancy indicates the typed model dropped a field the server
/// sent (or translated one irreversibly) and fails the decode.
///
/// # Example
///
/// ```rust
/// use appveyor_client::compare::decode_lossless;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Pong {
///     status: String,
/// }
///
/// let pong: Pong = decode_lossless(r#"{"status":"ok"}"#).unwrap();
/// assert_eq!(pong.status, "ok");
///
/// // A field the model does not know about fails the decode.
/// assert!(decode_lossless::<Pong>(r#"{"status":"ok","extra":1}"#).is_err());
/// ```
pub fn decode_lossless<T>(raw: &str) -> Result<T, LosslessError>
where
    T: DeserializeOwned + Serialize,
{
    let original = parse_tree(raw)?;
    let typed: T = serde_json::from_value(original.clone()).map_err(LosslessError::Decode)?;
    let round_trip = serde_json::to_value(&typed).map_err(LosslessError::Reserialize)?;
    compare_strict(&original, &round_trip)?;
    Ok(typed)
}
