//
//  appveyor-client
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the CLI and the test suite:
//!
//! - **Media sniffing**: [`media_type`], [`is_png`], [`is_svg`] detect the
//!   content of badge and artifact downloads from their bytes, since those
//!   endpoints serve images rather than JSON.
//! - **Time formatting**: [`format_duration`] for displaying build and
//!   deployment durations.

use std::time::Duration;

/// PNG file signature.
const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Checks whether the bytes are a PNG image.
pub fn is_png(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_MAGIC)
}

/// Checks whether the bytes are an SVG document.
///
/// Tolerates a UTF-8 BOM, leading whitespace, an XML declaration, comments,
/// and a DOCTYPE before the root `<svg` element.
pub fn is_svg(bytes: &[u8]) -> bool {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return false;
    };
    let mut rest = text.trim_start_matches('\u{feff}').trim_start();
    loop {
        if let Some(tail) = rest.strip_prefix("<?") {
            match tail.find("?>") {
                Some(end) => rest = tail[end + 2..].trim_start(),
                None => return false,
            }
        } else if let Some(tail) = rest.strip_prefix("<!--") {
            match tail.find("-->") {
                Some(end) => rest = tail[end + 3..].trim_start(),
                None => return false,
            }
        } else if let Some(tail) = rest.strip_prefix("<!") {
            match tail.find('>') {
                Some(end) => rest = tail[end + 1..].trim_start(),
                None => return false,
            }
        } else {
            break;
        }
    }
    rest.starts_with("<svg")
}

/// Guesses the media type of downloaded bytes.
///
/// Only the types served by the badge and artifact endpoints are
/// recognized; anything else returns `None`.
pub fn media_type(bytes: &[u8]) -> Option<&'static str> {
    if is_png(bytes) {
        Some("image/png")
    } else if is_svg(bytes) {
        Some("image/svg+xml")
    } else {
        None
    }
}

/// Formats a duration into a human-readable compact string.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use appveyor_client::util::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
/// assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
