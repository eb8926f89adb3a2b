//! Content fingerprinting.
//!
//! A 200 response is classified by its `Content-Type` and reduced to a
//! canonical signature string: script references for HTML, top-level keys for
//! JSON. The fingerprint is the SHA-256 of the content label plus that
//! signature, so an HTML page and a JSON body never share one.

mod html;
mod json;

pub use html::{html_signature, strip_query, HtmlStrategy};
pub use json::json_signature;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

use crate::fetch::FetchResult;

/// Closed set of content categories the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentKind {
    #[serde(rename = "text/html")]
    Html,
    #[serde(rename = "application/json")]
    Json,
    #[serde(rename = "other")]
    Other,
}

impl ContentKind {
    /// Case-insensitive prefix match on the trimmed header value.
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(ct) = content_type else {
            return ContentKind::Other;
        };
        let ct = ct.trim().to_ascii_lowercase();
        if ct.starts_with("text/html") {
            ContentKind::Html
        } else if ct.starts_with("application/json") {
            ContentKind::Json
        } else {
            ContentKind::Other
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Html => "text/html",
            ContentKind::Json => "application/json",
            ContentKind::Other => "other",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Dedup key: lowercase hex digest of a canonical signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn new(kind: ContentKind, signature: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(kind.label().as_bytes());
        hasher.update([0u8]);
        hasher.update(signature.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a fetched response produced no fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("HTTP {0}")]
    Status(u32),
    #[error("unsupported content type: {}", .0.as_deref().unwrap_or("<none>"))]
    UnsupportedContent(Option<String>),
    #[error("body is not a JSON object")]
    Unparseable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub kind: ContentKind,
    pub signature: String,
    pub fingerprint: Fingerprint,
}

/// Fingerprints a body of known content type. Pure: same input, same output.
pub fn fingerprint_body(
    kind: ContentKind,
    body: &[u8],
    strategy: HtmlStrategy,
) -> Result<Extracted, ExtractError> {
    let signature = match kind {
        ContentKind::Html => html_signature(&String::from_utf8_lossy(body), strategy),
        ContentKind::Json => json_signature(body).ok_or(ExtractError::Unparseable)?,
        ContentKind::Other => return Err(ExtractError::UnsupportedContent(None)),
    };
    let fingerprint = Fingerprint::new(kind, &signature);
    Ok(Extracted {
        kind,
        signature,
        fingerprint,
    })
}

/// Fingerprints a fetch result. Only status 200 is considered.
pub fn extract(result: &FetchResult, strategy: HtmlStrategy) -> Result<Extracted, ExtractError> {
    if result.status_code != 200 {
        return Err(ExtractError::Status(result.status_code));
    }
    match ContentKind::classify(result.content_type.as_deref()) {
        ContentKind::Other => Err(ExtractError::UnsupportedContent(result.content_type.clone())),
        kind => fingerprint_body(kind, &result.body, strategy),
    }
}
