//! HTTP GET via libcurl.
//!
//! One `Easy` handle per request, configured for burst recon fetches: no
//! redirect following, no certificate verification, short timeouts and no
//! connection reuse. The handle (and its connection) is released when `fetch`
//! returns, on every path.

mod error;
mod parse;

pub use error::{classify_curl_error, FetchError, TransportKind};

use std::str;
use std::time::Duration;
use url::Url;

use crate::config::PagesigConfig;
use crate::request::UrlTask;

/// A completed HTTP exchange, whatever the status.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub source_url: Url,
    pub status_code: u32,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

/// Performs one task. Implementations are shared by all workers.
pub trait Fetch: Send + Sync {
    fn fetch(&self, task: &UrlTask) -> Result<FetchResult, FetchError>;
}

/// Options applied to every curl handle.
#[derive(Debug, Clone, Copy)]
pub struct CurlOptions {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub max_body_bytes: u64,
}

impl Default for CurlOptions {
    fn default() -> Self {
        Self::from(&PagesigConfig::default())
    }
}

impl From<&PagesigConfig> for CurlOptions {
    fn from(cfg: &PagesigConfig) -> Self {
        Self {
            timeout: Duration::from_secs(cfg.timeout_secs),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            max_body_bytes: cfg.max_body_bytes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CurlFetcher {
    opts: CurlOptions,
}

impl CurlFetcher {
    /// Initializes libcurl's global state; call before spawning workers.
    pub fn new(opts: CurlOptions) -> Self {
        curl::init();
        Self { opts }
    }
}

impl Fetch for CurlFetcher {
    fn fetch(&self, task: &UrlTask) -> Result<FetchResult, FetchError> {
        let mut header_lines: Vec<String> = Vec::new();
        let mut body: Vec<u8> = Vec::new();
        let mut too_large = false;
        let limit = self.opts.max_body_bytes;

        let mut easy = curl::easy::Easy::new();
        easy.url(task.target.as_str())?;
        easy.get(true)?;
        easy.follow_location(false)?;
        easy.ssl_verify_peer(false)?;
        easy.ssl_verify_host(false)?;
        easy.forbid_reuse(true)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        // Empty string = every encoding libcurl supports, decoded transparently.
        easy.accept_encoding("")?;

        let mut list = curl::easy::List::new();
        for (k, v) in &task.headers {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        easy.http_headers(list)?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    header_lines.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                if body.len() as u64 + data.len() as u64 > limit {
                    too_large = true;
                    // Short write makes curl abort with a write error.
                    return Ok(0);
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };
        if let Err(e) = performed {
            if too_large && e.is_write_error() {
                return Err(FetchError::BodyTooLarge { limit });
            }
            return Err(FetchError::Curl(e));
        }

        let status_code = easy.response_code()?;
        Ok(FetchResult {
            source_url: task.target.clone(),
            status_code,
            content_type: parse::content_type(&header_lines),
            body,
        })
    }
}
