//! Request building: raw URL line → immutable fetch task.

use thiserror::Error;
use url::Url;

use crate::config::PagesigConfig;
use crate::cookie_jar::CookieJar;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
}

/// A single GET to perform. Built once, consumed by exactly one worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTask {
    /// The input line as given (trimmed); this is what gets reported.
    pub raw: String,
    pub target: Url,
    /// Header lines in `Name: value` form, in send order.
    pub headers: Vec<(String, String)>,
}

impl UrlTask {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Turns URL strings into tasks carrying the fixed browser-like header set
/// plus any cookies the jar holds for the target.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    user_agent: String,
    accept_language: String,
    accept: String,
    cookies: CookieJar,
}

impl RequestBuilder {
    pub fn new(cfg: &PagesigConfig, cookies: CookieJar) -> Self {
        Self {
            user_agent: cfg.user_agent.clone(),
            accept_language: cfg.accept_language.clone(),
            accept: cfg.accept.clone(),
            cookies,
        }
    }

    pub fn build(&self, raw: &str) -> Result<UrlTask, BuildError> {
        let raw = raw.trim();
        let target = Url::parse(raw)?;
        if target.scheme() != "http" && target.scheme() != "https" {
            return Err(BuildError::UnsupportedScheme(target.scheme().to_string()));
        }
        let mut headers = vec![
            ("Connection".to_string(), "close".to_string()),
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Accept-Language".to_string(), self.accept_language.clone()),
            ("Accept".to_string(), self.accept.clone()),
        ];
        if let Some(cookie) = self.cookies.header_for(&target) {
            headers.push(("Cookie".to_string(), cookie));
        }
        Ok(UrlTask {
            raw: raw.to_string(),
            target,
            headers,
        })
    }
}
