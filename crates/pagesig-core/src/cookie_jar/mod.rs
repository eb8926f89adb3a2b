//! Pre-populated cookie jar keyed by URL.
//!
//! The cookie file is a JSON object mapping a URL to a cookie string:
//!
//! ```json
//! { "https://app.example.com/": "session=abc; theme=dark" }
//! ```
//!
//! Cookies are host-only and scoped to the default path of the URL they were
//! listed under. The jar is read-only once the run starts.

mod parse;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;
use url::Url;

use parse::{default_path, parse_cookie_string, path_matches};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone)]
struct ScopedCookies {
    host: String,
    path: String,
    cookies: Vec<Cookie>,
}

#[derive(Debug, Clone, Default)]
pub struct CookieJar {
    scopes: Vec<ScopedCookies>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a cookie file. Entries whose key is not a URL are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read cookie file: {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("parse cookie file: {}", path.display()))
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_str(data)?;
        let mut jar = Self::new();
        for (raw_url, cookie_string) in entries {
            match Url::parse(&raw_url) {
                Ok(url) => jar.set_cookies(&url, parse_cookie_string(&cookie_string)),
                Err(e) => tracing::debug!(url = %raw_url, "skipping cookie entry: {}", e),
            }
        }
        Ok(jar)
    }

    /// Stores cookies for `url`'s host and default path. A cookie with the same
    /// name in the same scope replaces the earlier one.
    pub fn set_cookies(&mut self, url: &Url, cookies: Vec<Cookie>) {
        let Some(host) = url.host_str() else {
            return;
        };
        let host = host.to_ascii_lowercase();
        let path = default_path(url.path());
        let idx = match self
            .scopes
            .iter()
            .position(|s| s.host == host && s.path == path)
        {
            Some(i) => i,
            None => {
                self.scopes.push(ScopedCookies {
                    host,
                    path,
                    cookies: Vec::new(),
                });
                self.scopes.len() - 1
            }
        };
        let scope = &mut self.scopes[idx];
        for cookie in cookies {
            match scope.cookies.iter_mut().find(|c| c.name == cookie.name) {
                Some(existing) => existing.value = cookie.value,
                None => scope.cookies.push(cookie),
            }
        }
    }

    /// `Cookie` header value for a request to `url`, longest path first.
    pub fn header_for(&self, url: &Url) -> Option<String> {
        let host = url.host_str()?.to_ascii_lowercase();
        let mut matching: Vec<&ScopedCookies> = self
            .scopes
            .iter()
            .filter(|s| s.host == host && path_matches(url.path(), &s.path))
            .collect();
        matching.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        let pairs: Vec<String> = matching
            .iter()
            .flat_map(|s| s.cookies.iter())
            .map(|c| format!("{}={}", c.name, c.value))
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.iter().all(|s| s.cookies.is_empty())
    }
}
