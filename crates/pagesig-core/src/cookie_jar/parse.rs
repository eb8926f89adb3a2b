//! Parse `name=value; name2=value2` cookie strings from the cookie file.

use super::Cookie;

/// Splits a cookie string on `;` into name/value pairs.
///
/// Segments without `=` or with an empty name are skipped. A value wrapped in
/// double quotes has the quotes removed.
pub(crate) fn parse_cookie_string(raw: &str) -> Vec<Cookie> {
    raw.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (name, value) = part.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(Cookie {
                name: name.to_string(),
                value: strip_quotes(value.trim()).to_string(),
            })
        })
        .collect()
}

fn strip_quotes(value: &str) -> &str {
    if value.len() > 1 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// RFC 6265 default-path: the directory of the request path.
pub(crate) fn default_path(path: &str) -> String {
    if !path.starts_with('/') {
        return "/".to_string();
    }
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => path[..i].to_string(),
    }
}

/// RFC 6265 path-match.
pub(crate) fn path_matches(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    request_path.starts_with(cookie_path)
        && (cookie_path.ends_with('/')
            || request_path.as_bytes().get(cookie_path.len()) == Some(&b'/'))
}
