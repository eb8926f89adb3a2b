//! Parse collected response header lines.

/// Returns the `Content-Type` of the final header block.
///
/// A new status line (`HTTP/...`) starts a new block, so interim responses
/// such as `100 Continue` do not leak their headers into the result.
pub(crate) fn content_type(lines: &[String]) -> Option<String> {
    let mut content_type = None;
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with("HTTP/") {
            content_type = None;
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-type") {
                content_type = Some(value.trim().to_string());
            }
        }
    }
    content_type
}
