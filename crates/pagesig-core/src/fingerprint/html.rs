//! HTML signature: external script references in document order.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static SCRIPT_SRC: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script[src]").expect("valid 'script[src]' selector"));
static SCRIPT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid 'script' selector"));

/// How an HTML document is reduced to its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlStrategy {
    /// `src` of every `<script src>`, query string and fragment stripped.
    #[default]
    Sources,
    /// `Sources`, followed by the inner-HTML byte length of every `<script>`.
    SourcesAndInlineLengths,
}

/// Drops the query string and fragment of a script reference.
pub fn strip_query(src: &str) -> &str {
    match src.find(|c| c == '?' || c == '#') {
        Some(i) => &src[..i],
        None => src,
    }
}

/// Builds the canonical signature of an HTML document. Parsing is lenient, so
/// this never fails; a page without scripts yields the empty signature.
pub fn html_signature(body: &str, strategy: HtmlStrategy) -> String {
    let document = Html::parse_document(body);
    let mut parts: Vec<String> = document
        .select(&SCRIPT_SRC)
        .filter_map(|el| el.value().attr("src"))
        .map(|src| strip_query(src.trim()).to_string())
        .collect();
    if strategy == HtmlStrategy::SourcesAndInlineLengths {
        parts.extend(
            document
                .select(&SCRIPT)
                .map(|el| el.inner_html().len().to_string()),
        );
    }
    parts.join("\n")
}
