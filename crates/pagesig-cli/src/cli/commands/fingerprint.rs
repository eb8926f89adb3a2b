//! `pagesig fingerprint` – run the extractor on a saved body.

use anyhow::{Context, Result};
use pagesig_core::fingerprint::{fingerprint_body, ContentKind, Extracted, HtmlStrategy};
use std::io::{self, Write};
use std::path::Path;

pub fn run_fingerprint(
    path: &Path,
    content_type: Option<&str>,
    strategy: HtmlStrategy,
) -> Result<()> {
    let body = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let kind = match content_type {
        Some(ct) => ContentKind::classify(Some(ct)),
        None => guess_kind(path),
    };
    let extracted = fingerprint_body(kind, &body, strategy)
        .with_context(|| format!("fingerprint {} as {}", path.display(), kind))?;
    write_extracted(io::stdout().lock(), &extracted)?;
    Ok(())
}

/// `.json` files are JSON, everything else is treated as HTML.
pub(crate) fn guess_kind(path: &Path) -> ContentKind {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => ContentKind::Json,
        _ => ContentKind::Html,
    }
}

pub(crate) fn write_extracted<W: Write>(mut w: W, extracted: &Extracted) -> io::Result<()> {
    writeln!(w, "kind:        {}", extracted.kind)?;
    writeln!(w, "fingerprint: {}", extracted.fingerprint)?;
    if extracted.signature.is_empty() {
        writeln!(w, "signature:   (empty)")?;
    } else {
        writeln!(w, "signature:")?;
        for line in extracted.signature.lines() {
            writeln!(w, "  {}", line)?;
        }
    }
    Ok(())
}
