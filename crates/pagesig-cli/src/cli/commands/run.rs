//! `pagesig run` – fetch, fingerprint and report unique URLs.

use anyhow::{Context, Result};
use pagesig_core::config::PagesigConfig;
use pagesig_core::cookie_jar::CookieJar;
use pagesig_core::pipeline::RunContext;
use pagesig_core::report::write_export;
use pagesig_core::request::RequestBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::cli::RunArgs;

type UrlLines = Box<dyn Iterator<Item = String> + Send>;

pub fn run_pages(cfg: &PagesigConfig, args: &RunArgs) -> Result<()> {
    let jar = match &args.cookies {
        Some(path) => CookieJar::load(path)?,
        None => CookieJar::new(),
    };
    let builder = RequestBuilder::new(cfg, jar);
    let ctx = RunContext::from_config(cfg, builder)?;
    let urls = open_input(args.input.as_deref())?;

    let stdout = io::stdout();
    let report = ctx.run(urls, stdout.lock())?;

    if let Some(path) = &args.export {
        // Streamed output is already complete; a failed export does not fail the run.
        match write_export(path, &report.export) {
            Ok(()) => tracing::info!(path = %path.display(), urls = report.export.len(), "export written"),
            Err(e) => {
                tracing::error!("export failed: {:#}", e);
                eprintln!("pagesig: export failed: {:#}", e);
            }
        }
    }

    if args.stats {
        report.summary.write_to(io::stderr().lock())?;
    }
    Ok(())
}

/// URL lines from `input`, or from stdin when no file is given.
///
/// Lines are split on `\n` and decoded lossily: invalid UTF-8 becomes U+FFFD
/// and the line goes to the request builder like any other, so one junk line
/// never ends the input. Reading stops only on a real I/O error.
pub(crate) fn open_input(input: Option<&Path>) -> Result<UrlLines> {
    let lines: UrlLines = match input {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("open input {}", path.display()))?;
            Box::new(url_lines(BufReader::new(file)))
        }
        None => Box::new(url_lines(BufReader::new(io::stdin()))),
    };
    Ok(lines)
}

fn url_lines<R: BufRead>(reader: R) -> impl Iterator<Item = String> {
    reader.split(b'\n').map_while(|chunk| match chunk {
        Ok(bytes) => Some(decode_line(&bytes)),
        Err(e) => {
            tracing::warn!("stopped reading input: {}", e);
            None
        }
    })
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => {
            tracing::debug!(line = %s, "input line is not valid UTF-8");
            s
        }
    }
}
