//! Reporter: streams winning URLs and collects the export map.
//!
//! Runs on the thread that called `RunContext::run`, so the export map has a
//! single owner and needs no lock.

mod summary;

pub use summary::RunSummary;

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use crate::fingerprint::ContentKind;
use crate::pipeline::PipelineEvent;

/// `url → content kind` for every reported URL.
pub type ExportMap = BTreeMap<String, ContentKind>;

/// Outcome of a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub summary: RunSummary,
    pub export: ExportMap,
}

pub struct Reporter<W: Write> {
    out: W,
    report: RunReport,
    write_error: Option<io::Error>,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            report: RunReport::default(),
            write_error: None,
        }
    }

    /// Claimed URLs are written and flushed immediately. After the first
    /// write failure output stops, but counting continues so the run drains.
    pub fn handle(&mut self, event: PipelineEvent) {
        match event {
            PipelineEvent::Claimed { url, kind } => {
                if self.write_error.is_none() {
                    if let Err(e) = writeln!(self.out, "{}", url).and_then(|_| self.out.flush()) {
                        tracing::warn!("output write failed, suppressing further output: {}", e);
                        self.write_error = Some(e);
                    }
                }
                self.report.summary.record_claim();
                self.report.export.insert(url, kind);
            }
            PipelineEvent::Dropped { reason, .. } => self.report.summary.record_drop(reason),
        }
    }

    pub fn finish(self) -> Result<RunReport> {
        if let Some(e) = self.write_error {
            return Err(anyhow::Error::new(e).context("write unique URLs to output"));
        }
        Ok(self.report)
    }
}

/// Writes the export map as a pretty JSON object.
pub fn write_export(path: &Path, export: &ExportMap) -> Result<()> {
    let json = serde_json::to_string_pretty(export).context("serialize export map")?;
    std::fs::write(path, json).with_context(|| format!("write export file: {}", path.display()))
}
