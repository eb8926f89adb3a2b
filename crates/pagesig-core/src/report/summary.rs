//! Per-run counters of claims and drop reasons.

use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::fetch::TransportKind;
use crate::pipeline::DropReason;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub claimed: usize,
    pub duplicates: usize,
    pub invalid_urls: usize,
    pub transport_errors: BTreeMap<TransportKind, usize>,
    pub bad_status: usize,
    pub unsupported_content: usize,
    pub unparseable: usize,
}

impl RunSummary {
    pub fn record_claim(&mut self) {
        self.claimed += 1;
    }

    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::InvalidUrl => self.invalid_urls += 1,
            DropReason::Transport(kind) => *self.transport_errors.entry(kind).or_insert(0) += 1,
            DropReason::Status(_) => self.bad_status += 1,
            DropReason::UnsupportedContent => self.unsupported_content += 1,
            DropReason::Unparseable => self.unparseable += 1,
            DropReason::Duplicate => self.duplicates += 1,
        }
    }

    pub fn transport_total(&self) -> usize {
        self.transport_errors.values().sum()
    }

    /// Every input line that reached the pipeline, claimed or dropped.
    pub fn total(&self) -> usize {
        self.claimed
            + self.duplicates
            + self.invalid_urls
            + self.transport_total()
            + self.bad_status
            + self.unsupported_content
            + self.unparseable
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "=== pagesig summary ===")?;
        writeln!(w, "URLs processed:        {}", self.total())?;
        writeln!(w, "Unique (reported):     {}", self.claimed)?;
        writeln!(w, "Duplicates:            {}", self.duplicates)?;
        writeln!(w, "Invalid URLs:          {}", self.invalid_urls)?;
        writeln!(w, "Transport errors:      {}", self.transport_total())?;
        for (kind, n) in &self.transport_errors {
            writeln!(w, "  {:<20} {}", format!("{:?}", kind), n)?;
        }
        writeln!(w, "Non-200 responses:     {}", self.bad_status)?;
        writeln!(w, "Unsupported content:   {}", self.unsupported_content)?;
        writeln!(w, "Unparseable bodies:    {}", self.unparseable)?;
        Ok(())
    }
}
