//! Fetch-and-deduplicate pipeline.
//!
//! One dispatcher thread turns URL lines into tasks and feeds a bounded queue;
//! `threads` workers fetch, fingerprint and claim; the calling thread runs the
//! reporter over the fan-in event channel. The run ends once the input is
//! exhausted and every dispatched task has produced its event.

mod dispatch;
mod event;
mod worker;

pub use event::{DropReason, PipelineEvent};

use anyhow::Result;
use std::io::Write;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use crate::config::PagesigConfig;
use crate::fetch::{CurlFetcher, CurlOptions, Fetch};
use crate::fingerprint::HtmlStrategy;
use crate::registry::DedupRegistry;
use crate::report::{Reporter, RunReport};
use crate::request::RequestBuilder;

/// Scheduling and fingerprinting knobs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub threads: usize,
    pub queue_depth: usize,
    pub dispatch_delay: Duration,
    pub html_strategy: HtmlStrategy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&PagesigConfig::default())
    }
}

impl From<&PagesigConfig> for PipelineOptions {
    fn from(cfg: &PagesigConfig) -> Self {
        Self {
            threads: cfg.threads.max(1),
            queue_depth: cfg.effective_queue_depth(),
            dispatch_delay: Duration::from_millis(cfg.dispatch_delay_ms),
            html_strategy: cfg.html_strategy,
        }
    }
}

/// Everything one run shares: request builder, fetcher and the registry.
/// A context is good for a single run; the registry is never reset.
pub struct RunContext<F: Fetch = CurlFetcher> {
    builder: RequestBuilder,
    fetcher: F,
    registry: DedupRegistry,
    options: PipelineOptions,
}

impl RunContext<CurlFetcher> {
    /// Context backed by libcurl, configured from `cfg`.
    pub fn from_config(cfg: &PagesigConfig, builder: RequestBuilder) -> Result<Self> {
        cfg.validate()?;
        let fetcher = CurlFetcher::new(CurlOptions::from(cfg));
        Ok(Self::new(builder, fetcher, PipelineOptions::from(cfg)))
    }
}

impl<F: Fetch> RunContext<F> {
    pub fn new(builder: RequestBuilder, fetcher: F, options: PipelineOptions) -> Self {
        Self {
            builder,
            fetcher,
            registry: DedupRegistry::new(),
            options,
        }
    }

    pub fn registry(&self) -> &DedupRegistry {
        &self.registry
    }

    /// Processes every URL in `urls`, writing each unique one to `out` as
    /// soon as it wins its claim.
    pub fn run<I, W>(&self, urls: I, out: W) -> Result<RunReport>
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: Send,
        W: Write,
    {
        let threads = self.options.threads.max(1);
        let (task_tx, task_rx) = mpsc::sync_channel(self.options.queue_depth.max(1));
        let task_rx = Mutex::new(task_rx);
        let (event_tx, event_rx) = mpsc::channel::<PipelineEvent>();
        let mut reporter = Reporter::new(out);

        tracing::info!(
            threads,
            queue_depth = self.options.queue_depth,
            strategy = ?self.options.html_strategy,
            "pipeline starting"
        );

        std::thread::scope(|s| {
            for id in 0..threads {
                let tasks = &task_rx;
                let events = event_tx.clone();
                s.spawn(move || worker::run_worker(id, self, tasks, events));
            }
            let urls = urls.into_iter();
            // The dispatcher takes the last sender; the channel closes when it
            // and every worker are done.
            s.spawn(move || dispatch::dispatch(self, urls, task_tx, event_tx));

            for event in event_rx {
                reporter.handle(event);
            }
        });

        let report = reporter.finish()?;
        tracing::info!(
            processed = report.summary.total(),
            unique = report.summary.claimed,
            "pipeline finished"
        );
        Ok(report)
    }
}
