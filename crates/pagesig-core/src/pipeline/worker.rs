//! Fetch workers: take a task, fetch, fingerprint, claim, report.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Mutex, PoisonError};

use crate::fetch::Fetch;
use crate::fingerprint::extract;
use crate::request::UrlTask;

use super::event::{DropReason, PipelineEvent};
use super::RunContext;

/// Pulls tasks until the queue is closed and empty.
pub(super) fn run_worker<F: Fetch>(
    id: usize,
    ctx: &RunContext<F>,
    tasks: &Mutex<Receiver<UrlTask>>,
    events: Sender<PipelineEvent>,
) {
    let mut handled = 0usize;
    loop {
        let next = tasks.lock().unwrap_or_else(PoisonError::into_inner).recv();
        let Ok(task) = next else {
            break;
        };
        handled += 1;
        if events.send(process(ctx, task)).is_err() {
            break;
        }
    }
    tracing::trace!(worker = id, handled, "worker exiting");
}

/// Runs one task to its terminal event. The fetch result (and its body) is
/// dropped before returning.
pub(super) fn process<F: Fetch>(ctx: &RunContext<F>, task: UrlTask) -> PipelineEvent {
    let url = task.raw.clone();
    let result = match ctx.fetcher.fetch(&task) {
        Ok(r) => r,
        Err(e) => {
            let kind = e.transport_kind();
            tracing::debug!(url = %url, error = %e, ?kind, "dropped: transport error");
            return PipelineEvent::Dropped {
                url,
                reason: DropReason::Transport(kind),
            };
        }
    };

    let extracted = match extract(&result, ctx.options.html_strategy) {
        Ok(x) => x,
        Err(e) => {
            tracing::debug!(url = %url, error = %e, "dropped: no fingerprint");
            return PipelineEvent::Dropped {
                url,
                reason: DropReason::from(&e),
            };
        }
    };

    if ctx.registry.try_claim(&extracted.fingerprint) {
        tracing::debug!(url = %url, fingerprint = %extracted.fingerprint, kind = %extracted.kind, "claimed");
        PipelineEvent::Claimed {
            url,
            kind: extracted.kind,
        }
    } else {
        tracing::trace!(url = %url, fingerprint = %extracted.fingerprint, "dropped: duplicate");
        PipelineEvent::Dropped {
            url,
            reason: DropReason::Duplicate,
        }
    }
}
