//! Single dispatcher: URL lines → tasks on the bounded worker queue.

use std::sync::mpsc::{Sender, SyncSender};
use std::time::Duration;

use crate::fetch::Fetch;
use crate::request::UrlTask;

use super::event::{DropReason, PipelineEvent};
use super::RunContext;

/// Builds a task per non-blank line and blocks on the queue when workers are
/// saturated. Returns the number of tasks enqueued; dropping `task_tx` on
/// return closes the queue so workers exit once it is drained.
pub(super) fn dispatch<F, I>(
    ctx: &RunContext<F>,
    urls: I,
    task_tx: SyncSender<UrlTask>,
    event_tx: Sender<PipelineEvent>,
) -> usize
where
    F: Fetch,
    I: Iterator<Item = String>,
{
    let delay = ctx.options.dispatch_delay;
    let mut dispatched = 0usize;
    for line in urls {
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }
        let task = match ctx.builder.build(raw) {
            Ok(task) => task,
            Err(e) => {
                tracing::debug!(url = %raw, error = %e, "dropped: cannot build request");
                let _ = event_tx.send(PipelineEvent::Dropped {
                    url: raw.to_string(),
                    reason: DropReason::InvalidUrl,
                });
                continue;
            }
        };
        if dispatched > 0 && delay > Duration::ZERO {
            std::thread::sleep(delay);
        }
        if task_tx.send(task).is_err() {
            tracing::warn!("worker queue closed early; stopping dispatch");
            break;
        }
        dispatched += 1;
    }
    tracing::debug!(dispatched, "dispatch finished");
    dispatched
}
