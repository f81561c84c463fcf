use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::capture::pipeline::{CapturePipeline, CapturedImage};
use crate::format::registry::FormatSpec;
use crate::foundation::error::AdrasterError;
use crate::layout::content::CreativeContent;

/// Batch state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchPhase {
    /// Not started.
    Idle,
    /// Processing one format at a time.
    Running,
    /// Every format was attempted.
    Completed,
    /// Stopped at an item boundary on request.
    Cancelled,
}

/// Per-format status inside a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    /// Not reached yet.
    Pending,
    /// Currently rendering.
    InProgress,
    /// Exported.
    Done,
    /// Job failed; the batch moved on.
    Failed,
    /// Never started because the batch was cancelled.
    Skipped,
}

/// Ordered formats, a cursor and one status per format. Lives for one batch run.
#[derive(Clone, Debug)]
pub struct BatchExportState {
    formats: Vec<FormatSpec>,
    cursor: usize,
    statuses: Vec<ItemStatus>,
    phase: BatchPhase,
}

impl BatchExportState {
    /// Fresh state over `formats`, all pending.
    pub fn new(formats: Vec<FormatSpec>) -> Self {
        let statuses = vec![ItemStatus::Pending; formats.len()];
        Self {
            formats,
            cursor: 0,
            statuses,
            phase: BatchPhase::Idle,
        }
    }

    /// Formats in processing order.
    pub fn formats(&self) -> &[FormatSpec] {
        &self.formats
    }

    /// Index of the next item to process.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Status per format, in order.
    pub fn statuses(&self) -> &[ItemStatus] {
        &self.statuses
    }

    /// Current phase.
    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    fn set(&mut self, index: usize, status: ItemStatus) {
        if let Some(s) = self.statuses.get_mut(index) {
            *s = status;
        }
    }
}

/// Cooperative cancellation flag, checked between items. Clones share the flag.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. The item in flight still finishes.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// `true` once cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Progress notification, sent when an item starts and when it ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchProgress {
    /// Zero-based item index.
    pub index: usize,
    /// Item count.
    pub total: usize,
    /// Format id.
    pub format_id: String,
    /// Format label.
    pub label: String,
    /// Item status at the time of the notification.
    pub status: ItemStatus,
}

/// Result for one format.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Exported image.
    Succeeded(CapturedImage),
    /// Job error, recorded and not propagated.
    Failed(AdrasterError),
    /// Not attempted because of cancellation.
    Skipped,
}

impl ItemOutcome {
    /// Status this outcome maps to.
    pub fn status(&self) -> ItemStatus {
        match self {
            Self::Succeeded(_) => ItemStatus::Done,
            Self::Failed(_) => ItemStatus::Failed,
            Self::Skipped => ItemStatus::Skipped,
        }
    }
}

/// Outcome of one format, in batch order.
#[derive(Debug)]
pub struct BatchItem {
    /// Format id.
    pub format_id: String,
    /// Format label.
    pub label: String,
    /// What happened.
    pub outcome: ItemOutcome,
}

/// Summary of a finished batch.
#[derive(Debug)]
pub struct BatchReport {
    /// `Completed` or `Cancelled`.
    pub phase: BatchPhase,
    /// One entry per input format, in input order.
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    fn count(&self, status: ItemStatus) -> usize {
        self.items
            .iter()
            .filter(|i| i.outcome.status() == status)
            .count()
    }

    /// Exported count.
    pub fn succeeded(&self) -> usize {
        self.count(ItemStatus::Done)
    }

    /// Failed count.
    pub fn failed(&self) -> usize {
        self.count(ItemStatus::Failed)
    }

    /// Skipped count.
    pub fn skipped(&self) -> usize {
        self.count(ItemStatus::Skipped)
    }

    /// Exported images in batch order.
    pub fn images(&self) -> impl Iterator<Item = &CapturedImage> {
        self.items.iter().filter_map(|i| match &i.outcome {
            ItemOutcome::Succeeded(img) => Some(img),
            _ => None,
        })
    }

    /// `true` when every item was exported.
    pub fn is_clean(&self) -> bool {
        self.phase == BatchPhase::Completed && self.succeeded() == self.items.len()
    }
}

/// Export `formats` one at a time in the given order.
///
/// Never fails: job errors are recorded per item. `cancel` is checked before each item; once it
/// is set, the remaining items are marked skipped and no new job starts.
#[tracing::instrument(skip_all, fields(creative = %content.name, total = formats.len()))]
pub fn run_batch(
    pipeline: &mut CapturePipeline,
    content: &CreativeContent,
    formats: &[FormatSpec],
    mut progress: impl FnMut(&BatchProgress),
    cancel: &CancelToken,
) -> BatchReport {
    let mut state = BatchExportState::new(formats.to_vec());
    let total = state.formats.len();
    let mut items = Vec::with_capacity(total);
    state.phase = BatchPhase::Running;

    while state.cursor < total {
        let index = state.cursor;
        let format = &formats[index];
        let notify = |status| BatchProgress {
            index,
            total,
            format_id: format.id.clone(),
            label: format.label.clone(),
            status,
        };

        if cancel.is_cancelled() {
            state.phase = BatchPhase::Cancelled;
            break;
        }

        state.set(index, ItemStatus::InProgress);
        progress(&notify(ItemStatus::InProgress));

        let outcome = match pipeline.run_job(content, format) {
            Ok(img) => {
                tracing::info!(format = %format.id, file = %img.filename, "exported");
                ItemOutcome::Succeeded(img)
            }
            Err(e) => {
                tracing::warn!(format = %format.id, error = %e, "export failed, continuing");
                ItemOutcome::Failed(e)
            }
        };
        let status = outcome.status();
        state.set(index, status);
        state.cursor += 1;
        progress(&notify(status));
        items.push(BatchItem {
            format_id: format.id.clone(),
            label: format.label.clone(),
            outcome,
        });
    }

    for (index, format) in formats.iter().enumerate().skip(state.cursor) {
        state.set(index, ItemStatus::Skipped);
        items.push(BatchItem {
            format_id: format.id.clone(),
            label: format.label.clone(),
            outcome: ItemOutcome::Skipped,
        });
    }
    if state.phase == BatchPhase::Running {
        state.phase = BatchPhase::Completed;
    }

    let report = BatchReport {
        phase: state.phase,
        items,
    };
    tracing::info!(
        phase = ?report.phase,
        succeeded = report.succeeded(),
        failed = report.failed(),
        skipped = report.skipped(),
        "batch finished"
    );
    report
}

#[cfg(test)]
#[path = "../../tests/unit/batch/orchestrator.rs"]
mod tests;
