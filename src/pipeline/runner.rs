//! Pipeline orchestrator — runs comparisons off the UI thread.
//!
//! [`PipelineOrchestrator`] receives [`PipelineCommand`]s over a
//! `tokio::sync::mpsc` channel and answers each one with exactly one
//! [`PipelineResult::ComparisonFinished`].
//!
//! # Flow
//!
//! ```text
//! UI: Conversation::submit(draft) ─▶ ComparisonRequest
//!   └─▶ PipelineCommand::Compare ──▶ comparator.compare (async)
//!                                      └─▶ PipelineResult::ComparisonFinished
//! UI: poll result_rx each frame ─▶ Conversation::resolve
//! ```
//!
//! Commands are handled one at a time.  The UI only sends a command when the
//! conversation enters `Processing`, so there is never more than one in
//! flight.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::llm::{Comparator, CompareError};
use crate::session::ComparisonRequest;

// ---------------------------------------------------------------------------
// Channel messages
// ---------------------------------------------------------------------------

/// Commands sent from the UI thread to the orchestrator.
#[derive(Debug, Clone)]
pub enum PipelineCommand {
    /// Compare the two texts of a finished conversation step.
    Compare(ComparisonRequest),
}

/// Events delivered from the orchestrator back to the UI.
#[derive(Debug, Clone)]
pub enum PipelineResult {
    /// The single outcome of one `Compare` command.
    ComparisonFinished(Result<String, CompareError>),
}

// ---------------------------------------------------------------------------
// PipelineOrchestrator
// ---------------------------------------------------------------------------

/// Drives comparisons for one window.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use srt_auditor::config::AppConfig;
/// use srt_auditor::llm::{ApiComparator, Comparator};
/// use srt_auditor::pipeline::PipelineOrchestrator;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let comparator: Arc<dyn Comparator> = Arc::new(ApiComparator::from_config(&config.llm));
///
/// let (command_tx, command_rx) = tokio::sync::mpsc::channel(4);
/// let (result_tx, result_rx) = tokio::sync::mpsc::channel(4);
/// tokio::spawn(PipelineOrchestrator::new(comparator).run(command_rx, result_tx));
/// # drop((command_tx, result_rx));
/// # }
/// ```
pub struct PipelineOrchestrator {
    comparator: Arc<dyn Comparator>,
}

impl PipelineOrchestrator {
    pub fn new(comparator: Arc<dyn Comparator>) -> Self {
        Self { comparator }
    }

    /// Run until `command_rx` is closed or the UI stops listening.
    pub async fn run(
        self,
        mut command_rx: mpsc::Receiver<PipelineCommand>,
        result_tx: mpsc::Sender<PipelineResult>,
    ) {
        while let Some(command) = command_rx.recv().await {
            match command {
                PipelineCommand::Compare(request) => {
                    let outcome = self.compare(&request).await;
                    if result_tx
                        .send(PipelineResult::ComparisonFinished(outcome))
                        .await
                        .is_err()
                    {
                        log::info!("pipeline: result channel closed, orchestrator shutting down");
                        return;
                    }
                }
            }
        }

        log::info!("pipeline: command channel closed, orchestrator shutting down");
    }

    /// One comparison attempt, logged with its timing.
    pub async fn compare(&self, request: &ComparisonRequest) -> Result<String, CompareError> {
        log::info!(
            "pipeline: comparing original ({} chars) with draft ({} chars)",
            request.original.chars().count(),
            request.draft.chars().count()
        );
        let started = Instant::now();

        let outcome = self
            .comparator
            .compare(&request.original, &request.draft)
            .await;

        let elapsed = started.elapsed().as_secs_f32();
        match &outcome {
            Ok(report) => log::info!(
                "pipeline: comparison finished in {elapsed:.1}s ({} chars)",
                report.chars().count()
            ),
            Err(e) => log::warn!("pipeline: comparison failed after {elapsed:.1}s: {e}"),
        }
        outcome
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
