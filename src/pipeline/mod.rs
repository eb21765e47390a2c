//! Pipeline orchestrator module for the SRT auditor.
//!
//! The egui thread owns the [`Conversation`](crate::session::Conversation);
//! this module owns the only suspending operation, the backend call.
//!
//! # Architecture
//!
//! ```text
//! AuditorApp (egui thread)            PipelineOrchestrator (tokio task)
//!   │  PipelineCommand::Compare ──mpsc──▶ │
//!   │                                      ├─ Comparator::compare
//!   │ ◀──mpsc── PipelineResult::ComparisonFinished
//!   └─ Conversation::resolve
//! ```

pub mod runner;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::{PipelineCommand, PipelineOrchestrator, PipelineResult};
