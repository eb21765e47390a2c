//! Comparison backend for the SRT auditor.
//!
//! This module provides:
//! * [`Comparator`] — async trait implemented by every comparison backend.
//! * [`ApiComparator`] — HTTP backend (Gemini or OpenAI-compatible).
//! * [`PromptBuilder`] — builds the instruction and the fenced user message.
//! * [`CompareError`] — error variants for a comparison attempt.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use srt_auditor::config::AppConfig;
//! use srt_auditor::llm::{ApiComparator, Comparator};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let comparator = ApiComparator::from_config(&config.llm);
//!
//!     match comparator.compare("Hello world", "Helo wrold").await {
//!         Ok(report) => println!("{report}"),
//!         Err(e) => eprintln!("comparison failed: {e}"),
//!     }
//! }
//! ```

pub mod comparator;
pub mod prompt;
pub mod wire;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use comparator::{ApiComparator, Comparator, CompareError, EMPTY_REPLY_PLACEHOLDER};
pub use prompt::{PromptBuilder, NO_ERRORS_REPLY, REPORT_HEADING};
