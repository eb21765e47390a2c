//! SRT Content Auditor.
//!
//! A single-window chat assistant that collects an original script and a
//! draft subtitle transcript, sends both to a language-model backend, and
//! shows the returned discrepancy report.

pub mod app;
pub mod config;
pub mod input;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod session;
