//! Configuration module for the SRT auditor.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the comparison
//! backend and the window, `AppPaths` for the platform config directory, and
//! TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, LlmConfig, LlmProvider, UiConfig};
