//! Application entry point — SRT Content Auditor.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (defaults are written out on first run).
//! 3. Create [`tokio`] runtime.
//! 4. Build the comparison backend ([`ApiComparator`]) from config.
//! 5. Create pipeline channels (`command`, `result`).
//! 6. Spawn the pipeline orchestrator on the tokio runtime.
//! 7. Run [`eframe::run_native`] — blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use tokio::sync::mpsc;

use srt_auditor::{
    app::{apply_text_sizes, AuditorApp},
    config::{AppConfig, AppPaths},
    llm::{ApiComparator, Comparator},
    pipeline::{PipelineCommand, PipelineOrchestrator, PipelineResult},
};

const WINDOW_TITLE: &str = "SRT Content Auditor";

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size([width, height])
        .with_min_inner_size([420.0, 360.0])
        .with_drag_and_drop(true);

    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("SRT Content Auditor starting up");

    // 2. Configuration
    let settings_file = AppPaths::new().settings_file;
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });
    // First run: leave an editable settings file behind.
    if !settings_file.exists() {
        match config.save() {
            Ok(()) => log::info!("Wrote default settings to {}", settings_file.display()),
            Err(e) => log::warn!("Could not write {}: {e}", settings_file.display()),
        }
    }
    log::info!(
        "Backend: {:?} at {} (model {})",
        config.llm.provider,
        config.llm.base_url,
        config.llm.model
    );

    // 3. Tokio runtime (one comparison at a time, a single worker is plenty)
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("Failed to create tokio runtime: {e}");
            return Err(eframe::Error::AppCreation(Box::new(e)));
        }
    };

    // 4. Comparison backend
    let comparator: Arc<dyn Comparator> = Arc::new(ApiComparator::from_config(&config.llm));

    // 5. Channel setup
    let (command_tx, command_rx) = mpsc::channel::<PipelineCommand>(4);
    let (result_tx, result_rx) = mpsc::channel::<PipelineResult>(4);

    // 6. Pipeline orchestrator
    rt.spawn(PipelineOrchestrator::new(comparator).run(command_rx, result_tx));

    // 7. Build the egui app and run it (blocks until the window is closed)
    let options = native_options(&config);
    let ui_config = config.ui.clone();
    let app = AuditorApp::new(command_tx, result_rx, config);
    let outcome = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            apply_text_sizes(&cc.egui_ctx, &ui_config);
            Ok(Box::new(app))
        }),
    );

    log::info!("SRT Content Auditor shutting down");
    rt.shutdown_background();
    outcome
}
