//! SRT auditor chat window — egui/eframe application.
//!
//! # Architecture
//!
//! [`AuditorApp`] is the top-level [`eframe::App`].  It owns the
//! [`Conversation`] outright and two channel endpoints:
//!
//! * `command_tx` — sends [`PipelineCommand`] to the pipeline orchestrator.
//! * `result_rx`  — receives [`PipelineResult`] from the orchestrator.
//!
//! # Layout
//!
//! | Panel  | Contents |
//! |--------|----------|
//! | top    | title, model name, `Làm mới` once the conversation is over |
//! | bottom | file button, text box, send button, last file error |
//! | centre | transcript, spinner bubble while `Processing` |

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::{AppConfig, UiConfig};
use crate::input::{InputCollector, InputError, ACCEPTED_EXTENSIONS};
use crate::llm::CompareError;
use crate::pipeline::{PipelineCommand, PipelineResult};
use crate::render::{self, Block};
use crate::session::{ComparisonRequest, Conversation};

const TITLE: &str = "SRT Content Auditor";
const COMPOSER_ID: &str = "composer_text";

/// Scale egui's text styles from the configured body size.
pub fn apply_text_sizes(ctx: &egui::Context, ui: &UiConfig) {
    let body = ui.font_size.clamp(8.0, 40.0);
    ctx.style_mut(|style| {
        for (text_style, font) in style.text_styles.iter_mut() {
            font.size = match text_style {
                egui::TextStyle::Heading => body * 1.4,
                egui::TextStyle::Small => body * 0.75,
                _ => body,
            };
        }
    });
}

/// eframe application — one window, one conversation.
pub struct AuditorApp {
    // ── Session ──────────────────────────────────────────────────────────
    conversation: Conversation,
    input: InputCollector,
    /// Parsed rich-text bodies keyed by message id.
    rich_cache: HashMap<String, Vec<Block>>,
    /// Last file error, shown under the text box until the next submission.
    notice: Option<String>,

    // ── Channels ─────────────────────────────────────────────────────────
    command_tx: mpsc::Sender<PipelineCommand>,
    result_rx: mpsc::Receiver<PipelineResult>,

    // ── Configuration ────────────────────────────────────────────────────
    config: AppConfig,
}

impl AuditorApp {
    /// Create a new [`AuditorApp`] with a fresh conversation.
    pub fn new(
        command_tx: mpsc::Sender<PipelineCommand>,
        result_rx: mpsc::Receiver<PipelineResult>,
        config: AppConfig,
    ) -> Self {
        Self {
            conversation: Conversation::with_preview_chars(config.ui.preview_chars),
            input: InputCollector::new(),
            rich_cache: HashMap::new(),
            notice: None,
            command_tx,
            result_rx,
            config,
        }
    }

    // ── Channel polling ──────────────────────────────────────────────────

    /// Drain all pending pipeline results (non-blocking).
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                PipelineResult::ComparisonFinished(outcome) => {
                    self.conversation.resolve(outcome);
                }
            }
        }
    }

    /// Hand a comparison to the orchestrator.  If it cannot be queued the
    /// conversation fails right away instead of waiting forever.
    fn dispatch(&mut self, request: Option<ComparisonRequest>) {
        let Some(request) = request else {
            return;
        };
        if let Err(e) = self.command_tx.try_send(PipelineCommand::Compare(request)) {
            log::error!("app: pipeline unavailable: {e}");
            self.conversation
                .resolve(Err(CompareError::Request("pipeline unavailable".into())));
        }
    }

    // ── Input ────────────────────────────────────────────────────────────

    fn send_typed(&mut self) {
        let request = self.input.submit_typed(&mut self.conversation);
        self.notice = None;
        self.dispatch(request);
    }

    fn load_file(&mut self, path: &Path) {
        let outcome = self.input.submit_file(&mut self.conversation, path);
        self.accept_file(outcome);
    }

    /// Dispatch a loaded file, or show why it was refused.
    fn accept_file(&mut self, outcome: Result<Option<ComparisonRequest>, InputError>) {
        match outcome {
            Ok(request) => {
                self.notice = None;
                self.dispatch(request);
            }
            Err(e) => {
                log::warn!("app: {e}");
                self.notice = Some(e.to_string());
            }
        }
    }

    fn pick_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Content / SRT", &ACCEPTED_EXTENSIONS)
            .pick_file()
        {
            self.load_file(&path);
        }
    }

    /// Accept files dropped onto the window while input is enabled.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            self.accept_dropped(&file);
        }
    }

    fn accept_dropped(&mut self, file: &egui::DroppedFile) {
        if let Some(path) = &file.path {
            self.load_file(path);
        } else if let Some(bytes) = &file.bytes {
            let outcome = self
                .input
                .submit_bytes(&mut self.conversation, &file.name, bytes);
            self.accept_file(outcome);
        }
    }

    fn reset(&mut self) {
        if self.conversation.reset() {
            log::info!("app: conversation reset");
            self.rich_cache.clear();
            self.notice = None;
        }
    }

    /// Parse any rich-text message not seen yet.
    fn refresh_rich_cache(&mut self) {
        for message in self.conversation.messages() {
            if !self.rich_cache.contains_key(message.id()) {
                if let Some(blocks) = render::parse_rich(message) {
                    self.rich_cache.insert(message.id().to_string(), blocks);
                }
            }
        }
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.heading(TITLE);
                ui.label(
                    egui::RichText::new(format!("Powered by {}", self.config.llm.model))
                        .small()
                        .color(ui.visuals().weak_text_color()),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if self.conversation.state().can_reset() && ui.button("Làm mới").clicked() {
                    self.reset();
                }
            });
        });
    }

    fn draw_composer(&mut self, ui: &mut egui::Ui) {
        let state = self.conversation.state();
        let enabled = state.accepts_input();
        let composer_id = egui::Id::new(COMPOSER_ID);

        // Enter sends, Shift+Enter falls through to the text box as a newline.
        let enter_sends = enabled
            && ui.memory(|m| m.has_focus(composer_id))
            && !ui.input(|i| i.modifiers.shift)
            && ui.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Enter));

        ui.horizontal(|ui| {
            if ui
                .add_enabled(enabled, egui::Button::new("Tải file"))
                .on_hover_text("Tải file lên (.txt, .srt)")
                .clicked()
            {
                self.pick_file();
            }

            let can_send = self.input.can_send(&self.conversation);
            let send_width = 56.0;
            let text_width = (ui.available_width() - send_width).max(120.0);

            ui.add_enabled(
                enabled,
                egui::TextEdit::multiline(self.input.buffer_mut())
                    .id(composer_id)
                    .hint_text(state.input_placeholder())
                    .desired_rows(2)
                    .desired_width(text_width),
            );

            if ui
                .add_enabled(can_send, egui::Button::new("Gửi"))
                .clicked()
                || enter_sends
            {
                self.send_typed();
            }
        });

        if let Some(notice) = &self.notice {
            ui.label(
                egui::RichText::new(notice.as_str())
                    .color(egui::Color32::from_rgb(255, 136, 68))
                    .small(),
            );
        }
    }

    fn draw_transcript(&mut self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for message in self.conversation.messages() {
                    let blocks = self.rich_cache.get(message.id()).map(Vec::as_slice);
                    render::show_message(ui, message, blocks);
                }
                if self.conversation.state().is_busy() {
                    render::show_working_indicator(ui);
                }
            });
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for AuditorApp {
    /// Called every frame by eframe.  Polls the result channel, takes dropped
    /// files, then renders the window.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.handle_dropped_files(ctx);
        self.refresh_rich_cache();

        // Keep polling while a comparison is in flight.
        if self.conversation.state().is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            self.draw_header(ui);
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("composer").show(ctx, |ui| {
            ui.add_space(6.0);
            self.draw_composer(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_transcript(ui);
        });
    }
}
