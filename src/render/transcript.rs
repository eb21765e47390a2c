//! egui painting of the message log.
//!
//! Bot bubbles sit on the left, user bubbles on the right.  Only messages
//! flagged as rich text go through [`markdown::parse`]; everything else is a
//! literal label, so user text is never interpreted.

use eframe::egui;

use crate::render::markdown::{self, Block, BlockKind, ListMarker, Span};
use crate::session::{Message, Origin};

/// Shown in the transient bubble while the comparison is running.
pub const WORKING_LABEL: &str = "Đang rà soát lỗi...";

const BUBBLE_WIDTH_RATIO: f32 = 0.8;
const LIST_INDENT: f32 = 16.0;

fn bot_fill(ui: &egui::Ui) -> egui::Color32 {
    ui.visuals().faint_bg_color
}

fn user_fill() -> egui::Color32 {
    egui::Color32::from_rgb(37, 99, 235)
}

/// Frame shared by every bubble, coloured by sender.
fn bubble_frame(ui: &egui::Ui, origin: Origin) -> egui::Frame {
    let (fill, stroke) = match origin {
        Origin::Bot => (
            bot_fill(ui),
            egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        ),
        Origin::User => (user_fill(), egui::Stroke::NONE),
    };
    egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(14, 10))
}

/// Lay out one bubble on the sender's side and run `add_contents` in it.
fn bubble(ui: &mut egui::Ui, origin: Origin, add_contents: impl FnOnce(&mut egui::Ui)) {
    let layout = match origin {
        Origin::Bot => egui::Layout::left_to_right(egui::Align::TOP),
        Origin::User => egui::Layout::right_to_left(egui::Align::TOP),
    };
    let max_width = ui.available_width() * BUBBLE_WIDTH_RATIO;

    ui.with_layout(layout, |ui| {
        bubble_frame(ui, origin).show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.vertical(add_contents);
        });
    });
    ui.add_space(8.0);
}

fn caption(ui: &mut egui::Ui, origin: Origin) {
    let color = match origin {
        Origin::Bot => ui.visuals().weak_text_color(),
        Origin::User => egui::Color32::from_rgb(191, 219, 254),
    };
    ui.label(egui::RichText::new(origin.caption()).small().color(color));
}

/// Paint one transcript entry.  `blocks` must be the parsed body when the
/// message is rich text; it is ignored otherwise.
pub fn show_message(ui: &mut egui::Ui, message: &Message, blocks: Option<&[Block]>) {
    let origin = message.origin();
    bubble(ui, origin, |ui| {
        caption(ui, origin);
        match (message.is_rich_text(), blocks) {
            (true, Some(blocks)) => {
                show_blocks(ui, blocks);
                ui.add_space(4.0);
                if ui.small_button("Sao chép").clicked() {
                    ui.ctx().copy_text(message.body().to_string());
                }
            }
            _ => {
                let text = egui::RichText::new(message.body());
                let text = match origin {
                    Origin::Bot => text,
                    Origin::User => text.color(egui::Color32::WHITE),
                };
                ui.add(egui::Label::new(text).wrap());
            }
        }
    });
}

/// Transient bubble with a spinner, not part of the transcript.
pub fn show_working_indicator(ui: &mut egui::Ui) {
    bubble(ui, Origin::Bot, |ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(egui::RichText::new(WORKING_LABEL).color(ui.visuals().weak_text_color()));
        });
    });
}

// ---------------------------------------------------------------------------
// Rich text
// ---------------------------------------------------------------------------

fn span_text(span: &Span) -> egui::RichText {
    let mut text = egui::RichText::new(&span.text);
    if span.style.code {
        text = text.code();
    }
    if span.style.strong {
        text = text.strong();
    }
    if span.style.emphasis {
        text = text.italics();
    }
    text
}

fn layout_job(ui: &egui::Ui, prefix: Option<String>, spans: &[Span]) -> egui::text::LayoutJob {
    let mut job = egui::text::LayoutJob::default();
    let style = ui.style();
    if let Some(prefix) = prefix {
        egui::RichText::new(prefix).strong().append_to(
            &mut job,
            style,
            egui::FontSelection::Default,
            egui::Align::Center,
        );
    }
    for span in spans {
        span_text(span).append_to(
            &mut job,
            style,
            egui::FontSelection::Default,
            egui::Align::Center,
        );
    }
    job
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 20.0,
        2 => 18.0,
        3 => 16.0,
        _ => 14.0,
    }
}

/// Paint parsed rich-text blocks top to bottom.
pub fn show_blocks(ui: &mut egui::Ui, blocks: &[Block]) {
    for block in blocks {
        match &block.kind {
            BlockKind::Heading(level) => {
                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(block.plain_text())
                        .strong()
                        .size(heading_size(*level)),
                );
            }
            BlockKind::Paragraph => {
                let job = layout_job(ui, None, &block.spans);
                ui.add(egui::Label::new(job).wrap());
                ui.add_space(4.0);
            }
            BlockKind::ListItem { depth, marker } => {
                let prefix = match marker {
                    ListMarker::Bullet => "• ".to_string(),
                    ListMarker::Number(n) => format!("{n}. "),
                };
                let job = layout_job(ui, Some(prefix), &block.spans);
                ui.horizontal_top(|ui| {
                    ui.add_space(LIST_INDENT * (*depth as f32 + 1.0));
                    ui.add(egui::Label::new(job).wrap());
                });
            }
            BlockKind::CodeBlock => {
                egui::Frame::new()
                    .fill(ui.visuals().code_bg_color)
                    .corner_radius(egui::CornerRadius::same(4))
                    .inner_margin(egui::Margin::same(6))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(block.plain_text()).monospace());
                    });
            }
            BlockKind::Rule => {
                ui.separator();
            }
        }
    }
}

/// Parse the body of a rich-text message.
pub fn parse_rich(message: &Message) -> Option<Vec<Block>> {
    message
        .is_rich_text()
        .then(|| markdown::parse(message.body()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Conversation;

    #[test]
    fn only_rich_messages_are_parsed() {
        let mut c = Conversation::new();
        c.submit("**not markdown for users**");
        c.submit("draft");
        c.resolve(Ok("# Report".into()));

        let parsed: Vec<_> = c.messages().iter().map(parse_rich).collect();
        assert!(parsed[..parsed.len() - 1].iter().all(Option::is_none));
        let last = parsed.last().unwrap().as_ref().expect("report parsed");
        assert_eq!(last[0].kind, BlockKind::Heading(1));
    }

    #[test]
    fn heading_sizes_shrink() {
        assert!(heading_size(1) > heading_size(2));
        assert!(heading_size(2) > heading_size(3));
        assert_eq!(heading_size(6), heading_size(4));
    }
}
