//! Transcript rendering: rich-text parsing and egui painting.

pub mod markdown;
pub mod transcript;

pub use markdown::{parse, Block, BlockKind, ListMarker, Span, Style};
pub use transcript::{parse_rich, show_blocks, show_message, show_working_indicator, WORKING_LABEL};
