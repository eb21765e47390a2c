//! Rich-text parsing for the comparison report.
//!
//! [`parse`] turns markdown into a flat list of [`Block`]s made of styled
//! [`Span`]s.  Painting is left to [`super::transcript`]; nothing here
//! depends on egui.
//!
//! Soft line breaks are kept as `\n` so that the report's line-oriented
//! layout (position, timestamp, two quoted lines) survives.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet,
    Number(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Heading level 1–6.
    Heading(u8),
    Paragraph,
    ListItem { depth: usize, marker: ListMarker },
    CodeBlock,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub spans: Vec<Span>,
}

impl Block {
    fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            spans: Vec::new(),
        }
    }

    /// Block text without styling.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Append text, merging into the previous span when the style matches.
    fn push(&mut self, text: &str, style: Style) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[derive(Default)]
struct BlockBuilder {
    blocks: Vec<Block>,
    current: Option<Block>,
    /// One entry per open list; `Some(n)` is the next number of an ordered list.
    lists: Vec<Option<u64>>,
    strong: usize,
    emphasis: usize,
    in_code_block: bool,
}

impl BlockBuilder {
    fn style(&self) -> Style {
        Style {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code: self.in_code_block,
        }
    }

    fn begin(&mut self, kind: BlockKind) {
        self.flush();
        self.current = Some(Block::new(kind));
    }

    fn flush(&mut self) {
        let Some(mut block) = self.current.take() else {
            return;
        };
        if block.kind == BlockKind::CodeBlock {
            if let Some(last) = block.spans.last_mut() {
                let trimmed = last.text.trim_end_matches('\n').len();
                last.text.truncate(trimmed);
            }
        }
        if !block.spans.is_empty() {
            self.blocks.push(block);
        }
    }

    fn text(&mut self, text: &str, style: Style) {
        let block = self
            .current
            .get_or_insert_with(|| Block::new(BlockKind::Paragraph));
        block.push(text, style);
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => self.begin(BlockKind::Heading(heading_number(level))),
            Tag::Paragraph => {
                // Loose list items wrap their text in a paragraph; keep it in
                // the item block until the item has content of its own.
                let fresh_item = matches!(
                    &self.current,
                    Some(b) if matches!(b.kind, BlockKind::ListItem { .. }) && b.spans.is_empty()
                );
                if !fresh_item {
                    self.begin(BlockKind::Paragraph);
                }
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = ListMarker::Number(*n);
                        *n += 1;
                        marker
                    }
                    _ => ListMarker::Bullet,
                };
                self.begin(BlockKind::ListItem { depth, marker });
            }
            Tag::CodeBlock(_) => {
                self.begin(BlockKind::CodeBlock);
                self.in_code_block = true;
            }
            Tag::Strong => self.strong += 1,
            Tag::Emphasis => self.emphasis += 1,
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Heading(_) | TagEnd::Paragraph | TagEnd::Item => self.flush(),
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
            }
            TagEnd::Strong => self.strong = self.strong.saturating_sub(1),
            TagEnd::Emphasis => self.emphasis = self.emphasis.saturating_sub(1),
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush();
        self.blocks
    }
}

/// Parse markdown into display blocks.
///
/// ```
/// use srt_auditor::render::markdown::{parse, BlockKind};
///
/// let blocks = parse("# Report\n\nAll **good**");
/// assert_eq!(blocks[0].kind, BlockKind::Heading(1));
/// assert_eq!(blocks[1].plain_text(), "All good");
/// ```
pub fn parse(text: &str) -> Vec<Block> {
    let mut builder = BlockBuilder::default();

    for event in Parser::new(text) {
        match event {
            Event::Start(tag) => builder.start(tag),
            Event::End(tag) => builder.end(tag),
            Event::Text(t) => {
                let style = builder.style();
                builder.text(&t, style);
            }
            Event::Code(t) => {
                let style = Style {
                    code: true,
                    ..builder.style()
                };
                builder.text(&t, style);
            }
            Event::Html(t) | Event::InlineHtml(t) => {
                let style = builder.style();
                builder.text(&t, style);
            }
            Event::SoftBreak | Event::HardBreak => {
                let style = builder.style();
                builder.text("\n", style);
            }
            Event::Rule => {
                builder.flush();
                builder.blocks.push(Block {
                    kind: BlockKind::Rule,
                    spans: Vec::new(),
                });
            }
            _ => {}
        }
    }

    builder.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
