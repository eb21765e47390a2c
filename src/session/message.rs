//! Transcript messages.
//!
//! A [`Message`] is immutable once created; the [`Transcript`] only ever
//! appends or clears.

use chrono::{DateTime, Local};
use uuid::Uuid;

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Bot,
    User,
}

impl Origin {
    /// Sender caption shown above the bubble.
    pub fn caption(self) -> &'static str {
        match self {
            Origin::Bot => "App",
            Origin::User => "Tôi",
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    id: String,
    origin: Origin,
    body: String,
    created_at: DateTime<Local>,
    is_rich_text: bool,
}

impl Message {
    fn new(origin: Origin, body: String, is_rich_text: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            origin,
            body,
            created_at: Local::now(),
            is_rich_text,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// `true` for the comparison report, which is rendered with formatting.
    pub fn is_rich_text(&self) -> bool {
        self.is_rich_text
    }
}

/// Ordered, append-only message log.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a plain bot message.
    pub fn push_bot(&mut self, body: impl Into<String>) {
        self.messages.push(Message::new(Origin::Bot, body.into(), false));
    }

    /// Append a bot message rendered as rich text.
    pub fn push_bot_rich(&mut self, body: impl Into<String>) {
        self.messages.push(Message::new(Origin::Bot, body.into(), true));
    }

    /// Append a user message.
    pub fn push_user(&mut self, body: impl Into<String>) {
        self.messages.push(Message::new(Origin::User, body.into(), false));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn push_preserves_order_and_origin() {
        let mut t = Transcript::new();
        t.push_bot("hi");
        t.push_user("content");
        t.push_bot_rich("**report**");

        let origins: Vec<_> = t.messages().iter().map(Message::origin).collect();
        assert_eq!(origins, vec![Origin::Bot, Origin::User, Origin::Bot]);
        assert_eq!(t.messages()[1].body(), "content");
        assert!(!t.messages()[0].is_rich_text());
        assert!(t.last().is_some_and(Message::is_rich_text));
    }

    #[test]
    fn ids_are_unique() {
        let mut t = Transcript::new();
        for i in 0..200 {
            t.push_user(format!("m{i}"));
        }
        let ids: HashSet<_> = t.messages().iter().map(Message::id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn timestamps_are_non_decreasing() {
        let mut t = Transcript::new();
        t.push_bot("a");
        t.push_bot("b");
        assert!(t.messages()[0].created_at() <= t.messages()[1].created_at());
    }

    #[test]
    fn clear_empties_transcript() {
        let mut t = Transcript::new();
        t.push_bot("a");
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert!(t.last().is_none());
    }

    #[test]
    fn captions() {
        assert_eq!(Origin::Bot.caption(), "App");
        assert_eq!(Origin::User.caption(), "Tôi");
    }
}
