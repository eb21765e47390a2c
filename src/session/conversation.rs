//! The conversation state machine.
//!
//! [`Conversation`] is owned by whoever drives the UI.  It never performs
//! I/O: when the draft arrives it hands back a [`ComparisonRequest`] that the
//! caller runs, then feeds the outcome to [`Conversation::resolve`].

use crate::llm::CompareError;

use super::message::{Message, Transcript};
use super::state::ConversationState;

// ---------------------------------------------------------------------------
// Bot wording
// ---------------------------------------------------------------------------

/// First prompt of a fresh session.
pub const GREETING: &str = "Chào bạn. Cho tôi file Content gốc của bạn?";
/// Prompt for the original content after a reset.
pub const ASK_ORIGINAL: &str = "Cho tôi file Content gốc của bạn?";
pub const ASK_DRAFT: &str = "Ok. Tiếp theo hãy cung cấp file SRT chưa hoàn thiện cho tôi.";
pub const ACKNOWLEDGE: &str = "Ok, cảm ơn bạn, tôi đã nhận đủ Content gốc và SRT chưa hoàn thiện. Bây giờ tôi sẽ tiến hành rà soát...";
/// Shown for every failed comparison, whatever the cause.
pub const FAILURE_MESSAGE: &str =
    "Xin lỗi, đã xảy ra lỗi trong quá trình xử lý. Vui lòng làm mới trang và thử lại.";
/// Appended to an abbreviated user message.
pub const PREVIEW_SUFFIX: &str = "... (Đã nhận nội dung)";

const DEFAULT_PREVIEW_CHARS: usize = 300;

// ---------------------------------------------------------------------------
// CollectedInputs / ComparisonRequest
// ---------------------------------------------------------------------------

/// Texts gathered so far, stored exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedInputs {
    pub original: Option<String>,
    pub draft: Option<String>,
}

impl CollectedInputs {
    pub fn clear(&mut self) {
        self.original = None;
        self.draft = None;
    }
}

/// Both texts, ready to be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub original: String,
    pub draft: String,
}

// ---------------------------------------------------------------------------
// Conversation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Conversation {
    state: ConversationState,
    inputs: CollectedInputs,
    transcript: Transcript,
    preview_chars: usize,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    /// Start a session: empty inputs, greeting already in the transcript.
    pub fn new() -> Self {
        Self::with_preview_chars(DEFAULT_PREVIEW_CHARS)
    }

    /// Like [`new`](Self::new) but echo at most `preview_chars` characters
    /// of each user submission into the transcript.
    pub fn with_preview_chars(preview_chars: usize) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_bot(GREETING);
        Self {
            state: ConversationState::AwaitingOriginal,
            inputs: CollectedInputs::default(),
            transcript,
            preview_chars,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    pub fn inputs(&self) -> &CollectedInputs {
        &self.inputs
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    /// Feed one piece of user text.
    ///
    /// Blank text and text arriving outside the two awaiting states are
    /// ignored.  Returns the comparison to run when this submission was the
    /// draft.
    pub fn submit(&mut self, text: impl Into<String>) -> Option<ComparisonRequest> {
        let text = text.into();
        if text.trim().is_empty() {
            log::debug!("conversation: blank submission ignored");
            return None;
        }

        match self.state {
            ConversationState::AwaitingOriginal => {
                let shown = self.preview(&text);
                self.transcript.push_user(shown);
                self.inputs.original = Some(text);
                self.transition(ConversationState::AwaitingDraft);
                self.transcript.push_bot(ASK_DRAFT);
                None
            }
            ConversationState::AwaitingDraft => {
                let Some(original) = self.inputs.original.clone() else {
                    log::error!("conversation: draft received without an original");
                    return None;
                };
                let shown = self.preview(&text);
                self.transcript.push_user(shown);
                self.inputs.draft = Some(text.clone());
                self.transition(ConversationState::Processing);
                self.transcript.push_bot(ACKNOWLEDGE);
                Some(ComparisonRequest {
                    original,
                    draft: text,
                })
            }
            ConversationState::Processing
            | ConversationState::Completed
            | ConversationState::Failed => {
                log::debug!(
                    "conversation: submission ignored in state {}",
                    self.state.label()
                );
                None
            }
        }
    }

    /// Apply the outcome of the comparison started by [`submit`](Self::submit).
    ///
    /// Returns `false` (and changes nothing) unless the conversation is
    /// `Processing`.
    pub fn resolve(&mut self, outcome: Result<String, CompareError>) -> bool {
        if self.state != ConversationState::Processing {
            log::warn!(
                "conversation: comparison outcome ignored in state {}",
                self.state.label()
            );
            return false;
        }

        match outcome {
            Ok(report) => {
                self.transcript.push_bot_rich(report);
                self.transition(ConversationState::Completed);
            }
            Err(e) => {
                if e.is_configuration() {
                    log::error!("conversation: comparison not attempted: {e}");
                } else {
                    log::warn!("conversation: comparison failed: {e}");
                }
                self.transcript.push_bot(FAILURE_MESSAGE);
                self.transition(ConversationState::Failed);
            }
        }
        true
    }

    /// Drop everything and ask for the original content again.
    ///
    /// Only a finished conversation can be reset: returns `false` (and
    /// changes nothing) in any other state, so an outstanding comparison can
    /// never land on a later one.
    pub fn reset(&mut self) -> bool {
        if !self.state.can_reset() {
            log::warn!("conversation: reset ignored in state {}", self.state.label());
            return false;
        }
        self.transcript.clear();
        self.inputs.clear();
        self.transition(ConversationState::AwaitingOriginal);
        self.transcript.push_bot(ASK_ORIGINAL);
        true
    }

    fn transition(&mut self, next: ConversationState) {
        log::debug!(
            "conversation: {} → {}",
            self.state.label(),
            next.label()
        );
        self.state = next;
    }

    fn preview(&self, text: &str) -> String {
        if text.chars().count() <= self.preview_chars {
            return text.to_string();
        }
        let mut shown: String = text.chars().take(self.preview_chars).collect();
        shown.push_str(PREVIEW_SUFFIX);
        shown
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Origin;

    fn at_processing() -> (Conversation, ComparisonRequest) {
        let mut c = Conversation::new();
        assert!(c.submit("Hello world").is_none());
        let req = c.submit("Helo wrold").expect("draft yields a request");
        (c, req)
    }

    #[test]
    fn new_session_starts_with_greeting() {
        let c = Conversation::new();
        assert_eq!(c.state(), ConversationState::AwaitingOriginal);
        assert_eq!(c.messages().len(), 1);
        assert_eq!(c.messages()[0].origin(), Origin::Bot);
        assert_eq!(c.messages()[0].body(), GREETING);
        assert_eq!(c.inputs(), &CollectedInputs::default());
    }

    #[test]
    fn blank_submission_is_ignored() {
        let mut c = Conversation::new();
        for blank in ["", "   ", "\n\t \r\n"] {
            assert!(c.submit(blank).is_none());
        }
        assert_eq!(c.state(), ConversationState::AwaitingOriginal);
        assert_eq!(c.messages().len(), 1);
        assert!(c.inputs().original.is_none());
    }

    #[test]
    fn original_then_draft_reaches_processing() {
        let mut c = Conversation::new();
        assert!(c.submit("Hello world").is_none());
        assert_eq!(c.state(), ConversationState::AwaitingDraft);
        assert_eq!(c.inputs().original.as_deref(), Some("Hello world"));
        assert_eq!(c.messages().last().unwrap().body(), ASK_DRAFT);

        let req = c.submit("Helo wrold").expect("request");
        assert_eq!(c.state(), ConversationState::Processing);
        assert_eq!(
            req,
            ComparisonRequest {
                original: "Hello world".into(),
                draft: "Helo wrold".into()
            }
        );
        assert_eq!(c.messages().last().unwrap().body(), ACKNOWLEDGE);
        assert_eq!(c.messages().len(), 5);
    }

    #[test]
    fn third_submission_is_refused_while_processing() {
        let (mut c, _) = at_processing();
        let before = c.messages().len();

        assert!(c.submit("one more").is_none());
        assert_eq!(c.state(), ConversationState::Processing);
        assert_eq!(c.messages().len(), before);
        assert_eq!(c.inputs().draft.as_deref(), Some("Helo wrold"));
    }

    #[test]
    fn inputs_are_stored_verbatim() {
        let original = "  lead\r\n\"\"\"quoted\"\"\"\n\u{feff}tail  ";
        let draft = "1\n00:00:01,000 --> 00:00:02,000\nXin chào\n";
        let mut c = Conversation::new();
        c.submit(original);
        let req = c.submit(draft).unwrap();

        assert_eq!(req.original, original);
        assert_eq!(req.draft, draft);
        assert_eq!(c.inputs().original.as_deref(), Some(original));
    }

    #[test]
    fn success_appends_rich_report_and_completes() {
        let (mut c, _) = at_processing();
        let report = "Sửa lỗi từ trong SRT :\nVị trí 1.\n00:00:01,000\n- Helo\n- Hello";

        assert!(c.resolve(Ok(report.into())));
        assert_eq!(c.state(), ConversationState::Completed);
        let last = c.messages().last().unwrap();
        assert!(last.is_rich_text());
        assert_eq!(last.origin(), Origin::Bot);
        assert_eq!(last.body(), report);
        assert_eq!(c.messages().len(), 6);
    }

    #[test]
    fn failure_appends_fixed_message() {
        let (mut c, _) = at_processing();

        assert!(c.resolve(Err(CompareError::Status {
            status: 503,
            body: "overloaded".into()
        })));
        assert_eq!(c.state(), ConversationState::Failed);
        let last = c.messages().last().unwrap();
        assert_eq!(
            last.body(),
            "Xin lỗi, đã xảy ra lỗi trong quá trình xử lý. Vui lòng làm mới trang và thử lại."
        );
        assert!(!last.is_rich_text());
        assert!(!last.body().contains("503"));
    }

    #[test]
    fn missing_credential_is_reported_like_any_failure() {
        let (mut c, _) = at_processing();
        c.resolve(Err(CompareError::MissingCredential("API_KEY".into())));
        assert_eq!(c.state(), ConversationState::Failed);
        assert_eq!(c.messages().last().unwrap().body(), FAILURE_MESSAGE);
    }

    #[test]
    fn resolve_outside_processing_is_ignored() {
        let mut c = Conversation::new();
        assert!(!c.resolve(Ok("stray".into())));
        assert_eq!(c.messages().len(), 1);

        let (mut c, _) = at_processing();
        c.resolve(Ok("report".into()));
        assert!(!c.resolve(Err(CompareError::Timeout)));
        assert_eq!(c.state(), ConversationState::Completed);
        assert_eq!(c.messages().last().unwrap().body(), "report");
    }

    #[test]
    fn terminal_states_refuse_input() {
        let (mut c, _) = at_processing();
        c.resolve(Err(CompareError::Timeout));
        assert!(c.submit("new original").is_none());
        assert_eq!(c.state(), ConversationState::Failed);
    }

    #[test]
    fn reset_from_terminal_states() {
        for outcome in [Ok("report".to_string()), Err(CompareError::Timeout)] {
            let (mut c, _) = at_processing();
            c.resolve(outcome);
            assert!(c.reset());

            assert_eq!(c.state(), ConversationState::AwaitingOriginal);
            assert_eq!(c.messages().len(), 1);
            assert_eq!(c.messages()[0].origin(), Origin::Bot);
            assert_eq!(c.messages()[0].body(), ASK_ORIGINAL);
            assert_eq!(c.inputs(), &CollectedInputs::default());
        }
    }

    #[test]
    fn reset_is_refused_until_finished() {
        let mut c = Conversation::new();
        assert!(!c.reset());
        c.submit("A1");
        assert!(!c.reset());
        assert_eq!(c.state(), ConversationState::AwaitingDraft);
        assert_eq!(c.inputs().original.as_deref(), Some("A1"));

        c.submit("B1").unwrap();
        let before = c.messages().len();
        assert!(!c.reset());
        assert_eq!(c.state(), ConversationState::Processing);
        assert_eq!(c.messages().len(), before);
    }

    #[test]
    fn late_outcome_cannot_land_on_next_round() {
        let (mut c, _) = at_processing();
        // A reset mid-request is refused, so the only way to a second
        // comparison is through the first one's outcome.
        assert!(!c.reset());
        assert!(c.submit("A2").is_none());
        assert!(c.submit("B2").is_none());

        assert!(c.resolve(Ok("report for the first pair".into())));
        assert_eq!(c.state(), ConversationState::Completed);
        assert_eq!(c.inputs().original.as_deref(), Some("Hello world"));
    }

    #[test]
    fn second_round_after_reset_works() {
        let (mut c, _) = at_processing();
        c.resolve(Ok("r1".into()));
        c.reset();

        c.submit("A");
        let req = c.submit("B").unwrap();
        assert_eq!(req.original, "A");
        assert_eq!(req.draft, "B");
    }

    #[test]
    fn long_submission_is_abbreviated_in_transcript_only() {
        let mut c = Conversation::with_preview_chars(5);
        let text = "đđđđđđđđ";
        c.submit(text);

        assert_eq!(c.messages()[1].body(), format!("đđđđđ{PREVIEW_SUFFIX}"));
        assert_eq!(c.inputs().original.as_deref(), Some(text));
    }

    #[test]
    fn submission_at_limit_is_shown_whole() {
        let mut c = Conversation::with_preview_chars(5);
        c.submit("abcde");
        assert_eq!(c.messages()[1].body(), "abcde");
    }
}
