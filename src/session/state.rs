//! Conversation state enum.
//!
//! ```text
//! AwaitingOriginal ──submit──▶ AwaitingDraft ──submit──▶ Processing
//!                                                        ├─ Ok  ──▶ Completed
//!                                                        └─ Err ──▶ Failed
//! Completed / Failed ──reset──▶ AwaitingOriginal
//! ```

/// Which input the conversation is waiting for, or what it is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConversationState {
    /// Waiting for the original content.
    #[default]
    AwaitingOriginal,
    /// Original stored; waiting for the draft transcript.
    AwaitingDraft,
    /// Both inputs stored; the comparison is in flight.
    Processing,
    /// The report has been appended.
    Completed,
    /// The comparison failed; the error message has been appended.
    Failed,
}

impl ConversationState {
    /// `true` while the collector may hand text to the conversation.
    ///
    /// ```
    /// use srt_auditor::session::ConversationState;
    ///
    /// assert!(ConversationState::AwaitingOriginal.accepts_input());
    /// assert!(ConversationState::AwaitingDraft.accepts_input());
    /// assert!(!ConversationState::Processing.accepts_input());
    /// assert!(!ConversationState::Completed.accepts_input());
    /// assert!(!ConversationState::Failed.accepts_input());
    /// ```
    pub fn accepts_input(self) -> bool {
        matches!(
            self,
            ConversationState::AwaitingOriginal | ConversationState::AwaitingDraft
        )
    }

    /// `true` while a comparison request is outstanding.
    pub fn is_busy(self) -> bool {
        self == ConversationState::Processing
    }

    /// `true` in the terminal states, where the reset button is offered.
    pub fn can_reset(self) -> bool {
        matches!(
            self,
            ConversationState::Completed | ConversationState::Failed
        )
    }

    /// Short label for logs and the status line.
    pub fn label(self) -> &'static str {
        match self {
            ConversationState::AwaitingOriginal => "Awaiting original",
            ConversationState::AwaitingDraft => "Awaiting draft",
            ConversationState::Processing => "Processing",
            ConversationState::Completed => "Completed",
            ConversationState::Failed => "Failed",
        }
    }

    /// Hint shown in the empty text box.
    pub fn input_placeholder(self) -> &'static str {
        match self {
            ConversationState::AwaitingOriginal => "Dán nội dung Content Gốc hoặc tải file...",
            ConversationState::AwaitingDraft => "Dán nội dung SRT hoặc tải file...",
            ConversationState::Processing
            | ConversationState::Completed
            | ConversationState::Failed => "Vui lòng đợi...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ConversationState; 5] = [
        ConversationState::AwaitingOriginal,
        ConversationState::AwaitingDraft,
        ConversationState::Processing,
        ConversationState::Completed,
        ConversationState::Failed,
    ];

    #[test]
    fn default_is_awaiting_original() {
        assert_eq!(ConversationState::default(), ConversationState::AwaitingOriginal);
    }

    #[test]
    fn input_reset_and_busy_are_disjoint() {
        for state in ALL {
            let flags = [state.accepts_input(), state.is_busy(), state.can_reset()];
            assert_eq!(
                flags.iter().filter(|f| **f).count(),
                1,
                "{state:?} must be in exactly one group"
            );
        }
    }

    #[test]
    fn only_processing_is_busy() {
        assert!(ConversationState::Processing.is_busy());
        assert!(!ConversationState::Completed.is_busy());
        assert!(!ConversationState::AwaitingDraft.is_busy());
    }

    #[test]
    fn placeholders() {
        assert!(ConversationState::AwaitingOriginal
            .input_placeholder()
            .contains("Content Gốc"));
        assert!(ConversationState::AwaitingDraft
            .input_placeholder()
            .contains("SRT"));
        assert_eq!(
            ConversationState::Failed.input_placeholder(),
            "Vui lòng đợi..."
        );
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = ALL.iter().map(|s| s.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ALL.len());
    }
}
