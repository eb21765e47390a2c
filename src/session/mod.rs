//! Conversation session: state machine, collected inputs and transcript.
//!
//! ```rust
//! use srt_auditor::session::{Conversation, ConversationState};
//!
//! let mut conversation = Conversation::new();
//! assert!(conversation.submit("Hello world").is_none());
//! let request = conversation.submit("Helo wrold").unwrap();
//! assert_eq!(conversation.state(), ConversationState::Processing);
//!
//! // run `request` against a Comparator, then:
//! conversation.resolve(Ok("Sửa lỗi từ trong SRT :\n…".into()));
//! assert_eq!(conversation.state(), ConversationState::Completed);
//! # let _ = request;
//! ```

pub mod conversation;
pub mod message;
pub mod state;

pub use conversation::{
    CollectedInputs, ComparisonRequest, Conversation, ACKNOWLEDGE, ASK_DRAFT, ASK_ORIGINAL,
    FAILURE_MESSAGE, GREETING, PREVIEW_SUFFIX,
};
pub use message::{Message, Origin, Transcript};
pub use state::ConversationState;
