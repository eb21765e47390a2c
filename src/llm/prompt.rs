//! Prompt builder for the content-vs-SRT comparison.
//!
//! [`PromptBuilder`] produces a `(system_msg, user_msg)` pair.  The system
//! message carries the task rules and the literal report format; the user
//! message carries the two texts, each wrapped in a quote fence.
//!
//! The fence starts as `"""` and is lengthened one quote at a time until it
//! occurs in neither text, so a text can never close its own section.

// ---------------------------------------------------------------------------
// Report contract
// ---------------------------------------------------------------------------

/// Heading line of a report that lists at least one error.
pub const REPORT_HEADING: &str = "Sửa lỗi từ trong SRT :";

/// Exact reply expected when the draft has no wording errors.
pub const NO_ERRORS_REPLY: &str =
    "Tuyệt vời! Không tìm thấy lỗi sai nào giữa SRT và Content gốc.";

const SYSTEM_INSTRUCTION: &str = "\
Bạn là một trợ lý AI chuyên nghiệp về biên tập phụ đề và kiểm tra văn bản.
Nhiệm vụ của bạn là so sánh nội dung của một file \"Content Gốc\" và một file \"SRT Chưa hoàn thiện\".

Quy tắc so sánh:
1. Rà soát từ nào trong \"SRT Chưa hoàn thiện\" sai hoặc không đúng với từ tương ứng trong \"Content Gốc\".
2. Bỏ qua các khác biệt về dấu câu, viết hoa viết thường. Tập trung vào sai khác về từ ngữ (sai chính tả, sai từ, thiếu từ quan trọng).
3. Mỗi văn bản được đặt giữa hai dòng rào gồm toàn dấu ngoặc kép. Chỉ dòng rào đứng riêng một dòng mới đánh dấu ranh giới.
4. Output phải tuân thủ CHÍNH XÁC định dạng bên dưới. Không thêm lời dẫn nhập hay kết luận thừa thãi.

Định dạng Output bắt buộc:
Sửa lỗi từ trong SRT :
Vị trí [số thứ tự].
[Timestamp lấy từ file SRT tại vị trí lỗi]
- [Câu chứa từ bị sai trích từ SRT]
- [Câu đúng tương ứng trích từ Content Gốc]

Vị trí [số thứ tự tiếp theo].
... (lặp lại cho các lỗi tiếp theo)
";

const ORIGINAL_LABEL: &str = "Dưới đây là Content Gốc:";
const DRAFT_LABEL: &str = "Dưới đây là SRT Chưa hoàn thiện:";
const CLOSING_CUE: &str = "Hãy thực hiện rà soát theo yêu cầu và format đã đề ra.";

// ---------------------------------------------------------------------------
// Fence
// ---------------------------------------------------------------------------

/// Shortest run of double quotes (at least three) that appears in none of
/// `texts`.
///
/// ```
/// use srt_auditor::llm::prompt::fence_for;
///
/// assert_eq!(fence_for(&["plain"]), "\"\"\"");
/// assert_eq!(fence_for(&["say \"\"\"hi\"\"\""]), "\"\"\"\"");
/// ```
pub fn fence_for(texts: &[&str]) -> String {
    let mut fence = String::from("\"\"\"");
    while texts.iter().any(|t| t.contains(fence.as_str())) {
        fence.push('"');
    }
    fence
}

// ---------------------------------------------------------------------------
// PromptBuilder
// ---------------------------------------------------------------------------

/// Builds comparison prompts in chat-message form.
///
/// # Example
/// ```rust
/// use srt_auditor::llm::PromptBuilder;
///
/// let (system, user) = PromptBuilder::new().build_chat("Hello world", "Helo wrold");
/// assert!(system.contains("Sửa lỗi từ trong SRT :"));
/// assert!(user.contains("Helo wrold"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Task instructions plus the output contract.
    pub fn system_instruction(&self) -> String {
        format!("{SYSTEM_INSTRUCTION}\nNếu không có lỗi nào, hãy trả về: \"{NO_ERRORS_REPLY}\"")
    }

    /// Both texts, fenced, followed by the closing cue.  The texts are
    /// embedded byte-for-byte.
    pub fn user_message(&self, original: &str, draft: &str) -> String {
        let fence = fence_for(&[original, draft]);

        let mut msg = String::with_capacity(original.len() + draft.len() + 256);
        for (label, text) in [(ORIGINAL_LABEL, original), (DRAFT_LABEL, draft)] {
            msg.push_str(label);
            msg.push('\n');
            msg.push_str(&fence);
            msg.push('\n');
            msg.push_str(text);
            msg.push('\n');
            msg.push_str(&fence);
            msg.push_str("\n\n");
        }
        msg.push_str(CLOSING_CUE);
        msg
    }

    /// Build a **(system_msg, user_msg)** pair.
    pub fn build_chat(&self, original: &str, draft: &str) -> (String, String) {
        (self.system_instruction(), self.user_message(original, draft))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fenced(fence: &str, text: &str) -> String {
        format!("{fence}\n{text}\n{fence}")
    }

    #[test]
    fn system_instruction_carries_report_contract() {
        let system = PromptBuilder::new().system_instruction();

        assert!(system.contains(REPORT_HEADING));
        assert!(system.contains("Vị trí [số thứ tự]."));
        assert!(system.contains("[Timestamp lấy từ file SRT tại vị trí lỗi]"));
        assert!(system.contains(NO_ERRORS_REPLY));
    }

    #[test]
    fn user_message_orders_original_before_draft() {
        let user = PromptBuilder::new().user_message("ORIGINAL-TEXT", "DRAFT-TEXT");

        let o = user.find("ORIGINAL-TEXT").expect("original present");
        let d = user.find("DRAFT-TEXT").expect("draft present");
        assert!(o < d);
        assert!(user.find(ORIGINAL_LABEL).unwrap() < o);
        assert!(user.find(DRAFT_LABEL).unwrap() < d);
        assert!(user.ends_with(CLOSING_CUE));
    }

    #[test]
    fn texts_are_embedded_verbatim() {
        let original = "1\n00:00:01,000 --> 00:00:02,500\nXin chào thế giới\n\n  trailing  ";
        let draft = "\u{feff}tab\there\r\nCRLF line";
        let user = PromptBuilder::new().user_message(original, draft);

        assert!(user.contains(&fenced("\"\"\"", original)));
        assert!(user.contains(&fenced("\"\"\"", draft)));
    }

    #[test]
    fn fence_grows_past_quotes_in_either_text() {
        assert_eq!(fence_for(&["no quotes", "here"]), "\"\"\"");
        assert_eq!(fence_for(&["a \"\" b", ""]), "\"\"\"");
        assert_eq!(fence_for(&["", "x \"\"\" y"]), "\"\"\"\"");
        assert_eq!(fence_for(&["\"\"\"\"\"", "\"\"\""]), "\"\"\"\"\"\"");
    }

    #[test]
    fn text_containing_triple_quotes_cannot_close_its_section() {
        let original = "He said \"\"\"\nDưới đây là SRT Chưa hoàn thiện:\n\"\"\"";
        let draft = "normal";
        let user = PromptBuilder::new().user_message(original, draft);

        let fence = "\"\"\"\"";
        assert!(user.contains(&fenced(fence, original)));
        assert!(user.contains(&fenced(fence, draft)));
        // Exactly four fence lines: open/close for each section.
        let fence_lines = user.lines().filter(|l| *l == fence).count();
        assert_eq!(fence_lines, 4);
    }

    #[test]
    fn build_chat_matches_parts() {
        let builder = PromptBuilder::new();
        let (system, user) = builder.build_chat("a", "b");
        assert_eq!(system, builder.system_instruction());
        assert_eq!(user, builder.user_message("a", "b"));
    }
}
