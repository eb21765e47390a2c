//! Text box buffer and file loading, both feeding [`Conversation::submit`].

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::session::{ComparisonRequest, Conversation};

/// File extensions offered by the picker and accepted on drop.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["txt", "srt"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// InputError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum InputError {
    #[error("unsupported file type `{}` (expected .txt or .srt)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// File helpers
// ---------------------------------------------------------------------------

/// `true` when `path` ends in `.txt` or `.srt` (any case).
pub fn is_accepted(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ACCEPTED_EXTENSIONS
                .iter()
                .any(|ok| ext.eq_ignore_ascii_case(ok))
        })
}

/// Decode file bytes as UTF-8 text, dropping a leading byte-order mark.
/// Invalid sequences become U+FFFD rather than failing the whole file.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// Read a whole `.txt` / `.srt` file as text.
pub fn read_text_file(path: &Path) -> Result<String, InputError> {
    if !is_accepted(path) {
        return Err(InputError::UnsupportedExtension(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_text(&bytes))
}

// ---------------------------------------------------------------------------
// InputCollector
// ---------------------------------------------------------------------------

/// Holds what the user is typing and forwards finished input to a
/// [`Conversation`].
#[derive(Debug, Default)]
pub struct InputCollector {
    buffer: String,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backing string for the text box.
    pub fn buffer_mut(&mut self) -> &mut String {
        &mut self.buffer
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Whether the send button should be enabled.
    pub fn can_send(&self, conversation: &Conversation) -> bool {
        conversation.state().accepts_input() && !self.buffer.trim().is_empty()
    }

    /// Send the typed text.  Blank text, or text typed while the
    /// conversation is not accepting input, stays in the box.
    pub fn submit_typed(&mut self, conversation: &mut Conversation) -> Option<ComparisonRequest> {
        if !self.can_send(conversation) {
            return None;
        }
        let text = std::mem::take(&mut self.buffer);
        conversation.submit(text)
    }

    /// Read `path` and send its whole content.
    ///
    /// Nothing is read while the conversation is not accepting input.
    pub fn submit_file(
        &mut self,
        conversation: &mut Conversation,
        path: &Path,
    ) -> Result<Option<ComparisonRequest>, InputError> {
        if !conversation.state().accepts_input() {
            log::debug!("input: file {} ignored, input disabled", path.display());
            return Ok(None);
        }
        let content = read_text_file(path)?;
        log::info!(
            "input: loaded {} ({} bytes)",
            path.display(),
            content.len()
        );
        Ok(conversation.submit(content))
    }

    /// Send a file that arrived as bytes with only a name (a drop without a
    /// filesystem path).  Same rules as [`submit_file`](Self::submit_file).
    pub fn submit_bytes(
        &mut self,
        conversation: &mut Conversation,
        name: &str,
        bytes: &[u8],
    ) -> Result<Option<ComparisonRequest>, InputError> {
        if !conversation.state().accepts_input() {
            log::debug!("input: file {name} ignored, input disabled");
            return Ok(None);
        }
        let path = Path::new(name);
        if !is_accepted(path) {
            return Err(InputError::UnsupportedExtension(path.to_path_buf()));
        }
        let content = decode_text(bytes);
        log::info!("input: loaded {name} ({} bytes)", content.len());
        Ok(conversation.submit(content))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
