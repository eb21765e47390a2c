//! JSON request bodies and response extraction for the supported backends.
//!
//! Kept free of any HTTP so both directions can be tested on plain
//! `serde_json::Value`s.

use serde_json::{json, Value};

use crate::config::LlmConfig;

// ---------------------------------------------------------------------------
// Gemini `generateContent`
// ---------------------------------------------------------------------------

/// Path (relative to the base URL) of the Gemini endpoint for `model`.
pub fn gemini_path(model: &str) -> String {
    format!("/v1beta/models/{model}:generateContent")
}

pub fn gemini_body(config: &LlmConfig, system_msg: &str, user_msg: &str) -> Value {
    json!({
        "systemInstruction": {
            "parts": [ { "text": system_msg } ]
        },
        "contents": [
            { "role": "user", "parts": [ { "text": user_msg } ] }
        ],
        "generationConfig": {
            "temperature": config.temperature
        }
    })
}

/// Concatenated text of the first candidate.  Thought parts are skipped.
/// Returns an empty string when the response carries no text (e.g. a
/// blocked prompt with no candidates).
pub fn gemini_text(response: &Value) -> String {
    response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter(|p| !p["thought"].as_bool().unwrap_or(false))
                .filter_map(|p| p["text"].as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// OpenAI-compatible `/v1/chat/completions`
// ---------------------------------------------------------------------------

pub const OPENAI_PATH: &str = "/v1/chat/completions";

pub fn openai_body(config: &LlmConfig, system_msg: &str, user_msg: &str) -> Value {
    json!({
        "model":       config.model,
        "messages": [
            { "role": "system", "content": system_msg },
            { "role": "user",   "content": user_msg   }
        ],
        "stream":      false,
        "temperature": config.temperature
    })
}

pub fn openai_text(response: &Value) -> String {
    response["choices"][0]["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
