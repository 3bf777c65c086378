//! Error message extraction for rejected writes.
//!
//! Priority: structured `{"message": "..."}` body, then the raw body text,
//! then the status line.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Best human-readable reason for a non-2xx response
pub fn error_message(status_line: &str, body: &str) -> String {
    let structured = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|msg| !msg.trim().is_empty());
    if let Some(msg) = structured {
        return msg;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status_line.to_string()
}
