//! Gemini response parsing
//!
//! Public functions for decoding `generateContent` responses and error
//! envelopes.

use crate::llm::transport_types::GenerationError;
use serde_json::Value as JsonValue;

/// Finish reasons that mean the candidate was withheld by policy filters
const SAFETY_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
    "IMAGE_SAFETY",
];

/// Longest error body echoed back when no envelope could be decoded
const MAX_RAW_ERROR_LEN: usize = 512;

/// Parse a `generateContent` response and return the candidate text.
///
/// Text parts of the first candidate are concatenated in order. A prompt
/// block (`promptFeedback.blockReason`) or a safety finish reason with no
/// text is reported as `GenerationError::Blocked`.
pub fn parse_generate_content(response: &str) -> Result<String, GenerationError> {
    let json: JsonValue = serde_json::from_str(response)?;

    if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
        let detail = json["promptFeedback"]["blockReasonMessage"]
            .as_str()
            .map(|m| format!("{} ({})", reason, m))
            .unwrap_or_else(|| reason.to_string());
        return Err(GenerationError::Blocked { reason: detail });
    }

    let candidate = json["candidates"].get(0).ok_or_else(|| {
        GenerationError::InvalidResponse("Missing candidates[0]".to_string())
    })?;

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| {
            parts
                .iter()
                .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    let finish_reason = candidate["finishReason"].as_str();
    if text.is_empty() {
        if let Some(reason) = finish_reason.filter(|r| SAFETY_FINISH_REASONS.contains(r)) {
            return Err(GenerationError::Blocked {
                reason: reason.to_string(),
            });
        }
        return Err(GenerationError::InvalidResponse(format!(
            "Missing candidates[0].content.parts[].text (finishReason: {})",
            finish_reason.unwrap_or("none")
        )));
    }

    Ok(text)
}

/// Convert a non-2xx response into the most specific error available.
///
/// Gemini reports failures as `{"error": {"code", "message", "status"}}`.
pub fn classify_http_error(status: u16, body: &str) -> GenerationError {
    let envelope = serde_json::from_str::<JsonValue>(body)
        .ok()
        .filter(|json| json["error"].is_object());

    let Some(json) = envelope else {
        let mut message = body.trim().to_string();
        if message.len() > MAX_RAW_ERROR_LEN {
            let cut = (0..=MAX_RAW_ERROR_LEN)
                .rev()
                .find(|i| message.is_char_boundary(*i))
                .unwrap_or(0);
            message.truncate(cut);
            message.push_str("...");
        }
        return match status {
            401 | 403 => GenerationError::Authentication(message),
            429 => GenerationError::RateLimited { message },
            _ => GenerationError::Http { status, message },
        };
    };

    let error = &json["error"];
    let message = error["message"].as_str().unwrap_or_default().to_string();
    let code = error["status"]
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string());

    let key_invalid = error["details"]
        .as_array()
        .map(|details| {
            details
                .iter()
                .any(|d| d["reason"].as_str() == Some("API_KEY_INVALID"))
        })
        .unwrap_or(false);

    match status {
        401 | 403 => GenerationError::Authentication(message),
        429 => GenerationError::RateLimited { message },
        _ if key_invalid => GenerationError::Authentication(message),
        _ => GenerationError::Provider { code, message },
    }
}
