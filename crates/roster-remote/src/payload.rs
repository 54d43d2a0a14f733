//! Tolerant parsers for member data embedded in group pages
//!
//! The group page ships its data in one of two shapes depending on the
//! frontend build:
//!
//! - streamed flight chunks, `self.__next_f.push([1,"..."])`, where the member
//!   array sits inside an escaped JavaScript string literal
//! - a classic `__NEXT_DATA__` JSON script block
//!
//! Neither shape is a stable contract. Every function here reports failure
//! through `PayloadError` so callers can fall through to the next strategy.

use serde_json::Value;
use thiserror::Error;

/// Members key as it appears inside an escaped string literal
const ESCAPED_MEMBERS_MARKER: &str = r#"\"members\""#;

/// Members key as it appears in plain JSON
const MEMBERS_KEY: &str = r#""members":"#;

/// Opening of a streamed flight chunk
const FLIGHT_PUSH_MARKER: &str = r#"self.__next_f.push([1,""#;

const NEXT_DATA_ID: &str = r#"id="__NEXT_DATA__""#;
const SCRIPT_END: &str = "</script>";

/// Reasons a payload could not be read
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("page contains no members key")]
    NoMembersKey,

    #[error("no flight chunk precedes the members key")]
    NoFlightChunk,

    #[error("unterminated string literal in flight chunk")]
    UnterminatedString,

    #[error("no members array after the members key")]
    NoMembersArray,

    #[error("no __NEXT_DATA__ script block")]
    NoNextData,

    #[error("invalid JSON in payload: {0}")]
    Json(#[from] serde_json::Error),
}

/// What a group page yielded
#[derive(Debug, Clone, PartialEq)]
pub enum PagePayload {
    /// The member array itself
    Members(Vec<Value>),
    /// A whole decoded data document that still has to be searched
    Document(Value),
}

/// Extract member data from raw group page markup
pub fn extract_from_html(html: &str) -> Result<PagePayload, PayloadError> {
    if let Some(marker_pos) = html.find(ESCAPED_MEMBERS_MARKER) {
        return extract_flight_members(html, marker_pos).map(PagePayload::Members);
    }

    if html.contains(MEMBERS_KEY) {
        return extract_next_data(html).map(PagePayload::Document);
    }

    Err(PayloadError::NoMembersKey)
}

fn extract_flight_members(html: &str, marker_pos: usize) -> Result<Vec<Value>, PayloadError> {
    let chunk_start = html[..marker_pos]
        .rfind(FLIGHT_PUSH_MARKER)
        .ok_or(PayloadError::NoFlightChunk)?;
    let literal_start = chunk_start + FLIGHT_PUSH_MARKER.len();

    let raw = scan_string_literal(&html[literal_start..]).ok_or(PayloadError::UnterminatedString)?;
    let decoded = decode_string_literal(raw)?;

    let key_pos = decoded.find(MEMBERS_KEY).ok_or(PayloadError::NoMembersArray)?;
    let array = bracketed_array(&decoded[key_pos + MEMBERS_KEY.len()..])
        .ok_or(PayloadError::NoMembersArray)?;

    Ok(serde_json::from_str(array)?)
}

/// Body of a string literal up to the first unescaped quote
///
/// `src` starts right after the opening quote. Returns `None` when the literal
/// never closes.
pub fn scan_string_literal(src: &str) -> Option<&str> {
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(&src[..i]),
            _ => i += 1,
        }
    }
    None
}

/// Unescape the body of a JavaScript string literal
pub fn decode_string_literal(raw: &str) -> Result<String, PayloadError> {
    Ok(serde_json::from_str(&format!("\"{raw}\""))?)
}

/// First balanced `[...]` in `text`, ignoring brackets inside strings
pub fn bracketed_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        if in_string {
            match b {
                b'\\' => i += 1,
                b'"' => in_string = false,
                _ => {}
            }
        } else {
            match b {
                b'"' => in_string = true,
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[start..=i]);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Decode the `__NEXT_DATA__` script block
pub fn extract_next_data(html: &str) -> Result<Value, PayloadError> {
    let tag_pos = html.find(NEXT_DATA_ID).ok_or(PayloadError::NoNextData)?;
    let body_start = html[tag_pos..]
        .find('>')
        .map(|offset| tag_pos + offset + 1)
        .ok_or(PayloadError::NoNextData)?;
    let body_end = html[body_start..]
        .find(SCRIPT_END)
        .map(|offset| body_start + offset)
        .ok_or(PayloadError::NoNextData)?;

    Ok(serde_json::from_str(&html[body_start..body_end])?)
}

/// Depth-first search for the first `members` array anywhere in a document
pub fn find_members(value: &Value) -> Option<&Vec<Value>> {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(members)) = map.get("members") {
                return Some(members);
            }
            map.values().find_map(find_members)
        }
        Value::Array(items) => items.iter().find_map(find_members),
        _ => None,
    }
}

/// Members from the group JSON endpoint: a bare array or an object with `members`
pub fn members_from_api(value: Value) -> Option<Vec<Value>> {
    match value {
        Value::Array(items) => Some(items),
        Value::Object(mut map) => match map.remove("members") {
            Some(Value::Array(items)) => Some(items),
            _ => None,
        },
        _ => None,
    }
}
