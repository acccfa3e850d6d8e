//! SSE (Server-Sent Events) parser for the realtime database stream.
//!
//! The database streaming endpoint speaks plain SSE:
//! - `event: <type>` - event type line
//! - `data: <json>` - data payload line
//! - Empty line - signals end of event
//! - Lines starting with `:` - keep-alive comments (ignored)
//!
//! The interesting event types are `put` (complete or partial replacement
//! at a path), `patch` (children merged at a path), `keep-alive`, and
//! `auth_revoked`. We subscribe at the collection root, so a `put` with
//! path `/` carries a whole snapshot of the user's collection.

use serde::Deserialize;
use thiserror::Error;

/// A single parsed line from the SSE stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    Event(String),
    Data(String),
    Comment(String),
    Empty,
}

/// A complete typed event from the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// The data at `path` was replaced with `data`.
    Put { path: String, data: serde_json::Value },
    /// The children in `data` were merged at `path`.
    Patch { path: String, data: serde_json::Value },
    /// Periodic keep-alive; carries no data.
    KeepAlive,
    /// The auth credential is no longer valid; the stream is about to close.
    AuthRevoked,
}

/// Parse errors for the stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SseParseError {
    /// Invalid JSON in a data payload.
    #[error("Invalid JSON for event '{event_type}': {detail}")]
    InvalidJson { event_type: String, detail: String },
    /// An event arrived with no data line where one is required.
    #[error("Missing data for event type: {event_type}")]
    MissingData { event_type: String },
}

/// Parse a single SSE line into its component type.
pub fn parse_sse_line(line: &str) -> SseLine {
    if line.is_empty() {
        return SseLine::Empty;
    }

    if let Some(stripped) = line.strip_prefix(':') {
        return SseLine::Comment(stripped.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim().to_string());
    }

    // Unknown line format - treat as comment
    SseLine::Comment(line.to_string())
}

#[derive(Debug, Deserialize)]
struct PutPayload {
    path: String,
    #[serde(default)]
    data: serde_json::Value,
}

/// Parse an event type and accumulated data into a typed StreamEvent.
///
/// Unknown event types are treated as keep-alives instead of erroring;
/// the feed adding an event type must not break older clients.
pub fn parse_stream_event(event_type: &str, data: &str) -> Result<StreamEvent, SseParseError> {
    match event_type {
        "put" | "patch" => {
            if data.is_empty() {
                return Err(SseParseError::MissingData {
                    event_type: event_type.to_string(),
                });
            }
            let payload: PutPayload =
                serde_json::from_str(data).map_err(|e| SseParseError::InvalidJson {
                    event_type: event_type.to_string(),
                    detail: e.to_string(),
                })?;
            if event_type == "put" {
                Ok(StreamEvent::Put {
                    path: payload.path,
                    data: payload.data,
                })
            } else {
                Ok(StreamEvent::Patch {
                    path: payload.path,
                    data: payload.data,
                })
            }
        }
        "keep-alive" => Ok(StreamEvent::KeepAlive),
        "auth_revoked" => Ok(StreamEvent::AuthRevoked),
        "cancel" => Ok(StreamEvent::AuthRevoked),
        _ => Ok(StreamEvent::KeepAlive),
    }
}

/// Stateful SSE parser: accumulates lines until a complete event is seen.
#[derive(Debug, Default)]
pub struct SseParser {
    pending_event: Option<String>,
    pending_data: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a line to the parser, potentially returning a complete event.
    ///
    /// Returns `Ok(Some(event))` when the empty separator line completes an
    /// event, `Ok(None)` while accumulating, and an error only for events
    /// with malformed payloads (the parser state is reset either way).
    pub fn feed_line(&mut self, line: &str) -> Result<Option<StreamEvent>, SseParseError> {
        match parse_sse_line(line) {
            SseLine::Event(event_type) => {
                self.pending_event = Some(event_type);
                Ok(None)
            }
            SseLine::Data(data) => {
                self.pending_data.push(data);
                Ok(None)
            }
            SseLine::Comment(_) => Ok(None),
            SseLine::Empty => {
                let Some(event_type) = self.pending_event.take() else {
                    self.pending_data.clear();
                    return Ok(None);
                };
                let data = self.pending_data.join("\n");
                self.pending_data.clear();
                let event = parse_stream_event(&event_type, &data)?;
                Ok(Some(event))
            }
        }
    }

    /// Reset the parser state, e.g. when a stream reconnects.
    pub fn reset(&mut self) {
        self.pending_event = None;
        self.pending_data.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sse_line_variants() {
        assert_eq!(parse_sse_line(""), SseLine::Empty);
        assert_eq!(
            parse_sse_line(": keepalive"),
            SseLine::Comment("keepalive".to_string())
        );
        assert_eq!(parse_sse_line("event: put"), SseLine::Event("put".to_string()));
        assert_eq!(
            parse_sse_line(r#"data: {"path":"/"}"#),
            SseLine::Data(r#"{"path":"/"}"#.to_string())
        );
    }

    #[test]
    fn test_parser_emits_put_event() {
        let mut parser = SseParser::new();
        assert!(parser.feed_line("event: put").unwrap().is_none());
        assert!(parser
            .feed_line(r#"data: {"path": "/", "data": {"k1": {"a": 1}}}"#)
            .unwrap()
            .is_none());
        let event = parser.feed_line("").unwrap().unwrap();
        assert_eq!(
            event,
            StreamEvent::Put {
                path: "/".to_string(),
                data: json!({"k1": {"a": 1}}),
            }
        );
    }

    #[test]
    fn test_parser_emits_patch_event() {
        let mut parser = SseParser::new();
        parser.feed_line("event: patch").unwrap();
        parser
            .feed_line(r#"data: {"path": "/k1", "data": {"title": "Mail"}}"#)
            .unwrap();
        let event = parser.feed_line("").unwrap().unwrap();
        assert!(matches!(event, StreamEvent::Patch { path, .. } if path == "/k1"));
    }

    #[test]
    fn test_null_data_decodes() {
        let mut parser = SseParser::new();
        parser.feed_line("event: put").unwrap();
        parser.feed_line(r#"data: {"path": "/", "data": null}"#).unwrap();
        let event = parser.feed_line("").unwrap().unwrap();
        assert_eq!(
            event,
            StreamEvent::Put {
                path: "/".to_string(),
                data: serde_json::Value::Null,
            }
        );
    }

    #[test]
    fn test_keep_alive_and_auth_revoked() {
        let mut parser = SseParser::new();
        parser.feed_line("event: keep-alive").unwrap();
        parser.feed_line("data: null").unwrap();
        assert_eq!(parser.feed_line("").unwrap(), Some(StreamEvent::KeepAlive));

        parser.feed_line("event: auth_revoked").unwrap();
        parser.feed_line("data: credential is no longer valid").unwrap();
        assert_eq!(parser.feed_line("").unwrap(), Some(StreamEvent::AuthRevoked));
    }

    #[test]
    fn test_unknown_event_is_ignored_as_keep_alive() {
        let mut parser = SseParser::new();
        parser.feed_line("event: shiny_new_thing").unwrap();
        parser.feed_line("data: {}").unwrap();
        assert_eq!(parser.feed_line("").unwrap(), Some(StreamEvent::KeepAlive));
    }

    #[test]
    fn test_comments_do_not_complete_events() {
        let mut parser = SseParser::new();
        parser.feed_line(": keepalive").unwrap();
        assert!(parser.feed_line("").unwrap().is_none());
    }

    #[test]
    fn test_invalid_json_errors_and_resets() {
        let mut parser = SseParser::new();
        parser.feed_line("event: put").unwrap();
        parser.feed_line("data: not json").unwrap();
        assert!(parser.feed_line("").unwrap_err().to_string().contains("put"));

        // Parser must be usable again after the error.
        parser.feed_line("event: keep-alive").unwrap();
        assert_eq!(parser.feed_line("").unwrap(), Some(StreamEvent::KeepAlive));
    }

    #[test]
    fn test_reset_clears_pending_state() {
        let mut parser = SseParser::new();
        parser.feed_line("event: put").unwrap();
        parser.reset();
        assert!(parser.feed_line("").unwrap().is_none());
    }
}
