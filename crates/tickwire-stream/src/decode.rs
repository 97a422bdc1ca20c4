//! Defensive decoding of inbound feed frames.

use serde::Deserialize;
use tickwire_types::Tick;
use tracing::trace;

/// A decoded inbound frame.
///
/// The feed interleaves data ticks with service acknowledgements; both
/// are decoded once here, at the boundary, into an explicit type.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Frame {
    /// Service acknowledgement, e.g. the post-subscribe authorization.
    Status(StatusMessage),
    /// A market data tick (any subset of its fields may be present).
    Tick(Tick),
}

/// A service acknowledgement from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusMessage {
    /// HTTP-style status code.
    #[serde(rename = "status_code")]
    pub code: u16,
    /// Optional human-readable message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Decodes one inbound payload.
///
/// Empty and non-JSON payloads are treated as empty messages, never as
/// errors: the stream must keep running whatever the feed sends.
#[must_use]
pub fn decode_frame(payload: &str) -> Option<Frame> {
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }
    match serde_json::from_str(payload) {
        Ok(frame) => Some(frame),
        Err(error) => {
            trace!(%error, "discarding undecodable frame");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_payload_is_noop() {
        assert_eq!(decode_frame(""), None);
        assert_eq!(decode_frame("   "), None);
    }

    #[test]
    fn test_non_json_payload_is_noop() {
        assert_eq!(decode_frame("not json"), None);
        assert_eq!(decode_frame("{truncated"), None);
    }

    #[test]
    fn test_status_frame() {
        let frame = decode_frame(r#"{"status_code":200,"message":"Authorized"}"#).unwrap();
        assert_eq!(
            frame,
            Frame::Status(StatusMessage {
                code: 200,
                message: Some("Authorized".to_string()),
            })
        );
    }

    #[test]
    fn test_tick_frame() {
        let frame = decode_frame(r#"{"s":"AAPL","p":150.0,"t":1650000000000}"#).unwrap();
        match frame {
            Frame::Tick(tick) => {
                assert_eq!(tick.symbol.as_deref(), Some("AAPL"));
                assert_eq!(tick.price, Some(150.0));
            }
            Frame::Status(_) => panic!("expected a tick"),
        }
    }

    #[test]
    fn test_unknown_object_decodes_as_empty_tick() {
        let frame = decode_frame(r#"{"foo":"bar"}"#).unwrap();
        match frame {
            Frame::Tick(tick) => assert!(tick.is_empty()),
            Frame::Status(_) => panic!("expected a tick"),
        }
    }
}
