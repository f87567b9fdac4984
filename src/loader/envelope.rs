//! Relay Envelope Validation
//!
//! Turns a raw relay reply into blocks or a [`LoadError`]. A reply only
//! counts as success when its body holds a `results` array, whatever the
//! HTTP status says.

use serde::Deserialize;

use super::error::LoadError;
use super::transport::RelayReply;
use crate::notion::Block;

/// Error fields the relay may send back
#[derive(Debug, Deserialize)]
struct ErrorFields {
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Validate a relay reply and extract its blocks
pub fn interpret(reply: &RelayReply) -> Result<Vec<Block>, LoadError> {
    let parsed: Option<serde_json::Value> = serde_json::from_str(&reply.body).ok();

    if let Some(detail) = parsed.as_ref().and_then(error_detail) {
        return Err(if reply.is_success() {
            LoadError::Relay(detail)
        } else {
            LoadError::Status {
                status: reply.status,
                detail,
            }
        });
    }

    if !reply.is_success() {
        let detail = match reply.body.trim() {
            "" => "no response body".to_string(),
            text => text.to_string(),
        };
        return Err(LoadError::Status {
            status: reply.status,
            detail,
        });
    }

    let body = parsed.ok_or_else(|| LoadError::Malformed("body is not valid JSON".to_string()))?;

    let results = body
        .get("results")
        .ok_or_else(|| LoadError::Malformed("missing `results` field".to_string()))?;

    if !results.is_array() {
        return Err(LoadError::Malformed("`results` is not an array".to_string()));
    }

    serde_json::from_value::<Vec<Block>>(results.clone())
        .map_err(|e| LoadError::Malformed(format!("invalid block: {}", e)))
}

/// Pull a readable error out of `{ error, message? }`, if present
fn error_detail(body: &serde_json::Value) -> Option<String> {
    let fields: ErrorFields = serde_json::from_value(body.clone()).ok()?;

    let error = match fields.error? {
        serde_json::Value::Null => return None,
        serde_json::Value::String(s) => s,
        serde_json::Value::Object(obj) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| serde_json::Value::Object(obj).to_string()),
        other => other.to_string(),
    };

    Some(match fields.message {
        Some(message) if !message.is_empty() && message != error => {
            format!("{} ({})", error, message)
        }
        _ => error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(status: u16, body: &str) -> RelayReply {
        RelayReply {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_hello_paragraph() {
        let blocks = interpret(&reply(
            200,
            r#"{"results":[{"type":"paragraph","paragraph":{"rich_text":[{"plain_text":"Hello"}]}}]}"#,
        ))
        .unwrap();

        assert_eq!(blocks, vec![Block::paragraph(["Hello"])]);
    }

    #[test]
    fn test_empty_results() {
        let blocks = interpret(&reply(200, r#"{"object":"list","results":[]}"#)).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_preserves_order() {
        let blocks = interpret(&reply(
            200,
            r#"{"results":[
                {"type":"heading_1"},
                {"type":"paragraph","paragraph":{"rich_text":[{"plain_text":"a"}]}},
                {"type":"image"},
                {"type":"paragraph","paragraph":{"rich_text":[{"plain_text":"b"}]}}
            ]}"#,
        ))
        .unwrap();

        let types: Vec<_> = blocks.iter().map(|b| b.block_type.as_str()).collect();
        assert_eq!(types, ["heading_1", "paragraph", "image", "paragraph"]);
    }

    #[test]
    fn test_error_only_body_with_ok_status() {
        let err = interpret(&reply(200, r#"{"error":"boom"}"#)).unwrap_err();
        assert!(matches!(err, LoadError::Relay(ref d) if d == "boom"));
    }

    #[test]
    fn test_nested_error_message() {
        let err = interpret(&reply(200, r#"{"error":{"message":"x"}}"#)).unwrap_err();
        assert_eq!(err, LoadError::Relay("x".to_string()));
    }

    #[test]
    fn test_error_envelope_with_500() {
        let err = interpret(&reply(
            500,
            r#"{"error":"Notion token is not configured","message":"Please set NOTION_TOKEN in the relay environment"}"#,
        ))
        .unwrap_err();

        match err {
            LoadError::Status { status, detail } => {
                assert_eq!(status, 500);
                assert!(detail.starts_with("Notion token is not configured"));
                assert!(detail.contains("NOTION_TOKEN"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_results_alongside_error_is_still_error() {
        let err = interpret(&reply(200, r#"{"results":[],"error":"partial"}"#)).unwrap_err();
        assert!(matches!(err, LoadError::Relay(_)));
    }

    #[test]
    fn test_null_error_is_ignored() {
        let blocks = interpret(&reply(200, r#"{"results":[],"error":null}"#)).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_missing_results() {
        let err = interpret(&reply(200, r#"{"object":"list"}"#)).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_results_not_array() {
        let err = interpret(&reply(200, r#"{"results":{"type":"paragraph"}}"#)).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(ref d) if d.contains("not an array")));
    }

    #[test]
    fn test_non_json_success_body() {
        let err = interpret(&reply(200, "<html>gateway</html>")).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(_)));
    }

    #[test]
    fn test_non_json_failure_body() {
        let err = interpret(&reply(502, "Bad Gateway")).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Status { status: 502, ref detail } if detail == "Bad Gateway"
        ));
    }

    #[test]
    fn test_results_with_bad_status_is_error() {
        let err = interpret(&reply(503, r#"{"results":[]}"#)).unwrap_err();
        assert!(matches!(err, LoadError::Status { status: 503, .. }));
    }

    #[test]
    fn test_block_without_type_is_malformed() {
        let err = interpret(&reply(200, r#"{"results":[{"paragraph":{}}]}"#)).unwrap_err();
        assert!(matches!(err, LoadError::Malformed(ref d) if d.starts_with("invalid block")));
    }
}
