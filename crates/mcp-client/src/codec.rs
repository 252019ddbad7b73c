//! Response codec: pulls the payload out of a tool response envelope.
//!
//! Extraction is structured-first: a present `structuredContent` wins and is
//! returned as-is. Otherwise the first `text` part is parsed as JSON. Later
//! text parts are never consulted, even when the first one fails to parse.
//!
//! # Examples
//!
//! ```
//! use mcp_toolgen_client::codec;
//! use mcp_toolgen_core::ToolResponseEnvelope;
//! use serde_json::json;
//!
//! let envelope = ToolResponseEnvelope::text(r#"{"result": 4}"#);
//! assert_eq!(codec::extract(&envelope).unwrap(), json!({"result": 4}));
//! ```

use mcp_toolgen_core::{Error, Result, ToolResponseEnvelope};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extracts the payload of `envelope`.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if there is no structured payload and
/// either no text part exists or the first one is not valid JSON.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_client::codec;
/// use mcp_toolgen_core::{ContentPart, ToolResponseEnvelope};
/// use serde_json::json;
///
/// let envelope = ToolResponseEnvelope {
///     content: vec![ContentPart::text(r#"{"x": 2}"#)],
///     structured_content: Some(json!({"x": 1})),
///     is_error: None,
/// };
///
/// // structured content takes precedence over the text mirror
/// assert_eq!(codec::extract(&envelope).unwrap(), json!({"x": 1}));
/// ```
pub fn extract(envelope: &ToolResponseEnvelope) -> Result<Value> {
    if let Some(structured) = &envelope.structured_content {
        return Ok(structured.clone());
    }

    let text = envelope
        .first_text()
        .ok_or_else(|| Error::MalformedResponse {
            reason: "response has no structured content and no text entry".to_string(),
        })?;

    serde_json::from_str(text).map_err(|e| {
        tracing::debug!("text fallback is not JSON: {text}");
        Error::MalformedResponse {
            reason: format!("text entry is not valid JSON: {e}"),
        }
    })
}

/// Extracts the payload of `envelope` and deserializes it into `T`.
///
/// # Errors
///
/// Returns [`Error::MalformedResponse`] if extraction fails or the payload
/// does not have the shape of `T`.
///
/// # Examples
///
/// ```
/// use mcp_toolgen_client::codec;
/// use mcp_toolgen_core::ToolResponseEnvelope;
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Deserialize)]
/// struct AddOutput {
///     result: f64,
/// }
///
/// let envelope = ToolResponseEnvelope::structured(json!({"result": 4}));
/// let output: AddOutput = codec::extract_as(&envelope).unwrap();
/// assert!((output.result - 4.0).abs() < f64::EPSILON);
/// ```
pub fn extract_as<T: DeserializeOwned>(envelope: &ToolResponseEnvelope) -> Result<T> {
    let payload = extract(envelope)?;
    serde_json::from_value(payload).map_err(|e| Error::MalformedResponse {
        reason: format!("payload does not match the expected shape: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcp_toolgen_core::ContentPart;
    use serde_json::json;

    fn envelope(content: Vec<ContentPart>, structured: Option<Value>) -> ToolResponseEnvelope {
        ToolResponseEnvelope {
            content,
            structured_content: structured,
            is_error: None,
        }
    }

    #[test]
    fn test_structured_content_wins() {
        let env = envelope(
            vec![ContentPart::text(r#"{"x":2}"#)],
            Some(json!({"x": 1})),
        );
        assert_eq!(extract(&env).unwrap(), json!({"x": 1}));
    }

    #[test]
    fn test_structured_content_is_not_reparsed() {
        let env = envelope(vec![], Some(json!("{\"looks\": \"like json\"}")));
        assert_eq!(extract(&env).unwrap(), json!("{\"looks\": \"like json\"}"));
    }

    #[test]
    fn test_text_fallback() {
        let env = envelope(vec![ContentPart::text(r#"{"result":4}"#)], None);
        assert_eq!(extract(&env).unwrap(), json!({"result": 4}));
    }

    #[test]
    fn test_fallback_skips_non_text_parts() {
        let image = ContentPart {
            kind: "image".to_string(),
            text: None,
        };
        let env = envelope(
            vec![image, ContentPart::text("[1, 2, 3]"), ContentPart::text("{}")],
            None,
        );
        assert_eq!(extract(&env).unwrap(), json!([1, 2, 3]));
    }

    #[test]
    fn test_empty_envelope_is_malformed() {
        let err = extract(&envelope(vec![], None)).unwrap_err();
        assert!(err.is_malformed_response());
    }

    #[test]
    fn test_invalid_first_text_is_malformed() {
        let env = envelope(
            vec![
                ContentPart::text("Division by zero is not allowed"),
                ContentPart::text(r#"{"result": 0}"#),
            ],
            None,
        );
        let err = extract(&env).unwrap_err();
        assert!(err.is_malformed_response());
        assert!(err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn test_extract_as_shape_mismatch() {
        #[derive(Debug, serde::Deserialize)]
        struct Output {
            #[allow(dead_code)]
            result: f64,
        }

        let env = envelope(vec![], Some(json!({"files": []})));
        let err = extract_as::<Output>(&env).unwrap_err();
        assert!(err.is_malformed_response());
    }
}
