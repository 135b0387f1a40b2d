//! Response envelope decoding.
//!
//! A success body is either the bare payload or `{"data": <payload>}`. Errors
//! come in a few shapes, checked in this order:
//!
//! 1. `{"status": "error", "code": "...", "message": "..."}`
//! 2. `{"error": {"code": "...", "message": "..."}}`
//! 3. `{"error": "message", "code": "..."}`
//! 4. `{"errors": [{"error": "message", "param": "price"}, ...]}`

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::transport::RawResponse;

/// Longest body excerpt kept in a status error.
const BODY_EXCERPT_LEN: usize = 256;

/// Response decoding failures.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The server reported an error.
    #[error("{message}")]
    Api {
        code: Option<String>,
        message: String,
    },
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Non-2xx status with a body that is not an error envelope.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
}

impl ResponseError {
    /// Server error code, if the server sent one.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Decode a raw response into its payload.
pub fn decode(response: &RawResponse) -> Result<Value, ResponseError> {
    Ok(unwrap_data(parse(response)?))
}

/// Decode a raw response into `T`.
pub fn decode_into<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ResponseError> {
    let payload = decode(response)?;
    Ok(serde_json::from_value(payload)?)
}

/// Decode a raw response that answers with a status only.
///
/// The status is read from the envelope first, then from the payload.
pub fn decode_status(response: &RawResponse) -> Result<bool, ResponseError> {
    let value = parse(response)?;
    if value.get("status").is_some_and(Value::is_string) {
        return Ok(is_success_status(&value));
    }
    Ok(is_success_status(&unwrap_data(value)))
}

fn parse(response: &RawResponse) -> Result<Value, ResponseError> {
    let body = response.body.trim();
    let value: Value = if body.is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(body) {
            Ok(value) => value,
            Err(_) if !response.is_success() => return Err(status_error(response)),
            Err(e) => return Err(e.into()),
        }
    };

    if let Some((code, message)) = api_error(&value) {
        return Err(ResponseError::Api { code, message });
    }
    if !response.is_success() {
        return Err(status_error(response));
    }

    Ok(value)
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Whether a payload reports success, either as `{"status": "success"}` or as
/// the bare string `"success"`.
pub fn is_success_status(payload: &Value) -> bool {
    let status = match payload {
        Value::Object(map) => map.get("status").and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    };
    status.is_some_and(|s| s.eq_ignore_ascii_case("success"))
}

fn status_error(response: &RawResponse) -> ResponseError {
    ResponseError::Status {
        status: response.status,
        body: response.body.chars().take(BODY_EXCERPT_LEN).collect(),
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn api_error(value: &Value) -> Option<(Option<String>, String)> {
    let Value::Object(map) = value else {
        return None;
    };

    if map.get("status").and_then(Value::as_str) == Some("error") {
        let message = string_field(value, "message")
            .or_else(|| string_field(value, "error"))
            .unwrap_or_else(|| "unknown error".to_string());
        return Some((string_field(value, "code"), message));
    }

    match map.get("error") {
        Some(error @ Value::Object(_)) => {
            let message = string_field(error, "message")
                .or_else(|| string_field(error, "error"))
                .unwrap_or_else(|| error.to_string());
            return Some((string_field(error, "code"), message));
        }
        Some(Value::String(message)) if !message.is_empty() => {
            return Some((string_field(value, "code"), message.clone()));
        }
        _ => {}
    }

    if let Some(Value::Array(errors)) = map.get("errors") {
        let messages: Vec<String> = errors.iter().filter_map(error_item_message).collect();
        if !messages.is_empty() {
            return Some((string_field(value, "code"), messages.join(", ")));
        }
    }

    None
}

fn error_item_message(item: &Value) -> Option<String> {
    match item {
        Value::String(s) => Some(s.clone()),
        Value::Object(_) => {
            let message = string_field(item, "error").or_else(|| string_field(item, "message"))?;
            Some(match string_field(item, "param") {
                Some(param) => format!("{} {}", message, param),
                None => message,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(body: &str) -> RawResponse {
        RawResponse::new(200, body)
    }

    #[test]
    fn test_status_error_shape() {
        let err = decode(&ok(
            r#"{"status": "error", "code": "BITPAY-INVOICE-GET", "message": "not found"}"#,
        ))
        .unwrap_err();
        assert_eq!(err.api_code(), Some("BITPAY-INVOICE-GET"));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn test_error_object_shape() {
        let err = decode(&RawResponse::new(
            400,
            r#"{"error": {"code": "010207", "message": "Invalid token"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.api_code(), Some("010207"));
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[test]
    fn test_error_string_shape() {
        let err = decode(&RawResponse::new(401, r#"{"error": "Unauthorized"}"#)).unwrap_err();
        assert_eq!(err.api_code(), None);
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[test]
    fn test_errors_array_shape() {
        let err = decode(&ok(
            r#"{"errors": [{"error": "Missing parameter", "param": "price"}, "Bad currency"]}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing parameter price, Bad currency");
    }

    #[test]
    fn test_data_unwrapped() {
        let value = decode(&ok(r#"{"data": {"id": "abc", "status": "paid"}, "facade": "merchant/invoice"}"#))
            .unwrap();
        assert_eq!(value, json!({"id": "abc", "status": "paid"}));
    }

    #[test]
    fn test_bare_payload_and_empty_body() {
        assert_eq!(decode(&ok(r#"[{"code": "BTC"}]"#)).unwrap(), json!([{"code": "BTC"}]));
        assert_eq!(decode(&ok("  ")).unwrap(), Value::Null);
    }

    #[test]
    fn test_empty_error_string_is_not_an_error() {
        let value = decode(&ok(r#"{"error": "", "id": "x"}"#)).unwrap();
        assert_eq!(value["id"], "x");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            decode(&ok("<html>")),
            Err(ResponseError::Json(_))
        ));
        assert!(matches!(
            decode(&RawResponse::new(502, "<html>Bad Gateway</html>")),
            Err(ResponseError::Status { status: 502, .. })
        ));
    }

    #[test]
    fn test_non_success_without_error_shape() {
        let err = decode(&RawResponse::new(500, r#"{"data": {}}"#)).unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_success_status() {
        assert!(is_success_status(&json!({"status": "Success"})));
        assert!(is_success_status(&json!("success")));
        assert!(!is_success_status(&json!({"status": "failed"})));
        assert!(!is_success_status(&json!(true)));
    }

    #[test]
    fn test_decode_status() {
        assert!(decode_status(&ok(r#"{"status": "success", "data": {}}"#)).unwrap());
        assert!(decode_status(&ok(r#"{"data": "Success"}"#)).unwrap());
        assert!(!decode_status(&ok(r#"{"status": "failed", "data": "success"}"#)).unwrap());
        assert!(decode_status(&ok(r#"{"status": "error", "message": "nope"}"#)).is_err());
    }

    #[test]
    fn test_decode_into() {
        #[derive(serde::Deserialize)]
        struct Item {
            id: String,
        }
        let item: Item = decode_into(&ok(r#"{"data": {"id": "x", "extra": 1}}"#)).unwrap();
        assert_eq!(item.id, "x");
    }
}
