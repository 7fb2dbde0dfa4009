use axum::extract::{FromRequest, Request};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Request bodies that can be bound from a JSON object
pub trait JsonFields: DeserializeOwned + Default {
    /// The JSON keys of the type, as it serializes them
    const FIELDS: &'static [&'static str];
}

/// JSON request body extractor.
///
/// Unlike `axum::Json` this ignores the `Content-Type` header and turns every
/// failure (unreadable body, malformed JSON, non-object JSON, wrong field
/// types) into [`ApiError::InvalidBody`], so clients always get a 400 with an
/// `{"error": ...}` body. A `null` body binds to `T::default()` and keys match
/// field names case-insensitively.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: JsonFields,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        decode(&bytes).map(JsonBody)
    }
}

/// Decode a JSON object (or `null`) into `T`
pub fn decode<T: JsonFields>(bytes: &[u8]) -> Result<T, ApiError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    let object = match value {
        Value::Null => return Ok(T::default()),
        Value::Object(object) => object,
        other => {
            return Err(ApiError::InvalidBody(format!(
                "expected a JSON object, found {}",
                kind_of(&other)
            )))
        }
    };

    serde_json::from_value(Value::Object(canonical_keys(object, T::FIELDS)))
        .map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// Rename keys that match a field name ignoring case. An exact match wins over
/// a case-insensitive one for the same field.
fn canonical_keys(object: Map<String, Value>, fields: &[&str]) -> Map<String, Value> {
    let mut exact = Map::new();
    let mut folded = Map::new();

    for (key, value) in object {
        if fields.contains(&key.as_str()) {
            exact.insert(key, value);
        } else if let Some(field) = fields.iter().find(|f| f.eq_ignore_ascii_case(&key)) {
            folded.insert(field.to_string(), value);
        }
    }

    for (key, value) in folded {
        exact.entry(key).or_insert(value);
    }
    exact
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Event;

    fn message(err: ApiError) -> String {
        match err {
            ApiError::InvalidBody(msg) => msg,
        }
    }

    #[test]
    fn empty_body_is_rejected() {
        let err = decode::<Event>(b"").unwrap_err();
        assert!(message(err).contains("EOF"));
    }

    #[test]
    fn truncated_json_is_rejected() {
        let err = decode::<Event>(br#"{"title": "Standup""#).unwrap_err();
        assert!(!message(err).is_empty());
    }

    #[test]
    fn null_body_binds_defaults() {
        let event: Event = decode(b"null").unwrap();
        assert_eq!(event, Event::default());
    }

    #[test]
    fn keys_match_ignoring_case() {
        let event: Event = decode(br#"{"Title": "Standup", "CALENDARID": "2"}"#).unwrap();
        assert_eq!(event.title, "Standup");
        assert_eq!(event.calendar_id, "2");
    }

    #[test]
    fn exact_key_wins_over_folded_key() {
        let event: Event = decode(br#"{"TITLE": "loud", "title": "quiet"}"#).unwrap();
        assert_eq!(event.title, "quiet");
    }

    #[test]
    fn arrays_are_not_objects() {
        let err = decode::<Event>(b"[]").unwrap_err();
        assert_eq!(message(err), "expected a JSON object, found an array");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let event: Event = decode(br#"{"title": "Standup", "color": "red"}"#).unwrap();
        assert_eq!(event.title, "Standup");
    }
}
