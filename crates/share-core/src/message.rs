//! Field access over the raw JSON object received from the web layer.
//!
//! Every share field is a string. A key can be absent, hold a string, or
//! hold some other JSON value; the last case is reported as malformed and is
//! never folded into "absent". A JSON `null` counts as absent.

use serde_json::{Map, Value};

use crate::error::{Result, ShareError};

#[derive(Debug, Clone, Copy)]
pub struct RawMessage<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> RawMessage<'a> {
    pub fn new(fields: &'a Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Wraps a JSON value, which must be an object.
    pub fn from_value(value: &'a Value) -> Result<Self> {
        value
            .as_object()
            .map(Self::new)
            .ok_or_else(|| ShareError::InvalidMessage("expected a JSON object".to_string()))
    }

    pub fn has(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(value) if !value.is_null())
    }

    pub fn get(&self, key: &str) -> Result<Option<&'a str>> {
        match self.fields.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(ShareError::malformed(key)),
        }
    }

    pub fn get_owned(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key)?.map(str::to_string))
    }

    pub fn require(&self, key: &str) -> Result<&'a str> {
        self.get(key)?.ok_or_else(|| ShareError::missing(key))
    }

    pub fn require_owned(&self, key: &str) -> Result<String> {
        self.require(key).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("fixture must be an object")
    }

    #[test]
    fn absent_present_and_malformed_are_distinct() {
        let fields = object(json!({ "title": "hi", "count": 3, "empty": null }));
        let message = RawMessage::new(&fields);

        assert_eq!(message.get("title"), Ok(Some("hi")));
        assert_eq!(message.get("missing"), Ok(None));
        assert_eq!(message.get("empty"), Ok(None));
        assert_eq!(message.get("count"), Err(ShareError::malformed("count")));
    }

    #[test]
    fn require_reports_the_missing_key() {
        let fields = object(json!({ "type": "text" }));
        let message = RawMessage::new(&fields);

        assert_eq!(message.require("type"), Ok("text"));
        assert_eq!(message.require("content"), Err(ShareError::missing("content")));
    }

    #[test]
    fn require_does_not_hide_a_wrong_type() {
        let fields = object(json!({ "content": ["a", "b"] }));
        let message = RawMessage::new(&fields);

        assert_eq!(
            message.require("content"),
            Err(ShareError::malformed("content"))
        );
    }

    #[test]
    fn null_does_not_count_as_present() {
        let fields = object(json!({ "path": null, "local": "icon.png" }));
        let message = RawMessage::new(&fields);

        assert!(!message.has("path"));
        assert!(message.has("local"));
    }

    #[test]
    fn non_object_values_are_rejected() {
        let value = json!(["type", "text"]);
        assert!(matches!(
            RawMessage::from_value(&value),
            Err(ShareError::InvalidMessage(_))
        ));
    }
}
