//! The JSON envelope sent as the body of every RPC request.

use serde::Serialize;
use serde_json::{Map, Value};

/// Outbound request body: `{"method": ..., "arguments": {...}, "tag": ...}`.
///
/// `arguments` and `tag` are left out of the JSON entirely when not supplied;
/// an empty argument map counts as not supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallEnvelope<'a> {
    pub method: &'a str,
    #[serde(skip_serializing_if = "no_arguments")]
    pub arguments: &'a Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<&'a str>,
}

fn no_arguments(arguments: &&Map<String, Value>) -> bool {
    arguments.is_empty()
}

impl<'a> CallEnvelope<'a> {
    pub fn new(method: &'a str, arguments: &'a Map<String, Value>, tag: Option<&'a str>) -> Self {
        Self {
            method,
            arguments,
            tag,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn encode(envelope: &CallEnvelope<'_>) -> Value {
        serde_json::from_slice(&envelope.to_json().unwrap()).unwrap()
    }

    #[test]
    fn test_method_only() {
        let args = Map::new();
        let envelope = CallEnvelope::new("session-get", &args, None);
        assert_eq!(encode(&envelope), json!({"method": "session-get"}));
    }

    #[test]
    fn test_empty_arguments_and_tag_are_omitted() {
        let args = Map::new();
        let bytes = CallEnvelope::new("torrent-get", &args, None).to_json().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("arguments"));
        assert!(!text.contains("tag"));
        assert!(!text.contains("null"));
    }

    #[test]
    fn test_arguments_and_tag_included() {
        let args = json!({"fields": ["id", "name"], "ids": [1, 2]})
            .as_object()
            .cloned()
            .unwrap();
        let envelope = CallEnvelope::new("torrent-get", &args, Some("req-7"));
        assert_eq!(
            encode(&envelope),
            json!({
                "method": "torrent-get",
                "arguments": {"fields": ["id", "name"], "ids": [1, 2]},
                "tag": "req-7"
            })
        );
    }

    #[test]
    fn test_tag_without_arguments() {
        let args = Map::new();
        let envelope = CallEnvelope::new("session-stats", &args, Some("42"));
        assert_eq!(encode(&envelope), json!({"method": "session-stats", "tag": "42"}));
    }
}
