//! Data types for the share-data plugin.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Action kind of an incoming share event.
///
/// Wire values are the Android intent action strings; anything the native
/// layer sends that is not one of the four recognized actions maps to
/// [`ShareAction::Other`] and is ignored by the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareAction {
    /// A single item shared to this app (the default send action).
    #[serde(rename = "android.intent.action.SEND")]
    Send,
    /// Several items shared at once.
    #[serde(rename = "android.intent.action.SEND_MULTIPLE")]
    SendMultiple,
    /// A send-to request carrying a data string (e.g. a `mailto:` URI).
    #[serde(rename = "android.intent.action.SENDTO")]
    SendTo,
    /// A view request carrying a data string.
    #[serde(rename = "android.intent.action.VIEW")]
    View,
    /// Any other action.
    #[serde(other)]
    Other,
}

impl ShareAction {
    /// Map a raw intent action string to its variant.
    pub fn from_action(action: &str) -> Self {
        match action {
            "android.intent.action.SEND" => Self::Send,
            "android.intent.action.SEND_MULTIPLE" => Self::SendMultiple,
            "android.intent.action.SENDTO" => Self::SendTo,
            "android.intent.action.VIEW" => Self::View,
            _ => Self::Other,
        }
    }
}

/// Opaque, event-scoped reference to one shared content item.
///
/// A handle is a capability, not data: it only becomes bytes, a display
/// name and a media type by going through a
/// [`ContentResolver`](crate::ContentResolver). Handles are invalid once
/// the event that carried them is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHandle(String);

impl ContentHandle {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    /// The raw locator string, e.g. `content://provider/doc/report.pdf`.
    pub fn locator(&self) -> &str {
        &self.0
    }

    /// Final path segment of the locator, used as the display-name fallback
    /// when the platform has no metadata row for the handle.
    pub(crate) fn file_name(&self) -> Option<&str> {
        let path = self.0.splitn(2, "://").nth(1).unwrap_or(&self.0);
        path.rsplit('/').next().filter(|segment| !segment.is_empty())
    }
}

/// An OS-delivered share event, as forwarded by the host.
///
/// The host forwards these at two points: process cold start (the intent
/// that launched the app) and every delivery while the app is already
/// running. Both are treated identically.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareEvent {
    /// The intent's action kind.
    pub action: ShareAction,
    /// The event-level declared media type, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Ordered content handles from the intent's stream slot. Order is
    /// preserved and becomes the index order of the result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub streams: Vec<ContentHandle>,
    /// Textual payload for send-to / view events (a URI or plain text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_string: Option<String>,
}

/// A single value inside a [`ShareResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShareValue {
    /// Text payloads, declared mime types, resolved names and types.
    Text(String),
    /// Item counts (the `length` key).
    Int(i64),
    /// Raw content bytes (the `data.<i>` keys).
    Bytes(Vec<u8>),
}

/// The normalized outcome of one share event: a flat map of primitives.
///
/// Keys are `mimeType`, `length` and per-index `data.<i>` / `name.<i>` /
/// `type.<i>` for attachment payloads, or a single `text` key for textual
/// payloads. Exactly one of the two families is populated per result, and
/// `length` is present only with the attachment family. Consumers must use
/// key absence, not a null sentinel, to detect "not declared".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareResult(BTreeMap<String, ShareValue>);

impl ShareResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), ShareValue::Text(value.into()));
    }

    pub(crate) fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.0.insert(key.into(), ShareValue::Int(value));
    }

    pub(crate) fn set_bytes(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.0.insert(key.into(), ShareValue::Bytes(value));
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&ShareValue> {
        self.0.get(key)
    }

    /// Number of keys in the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShareValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

/// Payload emitted with the `share-received` event after a share event was
/// normalized and stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareReceivedPayload {
    /// Action kind of the event that produced the result.
    pub action: ShareAction,
    /// Number of attachment items in the result (0 for text-only shares).
    pub item_count: usize,
    /// Timestamp when the share was normalized (milliseconds since epoch).
    pub timestamp: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_string() {
        assert_eq!(
            ShareAction::from_action("android.intent.action.SEND"),
            ShareAction::Send
        );
        assert_eq!(
            ShareAction::from_action("android.intent.action.SEND_MULTIPLE"),
            ShareAction::SendMultiple
        );
        assert_eq!(
            ShareAction::from_action("android.intent.action.SENDTO"),
            ShareAction::SendTo
        );
        assert_eq!(
            ShareAction::from_action("android.intent.action.VIEW"),
            ShareAction::View
        );
        assert_eq!(
            ShareAction::from_action("android.intent.action.MAIN"),
            ShareAction::Other
        );
    }

    #[test]
    fn test_event_deserializes_from_native_json() {
        let event: ShareEvent = serde_json::from_str(
            r#"{
                "action": "android.intent.action.SEND_MULTIPLE",
                "mimeType": "image/*",
                "streams": ["content://media/1", "content://media/2"]
            }"#,
        )
        .unwrap();
        assert_eq!(event.action, ShareAction::SendMultiple);
        assert_eq!(event.mime_type.as_deref(), Some("image/*"));
        assert_eq!(event.streams.len(), 2);
        assert_eq!(event.streams[0].locator(), "content://media/1");
        assert_eq!(event.data_string, None);
    }

    #[test]
    fn test_unknown_action_deserializes_to_other() {
        let event: ShareEvent =
            serde_json::from_str(r#"{"action": "android.intent.action.EDIT"}"#).unwrap();
        assert_eq!(event.action, ShareAction::Other);
    }

    #[test]
    fn test_result_serializes_flat() {
        let mut result = ShareResult::new();
        result.set_text("mimeType", "text/plain");
        result.set_int("length", 1);
        result.set_bytes("data.0", vec![1, 2, 3]);
        result.set_text("name.0", "note.txt");

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "mimeType": "text/plain",
                "length": 1,
                "data.0": [1, 2, 3],
                "name.0": "note.txt"
            })
        );
    }

    #[test]
    fn test_file_name_from_locator() {
        let handle = ContentHandle::new("content://provider/doc/report.pdf");
        assert_eq!(handle.file_name(), Some("report.pdf"));

        let handle = ContentHandle::new("file:///tmp/photo.jpg");
        assert_eq!(handle.file_name(), Some("photo.jpg"));

        let handle = ContentHandle::new("content://");
        assert_eq!(handle.file_name(), None);
    }
}
