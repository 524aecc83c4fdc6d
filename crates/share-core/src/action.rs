//! Capabilities supplied by the native host.
//!
//! The core never builds or launches platform actions, downloads files or
//! talks to the web layer itself; it goes through these traits.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::context::RequestContext;
use crate::error::ShareError;
use crate::request::{MediaItem, ShareRequest};

pub const ACK_KEY: &str = "cobalt.share";
pub const ACK_VALUE: &str = "share completed";

/// Payload sent back to the web layer after a share was handed to the
/// platform.
pub fn share_ack() -> Value {
    json!({ ACK_KEY: ACK_VALUE })
}

/// Description of a platform share action.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformAction {
    pub action: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
    /// Set when the action must be presented through a chooser.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chooser_title: Option<String>,
}

impl PlatformAction {
    pub fn new(action: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            mime_type: mime_type.into(),
            ..Default::default()
        }
    }

    pub fn with_data_uri(mut self, data_uri: impl Into<String>) -> Self {
        self.data_uri = Some(data_uri.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}

/// Builds and launches platform actions.
pub trait ActionInvoker: Send + Sync {
    /// Returns `None` when no action can be built for the request.
    fn build(&self, request: &ShareRequest, ctx: &RequestContext) -> Option<PlatformAction>;

    fn launch(&self, action: PlatformAction, ctx: &RequestContext) -> Result<(), String>;
}

/// Downloads remote media into local storage.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Fetches `item` into `dest_dir` and returns the local file path.
    async fn fetch(&self, item: &MediaItem, dest_dir: &Path) -> Result<PathBuf, String>;
}

/// Channel back to the web layer.
pub trait BridgeCallback: Send + Sync {
    fn send(&self, callback_id: &str, payload: Value);

    /// Reports a share that could not be completed, including failures of
    /// deferred work.
    fn failed(&self, callback_id: Option<&str>, error: &ShareError);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_payload_is_verbatim() {
        assert_eq!(
            serde_json::to_string(&share_ack()).expect("serialize"),
            r#"{"cobalt.share":"share completed"}"#
        );
    }

    #[test]
    fn builder_helpers_fill_action() {
        let action = PlatformAction::new("send", "text/plain")
            .with_data_uri("content://x/1")
            .with_extra("subject", "Hi");

        assert_eq!(action.action, "send");
        assert_eq!(action.data_uri.as_deref(), Some("content://x/1"));
        assert_eq!(action.extras.get("subject").map(String::as_str), Some("Hi"));
        assert_eq!(action.chooser_title, None);
    }
}
