//! Host-side capabilities used by the command line.
//!
//! Actions are described in Android intent terms and printed instead of
//! launched, remote media is downloaded with reqwest, and callbacks are
//! written to stdout as JSON lines.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, info};
use serde_json::{json, Value};
use share_core::{
    ActionInvoker, BridgeCallback, MediaItem, PathLocator, PlatformAction, RemoteFetcher,
    RequestContext, ShareError, ShareRequest, SourceKind,
};

pub const ACTION_SEND: &str = "android.intent.action.SEND";
pub const ACTION_INSERT: &str = "android.intent.action.INSERT";
pub const CONTACT_MIME_TYPE: &str = "vnd.android.cursor.dir/raw_contact";
pub const CONTENT_SCHEME: &str = "content://";

/// Describes share actions and prints them as JSON.
pub struct PrintingInvoker {
    /// Content provider authority serving bundled resources.
    authority: String,
}

impl PrintingInvoker {
    pub fn new(authority: impl Into<String>) -> Self {
        Self {
            authority: authority.into(),
        }
    }

    fn media_uri(&self, item: &MediaItem) -> String {
        match (&item.locator, item.source) {
            (PathLocator::Local(name), _) | (PathLocator::Path(name), SourceKind::Assets) => {
                format!("{CONTENT_SCHEME}{}/{}", self.authority, name.trim_start_matches('/'))
            }
            (PathLocator::Path(path), SourceKind::SdCard) if !path.contains("://") => {
                format!("file://{path}")
            }
            (PathLocator::Path(path), _) => path.clone(),
        }
    }
}

impl ActionInvoker for PrintingInvoker {
    fn build(&self, request: &ShareRequest, _ctx: &RequestContext) -> Option<PlatformAction> {
        let action = match request {
            ShareRequest::Text(text) => {
                let action = PlatformAction::new(ACTION_SEND, "text/plain")
                    .with_extra("android.intent.extra.TEXT", &text.content);
                match &text.title {
                    Some(title) => action.with_extra("android.intent.extra.SUBJECT", title),
                    None => action,
                }
            }
            ShareRequest::Contact(card) => card.present_fields().fold(
                PlatformAction::new(ACTION_INSERT, CONTACT_MIME_TYPE),
                |action, (key, value)| action.with_extra(key, value),
            ),
            ShareRequest::Media(item) => {
                let mut action = PlatformAction::new(ACTION_SEND, item.kind.mime_type())
                    .with_data_uri(self.media_uri(item));
                if let Some(title) = &item.title {
                    action = action.with_extra("android.intent.extra.SUBJECT", title);
                }
                if let Some(detail) = &item.detail {
                    action = action.with_extra("android.intent.extra.TEXT", detail);
                }
                action
            }
        };
        Some(action)
    }

    fn launch(&self, action: PlatformAction, ctx: &RequestContext) -> Result<(), String> {
        let line = json!({
            "launch": action,
            "callback": ctx.callback_id,
        });
        println!("{line}");
        Ok(())
    }
}

/// Downloads `url` sourced media over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

/// Picks a file name for a downloaded resource from the last URL segment.
pub fn file_name_for(url: &url::Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("download-{}", chrono::Utc::now().timestamp_millis()))
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, item: &MediaItem, dest_dir: &Path) -> Result<PathBuf, String> {
        let parsed = url::Url::parse(item.locator.as_str())
            .map_err(|e| format!("invalid URL: {e}"))?;

        info!("downloading {parsed}");
        let response = self
            .client
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("server answered {status}"));
        }

        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        let target = dest_dir.join(file_name_for(&parsed));
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| format!("cannot write {}: {e}", target.display()))?;

        debug!("{} bytes written to {}", bytes.len(), target.display());
        Ok(target)
    }
}

/// Writes callbacks to stdout, one JSON object per line.
pub struct StdoutCallback;

impl BridgeCallback for StdoutCallback {
    fn send(&self, callback_id: &str, payload: Value) {
        println!("{}", json!({ "callback": callback_id, "payload": payload }));
    }

    fn failed(&self, callback_id: Option<&str>, error: &ShareError) {
        error!("share failed: {error}");
        println!(
            "{}",
            json!({ "callback": callback_id, "error": error.to_string() })
        );
    }
}
