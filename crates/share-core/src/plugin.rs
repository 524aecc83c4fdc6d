//! Entry point for share messages coming over the web bridge.
//!
//! A bridge message looks like
//! `{"action": "share", "callback": "<id>", "data": {"type": "text", ...}}`.
//! When `data` is not an object, the share fields are read from the message
//! itself.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use log::{debug, error, warn};
use serde_json::Value;

use crate::action::{share_ack, ActionInvoker, BridgeCallback, RemoteFetcher};
use crate::config::ShareConfig;
use crate::context::RequestContext;
use crate::dispatch::{Dispatched, ShareDispatcher};
use crate::error::{Result, ShareError};
use crate::message::RawMessage;
use crate::validate::{validate, KEY_TYPE};

pub const ACTION_SHARE: &str = "share";
pub const KEY_ACTION: &str = "action";
pub const KEY_CALLBACK: &str = "callback";
pub const KEY_DATA: &str = "data";

pub struct SharePlugin {
    config: ShareConfig,
    dispatcher: ShareDispatcher,
    callback: Arc<dyn BridgeCallback>,
    storage_dir: OnceLock<PathBuf>,
}

impl SharePlugin {
    pub fn new(
        config: ShareConfig,
        invoker: Arc<dyn ActionInvoker>,
        fetcher: Arc<dyn RemoteFetcher>,
        callback: Arc<dyn BridgeCallback>,
    ) -> Self {
        let dispatcher = ShareDispatcher::new(&config, invoker, fetcher, Arc::clone(&callback));
        Self {
            config,
            dispatcher,
            callback,
            storage_dir: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ShareConfig {
        &self.config
    }

    /// Handles one bridge message.
    ///
    /// On success the acknowledgment has already been sent to the message's
    /// callback. For a `url` share that acknowledgment goes out once the
    /// download is started, not when it finishes: the work keeps running in
    /// the returned [`Dispatched::Pending`] handle, and a later failure such
    /// as [`ShareError::FetchFailed`] reaches [`BridgeCallback::failed`]
    /// after the host has already been acknowledged.
    ///
    /// A `url` share needs a tokio runtime on the calling thread. Without one
    /// the message fails with [`ShareError::TaskFailed`].
    pub fn on_message(&self, message: &Value) -> Result<Dispatched> {
        debug!("share message received: {message}");

        let callback_id = message
            .get(KEY_CALLBACK)
            .and_then(Value::as_str)
            .map(str::to_string);

        let result = self.handle(message, callback_id.as_deref());
        match &result {
            Ok(_) => {
                if let Some(id) = callback_id.as_deref() {
                    self.callback.send(id, share_ack());
                }
            }
            Err(err) if err.is_validation() => {
                warn!("share message rejected: {err}");
                self.callback.failed(callback_id.as_deref(), err);
            }
            Err(err) => {
                error!("share failed: {err}");
                self.callback.failed(callback_id.as_deref(), err);
            }
        }
        result
    }

    fn handle(&self, message: &Value, callback_id: Option<&str>) -> Result<Dispatched> {
        let envelope = RawMessage::from_value(message)?;
        let action = envelope.require(KEY_ACTION)?;
        if action != ACTION_SHARE {
            warn!("invalid action {action} in share message");
            return Err(ShareError::UnsupportedAction {
                action: action.to_string(),
            });
        }

        let fields = match message.get(KEY_DATA) {
            Some(data) if data.is_object() => RawMessage::from_value(data)?,
            _ => envelope,
        };

        let request = validate(fields)?;

        let mut ctx = RequestContext::new(self.storage_dir())
            .with_type_label(fields.get(KEY_TYPE)?.unwrap_or_default());
        if let Some(id) = callback_id {
            ctx = ctx.with_callback(id);
        }

        self.dispatcher.dispatch(request, &ctx)
    }

    /// Resolves the storage directory once and makes sure it exists.
    fn storage_dir(&self) -> &Path {
        self.storage_dir.get_or_init(|| {
            let dir = self.config.storage_dir();
            if let Err(err) = fs::create_dir_all(&dir) {
                error!("can't create directory at {}: {err}", dir.display());
            }
            dir
        })
    }
}
