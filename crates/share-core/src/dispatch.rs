//! Routes validated share requests to the platform.
//!
//! Text, contact and locally available media are handed to the
//! [`ActionInvoker`] immediately. Media whose source is `url` is downloaded
//! first on a task spawned on the current tokio runtime; the router returns
//! as soon as the task is started. Without a runtime the share fails with
//! [`ShareError::TaskFailed`].

use std::sync::Arc;

use log::{debug, error, info};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::action::{ActionInvoker, BridgeCallback, PlatformAction, RemoteFetcher};
use crate::config::ShareConfig;
use crate::context::RequestContext;
use crate::error::{Result, ShareError};
use crate::request::{MediaItem, PathLocator, ShareRequest};
use crate::source::SourceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPath {
    /// Build and launch the action on the calling path.
    Immediate,
    /// Fetch the resource on a background task, then build and launch.
    Deferred,
}

pub fn route(request: &ShareRequest) -> DispatchPath {
    match request {
        ShareRequest::Text(_) | ShareRequest::Contact(_) => DispatchPath::Immediate,
        ShareRequest::Media(item) if item.source.is_remote() => DispatchPath::Deferred,
        ShareRequest::Media(_) => DispatchPath::Immediate,
    }
}

#[derive(Debug)]
pub enum Dispatched {
    Completed,
    Pending(JoinHandle<Result<()>>),
}

impl Dispatched {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Waits for deferred work, if any.
    pub async fn wait(self) -> Result<()> {
        match self {
            Self::Completed => Ok(()),
            Self::Pending(handle) => handle
                .await
                .map_err(|error| ShareError::TaskFailed(error.to_string()))?,
        }
    }
}

#[derive(Clone)]
pub struct ShareDispatcher {
    invoker: Arc<dyn ActionInvoker>,
    fetcher: Arc<dyn RemoteFetcher>,
    callback: Arc<dyn BridgeCallback>,
    config: ShareConfig,
}

impl ShareDispatcher {
    pub fn new(
        config: &ShareConfig,
        invoker: Arc<dyn ActionInvoker>,
        fetcher: Arc<dyn RemoteFetcher>,
        callback: Arc<dyn BridgeCallback>,
    ) -> Self {
        Self {
            invoker,
            fetcher,
            callback,
            config: config.clone(),
        }
    }

    /// Dispatches `request`. Deferred work is spawned on the current tokio
    /// runtime; calling from outside one fails instead of starting it.
    pub fn dispatch(&self, request: ShareRequest, ctx: &RequestContext) -> Result<Dispatched> {
        match (route(&request), request) {
            (DispatchPath::Deferred, ShareRequest::Media(item)) => {
                Ok(Dispatched::Pending(self.spawn_remote(item, ctx.clone())?))
            }
            (_, request) => {
                self.share_now(&request, ctx)?;
                Ok(Dispatched::Completed)
            }
        }
    }

    fn spawn_remote(
        &self,
        item: MediaItem,
        ctx: RequestContext,
    ) -> Result<JoinHandle<Result<()>>> {
        let runtime = Handle::try_current().map_err(|error| {
            ShareError::TaskFailed(format!("cannot fetch {}: {error}", item.locator.as_str()))
        })?;
        let dispatcher = self.clone();
        info!(
            "fetching remote {} from {}",
            item.kind.as_str(),
            item.locator.as_str()
        );

        Ok(runtime.spawn(async move {
            let result = dispatcher.share_remote(item, &ctx).await;
            if let Err(error) = &result {
                error!("deferred share failed: {error}");
                dispatcher
                    .callback
                    .failed(ctx.callback_id.as_deref(), error);
            }
            result
        }))
    }

    async fn share_remote(&self, item: MediaItem, ctx: &RequestContext) -> Result<()> {
        let local_path = self
            .fetcher
            .fetch(&item, &ctx.storage_dir)
            .await
            .map_err(|reason| ShareError::FetchFailed {
                locator: item.locator.as_str().to_string(),
                reason,
            })?;
        debug!("remote resource stored at {}", local_path.display());

        // The downloaded copy is shared like any file on device storage.
        let local = MediaItem {
            source: SourceKind::SdCard,
            locator: PathLocator::Path(local_path.to_string_lossy().into_owned()),
            ..item
        };
        self.share_now(&ShareRequest::Media(local), ctx)
    }

    fn share_now(&self, request: &ShareRequest, ctx: &RequestContext) -> Result<()> {
        let Some(action) = self.invoker.build(request, ctx) else {
            error!("no platform action built for {} share", request.type_name());
            return Err(ShareError::ActionUnavailable {
                type_name: request.type_name().to_string(),
            });
        };
        self.launch(action, request, ctx)
    }

    fn launch(
        &self,
        mut action: PlatformAction,
        request: &ShareRequest,
        ctx: &RequestContext,
    ) -> Result<()> {
        if self.config.force_chooser {
            let label = if ctx.type_label.is_empty() {
                request.type_name()
            } else {
                ctx.type_label.as_str()
            };
            action.chooser_title = Some(self.config.chooser_title_for(label));
        }

        debug!(
            "launching {} ({}) data={:?}",
            action.action, action.mime_type, action.data_uri
        );
        for (key, value) in &action.extras {
            debug!("  {key} = {value}");
        }

        self.invoker
            .launch(action, ctx)
            .map_err(ShareError::LaunchFailed)
    }
}
