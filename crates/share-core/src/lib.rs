pub mod action;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod message;
pub mod plugin;
pub mod request;
pub mod source;
pub mod validate;

pub use action::{
    share_ack, ActionInvoker, BridgeCallback, PlatformAction, RemoteFetcher, ACK_KEY, ACK_VALUE,
};
pub use config::{ConfigError, ShareConfig};
pub use context::RequestContext;
pub use dispatch::{route, DispatchPath, Dispatched, ShareDispatcher};
pub use error::{Result, ShareError};
pub use message::RawMessage;
pub use plugin::SharePlugin;
pub use request::{ContactCard, MediaItem, MediaKind, PathLocator, ShareRequest, TextShare};
pub use source::SourceKind;
pub use validate::validate;
