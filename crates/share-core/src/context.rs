use std::path::PathBuf;

/// Per-message state handed to the router and to every capability.
///
/// Built fresh for each inbound message and never stored between messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Callback identifier supplied by the web layer, if any.
    pub callback_id: Option<String>,
    /// Directory where downloaded resources are written.
    pub storage_dir: PathBuf,
    /// The `type` literal of the message, used for chooser titles.
    pub type_label: String,
}

impl RequestContext {
    pub fn new(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            callback_id: None,
            storage_dir: storage_dir.into(),
            type_label: String::new(),
        }
    }

    pub fn with_callback(mut self, callback_id: impl Into<String>) -> Self {
        self.callback_id = Some(callback_id.into());
        self
    }

    pub fn with_type_label(mut self, type_label: impl Into<String>) -> Self {
        self.type_label = type_label.into();
        self
    }
}
