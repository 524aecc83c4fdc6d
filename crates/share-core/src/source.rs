use serde::{Deserialize, Serialize};

/// Where a media item is read from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Bundled with the application (`"resource"`).
    Assets,
    /// External storage on the device (`"sdcard"`).
    SdCard,
    /// Resolved through a content provider. Used for any source text that is
    /// not recognised, including a missing one.
    #[default]
    ContentProvider,
    /// Remote resource that has to be downloaded first (`"url"`).
    Url,
}

impl SourceKind {
    pub fn classify(source: Option<&str>) -> Self {
        match source {
            Some("resource") => Self::Assets,
            Some("url") => Self::Url,
            Some("sdcard") => Self::SdCard,
            _ => Self::ContentProvider,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::SdCard => "sdcard",
            Self::ContentProvider => "content_provider",
            Self::Url => "url",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Url)
    }
}
