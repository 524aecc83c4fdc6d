//! Validated share requests.

use serde::{Deserialize, Serialize};

use crate::source::SourceKind;

/// Type literals accepted in the `type` field.
pub const TYPE_TEXT: &str = "text";
pub const TYPE_CONTACT: &str = "contact";
pub const TYPE_IMAGE: &str = "image";
pub const TYPE_DATA: &str = "data";
pub const TYPE_AUDIO: &str = "audio";
pub const TYPE_VIDEO: &str = "video";
pub const TYPE_DOCUMENT: &str = "document";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShareRequest {
    Text(TextShare),
    Contact(ContactCard),
    Media(MediaItem),
}

impl ShareRequest {
    /// The `type` literal this request was built from.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => TYPE_TEXT,
            Self::Contact(_) => TYPE_CONTACT,
            Self::Media(item) => item.kind.as_str(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextShare {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Contact fields. A validated card always has at least one field set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ContactCard {
    pub const FIELDS: [&'static str; 7] =
        ["name", "mobile", "email", "company", "postal", "job", "detail"];

    pub fn is_empty(&self) -> bool {
        self.present_fields().next().is_none()
    }

    /// Name/value pairs for every field that is set, in wire order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        Self::FIELDS
            .into_iter()
            .zip([
                &self.name,
                &self.mobile,
                &self.email,
                &self.company,
                &self.postal,
                &self.job,
                &self.detail,
            ])
            .filter_map(|(key, value)| value.as_deref().map(|value| (key, value)))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Data,
    Audio,
    Video,
    Document,
}

impl MediaKind {
    pub fn from_type(value: &str) -> Option<Self> {
        match value {
            TYPE_IMAGE => Some(Self::Image),
            TYPE_DATA => Some(Self::Data),
            TYPE_AUDIO => Some(Self::Audio),
            TYPE_VIDEO => Some(Self::Video),
            TYPE_DOCUMENT => Some(Self::Document),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => TYPE_IMAGE,
            Self::Data => TYPE_DATA,
            Self::Audio => TYPE_AUDIO,
            Self::Video => TYPE_VIDEO,
            Self::Document => TYPE_DOCUMENT,
        }
    }

    /// Generic MIME type used when the platform action needs one.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Image => "image/*",
            Self::Data => "*/*",
            Self::Audio => "audio/*",
            Self::Video => "video/*",
            Self::Document => "application/*",
        }
    }
}

/// Where a media item lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PathLocator {
    /// Provider style path or URL (`path`).
    Path(String),
    /// Resource bundled with the application (`local`).
    Local(String),
}

impl PathLocator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Path(value) | Self::Local(value) => value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub source: SourceKind,
    /// The `source` text as sent, kept for logging.
    pub raw_source: String,
    pub locator: PathLocator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
