//! Turns a raw share message into a [`ShareRequest`].
//!
//! `type` selects the rule set:
//!
//! | type | mandatory | optional |
//! |---|---|---|
//! | `text` | `content` | `title` |
//! | `contact` | at least one contact field | `name`, `mobile`, `email`, `company`, `postal`, `job`, `detail` |
//! | `image`, `data`, `audio`, `video`, `document` | `source` with `path` or `local` | `title`, `detail` |
//!
//! When a media message carries both `path` and `local`, the `path` locator
//! wins.

use log::debug;

use crate::error::{Result, ShareError};
use crate::message::RawMessage;
use crate::request::{
    ContactCard, MediaItem, MediaKind, PathLocator, ShareRequest, TextShare, TYPE_CONTACT,
    TYPE_TEXT,
};
use crate::source::SourceKind;

pub const KEY_TYPE: &str = "type";
pub const KEY_CONTENT: &str = "content";
pub const KEY_TITLE: &str = "title";
pub const KEY_DETAIL: &str = "detail";
pub const KEY_SOURCE: &str = "source";
pub const KEY_PATH: &str = "path";
pub const KEY_LOCAL: &str = "local";

pub fn validate(message: RawMessage<'_>) -> Result<ShareRequest> {
    let share_type = message.require(KEY_TYPE)?;

    let request = match share_type {
        TYPE_TEXT => ShareRequest::Text(parse_text(message)?),
        TYPE_CONTACT => ShareRequest::Contact(parse_contact(message)?),
        other => match MediaKind::from_type(other) {
            Some(kind) => ShareRequest::Media(parse_media(message, kind)?),
            None => {
                return Err(ShareError::UnsupportedType {
                    type_name: other.to_string(),
                })
            }
        },
    };

    debug!("{} message parsed: {:?}", share_type, request);
    Ok(request)
}

fn parse_text(message: RawMessage<'_>) -> Result<TextShare> {
    Ok(TextShare {
        content: message.require_owned(KEY_CONTENT)?,
        title: message.get_owned(KEY_TITLE)?,
    })
}

fn parse_contact(message: RawMessage<'_>) -> Result<ContactCard> {
    let [name, mobile, email, company, postal, job, detail] = ContactCard::FIELDS;
    let card = ContactCard {
        name: message.get_owned(name)?,
        mobile: message.get_owned(mobile)?,
        email: message.get_owned(email)?,
        company: message.get_owned(company)?,
        postal: message.get_owned(postal)?,
        job: message.get_owned(job)?,
        detail: message.get_owned(detail)?,
    };

    if card.is_empty() {
        return Err(ShareError::EmptyVariant {
            variant: TYPE_CONTACT.to_string(),
        });
    }

    Ok(card)
}

fn parse_media(message: RawMessage<'_>, kind: MediaKind) -> Result<MediaItem> {
    let has_source = message.has(KEY_SOURCE);
    let locator = if has_source && message.has(KEY_PATH) {
        PathLocator::Path(message.require_owned(KEY_PATH)?)
    } else if has_source && message.has(KEY_LOCAL) {
        PathLocator::Local(message.require_owned(KEY_LOCAL)?)
    } else {
        return Err(ShareError::MissingLocator);
    };

    let raw_source = message.require_owned(KEY_SOURCE)?;

    Ok(MediaItem {
        kind,
        source: SourceKind::classify(Some(&raw_source)),
        raw_source,
        locator,
        title: message.get_owned(KEY_TITLE)?,
        detail: message.get_owned(KEY_DETAIL)?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn run(value: Value) -> Result<ShareRequest> {
        validate(RawMessage::from_value(&value)?)
    }

    #[test]
    fn missing_type_is_reported() {
        assert_eq!(
            run(json!({ "content": "hello" })),
            Err(ShareError::missing("type"))
        );
        assert_eq!(run(json!({})), Err(ShareError::missing("type")));
    }

    #[test]
    fn non_string_type_is_malformed() {
        assert_eq!(
            run(json!({ "type": 7 })),
            Err(ShareError::malformed("type"))
        );
    }

    #[test]
    fn text_requires_content() {
        assert_eq!(
            run(json!({ "type": "text", "title": "only a title" })),
            Err(ShareError::missing("content"))
        );
    }

    #[test]
    fn text_with_content_only() {
        assert_eq!(
            run(json!({ "type": "text", "content": "hello" })),
            Ok(ShareRequest::Text(TextShare {
                content: "hello".to_string(),
                title: None,
            }))
        );
    }

    #[test]
    fn text_keeps_optional_title() {
        let request = run(json!({ "type": "text", "content": "body", "title": "Greeting" }))
            .expect("valid text");
        let ShareRequest::Text(text) = request else {
            panic!("expected text request");
        };
        assert_eq!(text.title.as_deref(), Some("Greeting"));
    }

    #[test]
    fn empty_contact_is_rejected() {
        assert_eq!(
            run(json!({ "type": "contact" })),
            Err(ShareError::EmptyVariant {
                variant: "contact".to_string()
            })
        );
    }

    #[test]
    fn contact_with_a_single_field_carries_exactly_that_field() {
        for field in ContactCard::FIELDS {
            let mut value = json!({ "type": "contact" });
            value[field] = json!("value");

            let Ok(ShareRequest::Contact(card)) = run(value) else {
                panic!("contact with {field} should validate");
            };
            let present: Vec<_> = card.present_fields().collect();
            assert_eq!(present, vec![(field, "value")]);
        }
    }

    #[test]
    fn contact_collects_every_present_field() {
        let request = run(json!({
            "type": "contact",
            "name": "Ada",
            "email": "ada@example.com",
            "detail": "met at conf"
        }))
        .expect("valid contact");

        assert_eq!(
            request,
            ShareRequest::Contact(ContactCard {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                detail: Some("met at conf".to_string()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn media_without_locator_fails_even_with_source() {
        for kind in ["image", "data", "audio", "video", "document"] {
            assert_eq!(
                run(json!({ "type": kind, "source": "url" })),
                Err(ShareError::MissingLocator),
                "type {kind}"
            );
        }
    }

    #[test]
    fn media_locator_without_source_fails() {
        assert_eq!(
            run(json!({ "type": "image", "path": "content://x/1" })),
            Err(ShareError::MissingLocator)
        );
        assert_eq!(
            run(json!({ "type": "video", "local": "clip.mp4" })),
            Err(ShareError::MissingLocator)
        );
    }

    #[test]
    fn remote_image_uses_path_locator() {
        assert_eq!(
            run(json!({ "type": "image", "source": "url", "path": "http://x/y.png" })),
            Ok(ShareRequest::Media(MediaItem {
                kind: MediaKind::Image,
                source: SourceKind::Url,
                raw_source: "url".to_string(),
                locator: PathLocator::Path("http://x/y.png".to_string()),
                title: None,
                detail: None,
            }))
        );
    }

    #[test]
    fn bundled_image_uses_local_locator() {
        let Ok(ShareRequest::Media(item)) =
            run(json!({ "type": "image", "source": "resource", "local": "icon.png" }))
        else {
            panic!("expected media request");
        };
        assert_eq!(item.source, SourceKind::Assets);
        assert_eq!(item.locator, PathLocator::Local("icon.png".to_string()));
    }

    #[test]
    fn path_wins_over_local() {
        let Ok(ShareRequest::Media(item)) = run(json!({
            "type": "document",
            "source": "sdcard",
            "path": "/sdcard/report.pdf",
            "local": "report.pdf",
            "title": "Report",
            "detail": "Q3"
        })) else {
            panic!("expected media request");
        };
        assert_eq!(item.kind, MediaKind::Document);
        assert_eq!(item.source, SourceKind::SdCard);
        assert_eq!(
            item.locator,
            PathLocator::Path("/sdcard/report.pdf".to_string())
        );
        assert_eq!(item.title.as_deref(), Some("Report"));
        assert_eq!(item.detail.as_deref(), Some("Q3"));
    }

    #[test]
    fn unknown_source_text_is_not_an_error() {
        let Ok(ShareRequest::Media(item)) =
            run(json!({ "type": "audio", "source": "somewhere", "path": "content://a/1" }))
        else {
            panic!("expected media request");
        };
        assert_eq!(item.source, SourceKind::ContentProvider);
        assert_eq!(item.raw_source, "somewhere");
    }

    #[test]
    fn malformed_source_is_not_a_missing_locator() {
        assert_eq!(
            run(json!({ "type": "image", "source": 1, "path": "content://x" })),
            Err(ShareError::malformed("source"))
        );
    }

    #[test]
    fn malformed_path_is_not_a_missing_locator() {
        assert_eq!(
            run(json!({ "type": "image", "source": "url", "path": 7 })),
            Err(ShareError::malformed("path"))
        );
    }

    #[test]
    fn null_source_is_a_missing_locator() {
        assert_eq!(
            run(json!({ "type": "image", "source": null, "local": "x" })),
            Err(ShareError::MissingLocator)
        );
    }

    #[test]
    fn malformed_optional_field_fails_validation() {
        assert_eq!(
            run(json!({ "type": "text", "content": "x", "title": { "nested": true } })),
            Err(ShareError::malformed("title"))
        );
    }

    #[test]
    fn unsupported_type_is_named() {
        assert_eq!(
            run(json!({ "type": "movie" })),
            Err(ShareError::UnsupportedType {
                type_name: "movie".to_string()
            })
        );
    }
}
