use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("Missing mandatory field: {field}")]
    MissingField { field: String },

    #[error("Field '{field}' must be a string")]
    MalformedField { field: String },

    #[error("No fields found for sharing {variant}: need at least one field")]
    EmptyVariant { variant: String },

    #[error("Media share must provide a source together with a path or local locator")]
    MissingLocator,

    #[error("Unsupported share type: {type_name}")]
    UnsupportedType { type_name: String },

    #[error("Invalid message: {0}")]
    InvalidMessage(String),

    #[error("Unsupported action: {action}")]
    UnsupportedAction { action: String },

    #[error("No platform action available for {type_name} share")]
    ActionUnavailable { type_name: String },

    #[error("Launching share action failed: {0}")]
    LaunchFailed(String),

    #[error("Fetching '{locator}' failed: {reason}")]
    FetchFailed { locator: String, reason: String },

    #[error("Deferred share task failed: {0}")]
    TaskFailed(String),
}

impl ShareError {
    pub fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_string(),
        }
    }

    pub fn malformed(field: &str) -> Self {
        Self::MalformedField {
            field: field.to_string(),
        }
    }

    /// True for failures raised while validating the inbound message, as
    /// opposed to failures of the platform capabilities.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::MalformedField { .. }
                | Self::EmptyVariant { .. }
                | Self::MissingLocator
                | Self::UnsupportedType { .. }
                | Self::InvalidMessage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ShareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_field() {
        assert_eq!(
            ShareError::missing("content").to_string(),
            "Missing mandatory field: content"
        );
        assert_eq!(
            ShareError::malformed("title").to_string(),
            "Field 'title' must be a string"
        );
        assert_eq!(
            ShareError::UnsupportedType {
                type_name: "movie".to_string()
            }
            .to_string(),
            "Unsupported share type: movie"
        );
    }

    #[test]
    fn capability_failures_are_not_validation_errors() {
        assert!(ShareError::MissingLocator.is_validation());
        assert!(!ShareError::LaunchFailed("boom".to_string()).is_validation());
        assert!(!ShareError::FetchFailed {
            locator: "http://x".to_string(),
            reason: "timeout".to_string(),
        }
        .is_validation());
    }
}
