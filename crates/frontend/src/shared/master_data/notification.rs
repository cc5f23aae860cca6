use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    pub fn from_error(err: &ApiError) -> Self {
        Self::error(error_message(err))
    }
}

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// Most specific user-facing message of an error
pub fn error_message(err: &ApiError) -> String {
    let message = match err {
        ApiError::Validation(_) => "Please correct the highlighted fields.".to_string(),
        ApiError::Network(_) => {
            "Unable to reach the server. Check your connection and try again.".to_string()
        }
        other => other.to_string(),
    };
    if message.trim().is_empty() {
        GENERIC_ERROR.to_string()
    } else {
        message
    }
}
