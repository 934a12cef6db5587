//! Error types for API clients and feed actions.

use std::fmt;

use thiserror::Error;

/// Tags a failure with the operation that produced it, so callers can pick a
/// contextual message without inspecting the transport error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    FetchAppActivity,
    DeleteAppActivity,
    FetchComments,
    DeleteComment,
    FetchTasks,
    DeleteTask,
    FetchVersions,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchAppActivity => "fetch_app_activity_error",
            Self::DeleteAppActivity => "delete_app_activity_error",
            Self::FetchComments => "fetch_comments_error",
            Self::DeleteComment => "delete_comment_error",
            Self::FetchTasks => "fetch_tasks_error",
            Self::DeleteTask => "delete_task_error",
            Self::FetchVersions => "fetch_versions_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required argument was missing. Raised before any request is built.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("[{code}] HTTP request failed: {source}")]
    Http {
        code: ErrorCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("[{code}] Not found: {body}")]
    NotFound { code: ErrorCode, body: String },

    #[error("[{code}] Bad request: {body}")]
    BadRequest { code: ErrorCode, body: String },

    #[error("[{code}] Unauthorized: token missing or invalid")]
    Unauthorized { code: ErrorCode },

    #[error("[{code}] Server error: {status}: {body}")]
    Server {
        code: ErrorCode,
        status: u16,
        body: String,
    },

    #[error("[{code}] Failed to parse response: {source}")]
    Decode {
        code: ErrorCode,
        #[source]
        source: serde_json::Error,
    },

    /// The server handed back a marker it had already issued for this listing.
    #[error("[{code}] Server repeated pagination marker")]
    RepeatedMarker { code: ErrorCode },
}

impl ClientError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// The operation tag, absent only for argument errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Http { code, .. }
            | Self::NotFound { code, .. }
            | Self::BadRequest { code, .. }
            | Self::Unauthorized { code }
            | Self::Server { code, .. }
            | Self::Decode { code, .. }
            | Self::RepeatedMarker { code } => Some(*code),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Errors raised by feed actions before they reach a handler.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeedError {
    #[error("Unknown task assignment resolution: {0}")]
    UnknownResolution(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_strings_are_stable() {
        assert_eq!(
            ErrorCode::DeleteAppActivity.as_str(),
            "delete_app_activity_error"
        );
        assert_eq!(
            ErrorCode::FetchAppActivity.to_string(),
            "fetch_app_activity_error"
        );
    }

    #[test]
    fn test_invalid_argument_has_no_code() {
        let err = ClientError::invalid_argument("Missing app activity id");
        assert!(err.is_invalid_argument());
        assert_eq!(err.code(), None);
        assert_eq!(err.to_string(), "Invalid argument: Missing app activity id");
    }

    #[test]
    fn test_server_error_message_carries_code() {
        let err = ClientError::Server {
            code: ErrorCode::DeleteAppActivity,
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.code(), Some(ErrorCode::DeleteAppActivity));
        assert_eq!(
            err.to_string(),
            "[delete_app_activity_error] Server error: 500: boom"
        );
    }
}
