//! Application error taxonomy
//!
//! Library crates keep their own error enums (`PathError`, `TokenError`); the API layer
//! folds them into `AppError`, whose variants describe how the failure is presented.

/// Level an error is logged at when it reaches the HTTP boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Caller mistakes and expected outcomes such as an expired link
    Debug,
    /// Faults on our side
    Error,
}

/// How an error presents itself to clients and logs
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request may succeed
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show to clients
    fn client_message(&self) -> String;

    /// Whether details must be withheld from clients
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A well-formed request carrying a value the service rejects (bad filename, month 13).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A request whose URL segments or query string cannot be decoded at all.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A download token was never issued or has expired. The two cases are not told apart.
    #[error("Download link is invalid or has expired")]
    LinkInvalidOrExpired,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{message}")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

/// Per-variant presentation, shared by every `ErrorMetadata` accessor
struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    suggested_action: Option<&'static str>,
    sensitive: bool,
    log_level: LogLevel,
}

const CALLER_MISTAKE: Presentation = Presentation {
    status: 400,
    code: "INVALID_INPUT",
    recoverable: false,
    suggested_action: Some("Check request parameters and try again"),
    sensitive: false,
    log_level: LogLevel::Debug,
};

const FAULT: Presentation = Presentation {
    status: 500,
    code: "INTERNAL_ERROR",
    recoverable: true,
    suggested_action: Some("Retry after a short delay"),
    sensitive: true,
    log_level: LogLevel::Error,
};

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::InvalidInput(_) => CALLER_MISTAKE,
            AppError::BadRequest(_) => Presentation {
                code: "BAD_REQUEST",
                suggested_action: Some("Check the URL path segments and query parameters"),
                ..CALLER_MISTAKE
            },
            AppError::NotFound(_) => Presentation {
                status: 404,
                code: "NOT_FOUND",
                suggested_action: Some("Verify the customer ID and period exist"),
                ..CALLER_MISTAKE
            },
            AppError::LinkInvalidOrExpired => Presentation {
                code: "LINK_INVALID_OR_EXPIRED",
                suggested_action: Some("Request a new download link"),
                ..CALLER_MISTAKE
            },
            AppError::Internal(_) | AppError::InternalWithSource { .. } => FAULT,
        }
    }

    /// Variant name, reported to clients alongside details outside production
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::LinkInvalidOrExpired => "LinkInvalidOrExpired",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// The error message followed by up to five causes
    pub fn detailed_message(&self) -> String {
        const MAX_CAUSES: usize = 5;

        let mut details = self.to_string();
        let mut causes = std::iter::successors(std::error::Error::source(self), |err| err.source());
        for cause in causes.by_ref().take(MAX_CAUSES) {
            details.push_str(&format!("\n  Caused by: {}", cause));
        }
        if causes.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().suggested_action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().log_level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::BadRequest(msg) | AppError::NotFound(msg) => {
                msg.clone()
            }
            AppError::LinkInvalidOrExpired => self.to_string(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal server error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Statement not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Statement not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_link_invalid_or_expired() {
        let err = AppError::LinkInvalidOrExpired;
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "LINK_INVALID_OR_EXPIRED");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Download link is invalid or has expired");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
        assert_eq!(err.error_type(), "LinkInvalidOrExpired");
    }

    #[test]
    fn test_internal_errors_are_sensitive() {
        let err = AppError::Internal("lock poisoned at shard 3".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_sensitive());
        assert_eq!(err.client_message(), "Internal server error");
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_anyhow_conversion_keeps_source_chain() {
        let source = anyhow::anyhow!("disk unplugged").context("failed to read document");
        let err = AppError::from(source);

        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert!(err.detailed_message().contains("Caused by"));
        assert!(err.detailed_message().contains("disk unplugged"));
    }

    #[test]
    fn test_bad_request_is_a_caller_mistake() {
        let err = AppError::BadRequest("Cannot parse `abc` to a `u64`".to_string());
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert_eq!(err.client_message(), "Cannot parse `abc` to a `u64`");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_detailed_message_truncates_long_chains() {
        let mut source = anyhow::anyhow!("root cause");
        for i in 0..8 {
            source = source.context(format!("layer {}", i));
        }
        let details = AppError::from(source).detailed_message();

        assert_eq!(details.matches("Caused by").count(), 5);
        assert!(details.ends_with("... (truncated)"));
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        let err1 = AppError::Internal("test".to_string());
        assert_eq!(err1.suggested_action(), Some("Retry after a short delay"));

        let err2 = AppError::LinkInvalidOrExpired;
        assert_eq!(err2.suggested_action(), Some("Request a new download link"));

        let err3 = AppError::InvalidInput("test".to_string());
        assert_eq!(
            err3.suggested_action(),
            Some("Check request parameters and try again")
        );
    }
}
