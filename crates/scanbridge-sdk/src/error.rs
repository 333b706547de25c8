//! Error types for vendor SDK operations.
//!
//! The vendor SDK reports failures as a non-success status code plus a
//! last-error string fetched out of band. This module folds the two into
//! one typed error so callers get the vendor's own diagnostic attached
//! to the command that produced it.

/// Result type alias for vendor SDK operations.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors that can occur while talking to the vendor SDK.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The subsystem service is not bound (never opened, or released).
    #[error("{service} service not bound")]
    ServiceNotBound { service: &'static str },

    /// A vendor call returned a non-success status. `message` carries
    /// the vendor's last-error string.
    #[error("{command} failed: {message}")]
    CommandFailed {
        command: &'static str,
        message: String,
    },

    /// The notification channel has no live subscriber.
    #[error("Notification channel closed")]
    ChannelClosed,
}

impl SdkError {
    /// Create a new service-not-bound error.
    pub fn service_not_bound(service: &'static str) -> Self {
        Self::ServiceNotBound { service }
    }

    /// Create a new command-failed error carrying the vendor diagnostic.
    pub fn command_failed(command: &'static str, message: impl Into<String>) -> Self {
        Self::CommandFailed {
            command,
            message: message.into(),
        }
    }
}
