//! Error types for bridge command operations.

use scanbridge_sdk::SdkError;
use thiserror::Error;

/// Result type alias for bridge command operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors returned by the command surface.
///
/// The event dispatcher never returns these: failures it observes are
/// converted into reader-status events, since no caller is waiting.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Operation attempted with no active reader session.
    #[error("Reader not connected")]
    NotConnected,

    /// Malformed tag identifier supplied by the host.
    #[error(transparent)]
    Epc(#[from] scanbridge_core::Error),

    /// The vendor SDK rejected a call; carries the vendor diagnostic.
    #[error(transparent)]
    Sdk(#[from] SdkError),
}
