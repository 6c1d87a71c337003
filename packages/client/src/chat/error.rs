//! Error types for the chat client.

use thiserror::Error;

/// Failures a chat surface can observe.
///
/// Every failure is terminal to the operation that raised it and is handled
/// locally; nothing here crosses a component boundary as a panic.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Room lookup failed (network error or an explicit error from the service)
    #[error("room resolution failed: {0}")]
    ResolutionFailed(String),

    /// Send attempted while the transport is not open
    #[error("channel is not connected")]
    NotConnected,

    /// Underlying connection error or abrupt close
    #[error("transport error: {0}")]
    Transport(String),
}
