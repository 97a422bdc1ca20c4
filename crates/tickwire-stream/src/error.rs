//! Stream client errors.

use thiserror::Error;
use tickwire_types::{SubscriptionError, TickwireError};
use tokio_tungstenite::tungstenite;

/// Errors that can occur while establishing a stream.
///
/// Runtime socket errors after the handshake do not surface here; they
/// terminate the receive loop and are exposed through
/// [`StreamClient::last_error`](crate::StreamClient::last_error).
#[derive(Error, Debug)]
pub enum StreamError {
    /// The WebSocket connection could not be established.
    #[error("WebSocket connect failed: {0}")]
    Connect(#[source] tungstenite::Error),

    /// The subscribe frame could not be sent.
    #[error("subscribe handshake failed: {0}")]
    Subscribe(#[source] tungstenite::Error),

    /// Subscription parameters failed validation.
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),
}

// Lets callers holding a tickwire_types::Result apply `?` to
// connection attempts.
impl From<StreamError> for TickwireError {
    fn from(error: StreamError) -> Self {
        match error {
            StreamError::Subscription(error) => Self::Subscription(error),
            transport => Self::WebSocket(transport.to_string()),
        }
    }
}
