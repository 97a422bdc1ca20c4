//! Error types for tickwire.

use thiserror::Error;

/// Result type alias for tickwire operations.
pub type Result<T> = std::result::Result<T, TickwireError>;

/// Errors that can occur while streaming and aggregating feed data.
///
/// This is the workspace-wide error surface; crate-local errors convert
/// into it so callers can hold a single [`Result`] type across the
/// whole pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TickwireError {
    /// Subscription parameters failed validation.
    #[error(transparent)]
    Subscription(#[from] SubscriptionError),

    /// WebSocket transport error.
    #[error("WebSocket error: {0}")]
    WebSocket(String),
}

/// Errors raised when validating subscription parameters.
///
/// All of these surface synchronously at construction time, before any
/// network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// API key does not match the required token shape.
    #[error("API key is invalid")]
    InvalidApiKey,

    /// Endpoint name is not one of the allowed feed channels.
    #[error("unknown endpoint '{0}', expected one of: us, us-quote, forex, crypto")]
    InvalidEndpoint(String),

    /// Symbol list was empty.
    #[error("no symbols provided")]
    NoSymbols,

    /// Symbol contains a disallowed character or has a bad length.
    #[error("symbol is invalid: {0}")]
    InvalidSymbol(String),

    /// The same symbol appeared more than once in the list.
    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),

    /// Symbol list exceeded the per-connection subscription limit.
    #[error("too many symbols: {0} (limit is 50 per connection)")]
    TooManySymbols(usize),
}
