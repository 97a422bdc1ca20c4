//! API key validation.

use crate::SubscriptionError;

/// A validated API token for the vendor feed.
///
/// A key is either the literal `"demo"` or 16 to 32 characters drawn
/// from `[A-Za-z0-9.]`. Validation happens at construction, so holding
/// an `ApiKey` guarantees the token shape is acceptable to the feed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// The demo key accepted by the vendor for limited testing.
    pub const DEMO: &'static str = "demo";

    /// Creates a validated API key.
    ///
    /// # Errors
    ///
    /// Returns [`SubscriptionError::InvalidApiKey`] if the key is not
    /// `"demo"` and does not match the required token shape.
    pub fn new(key: impl Into<String>) -> Result<Self, SubscriptionError> {
        let key = key.into();
        if key == Self::DEMO || is_valid_token(&key) {
            Ok(Self(key))
        } else {
            Err(SubscriptionError::InvalidApiKey)
        }
    }

    /// Returns the demo key.
    #[must_use]
    pub fn demo() -> Self {
        Self(Self::DEMO.to_string())
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the demo key.
    #[must_use]
    pub fn is_demo(&self) -> bool {
        self.0 == Self::DEMO
    }
}

/// Checks the fixed token shape: 16-32 characters of `[A-Za-z0-9.]`.
fn is_valid_token(key: &str) -> bool {
    (16..=32).contains(&key.len())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
}

// The key is a credential; keep it out of debug output.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_demo() {
            f.write_str("ApiKey(demo)")
        } else {
            f.write_str("ApiKey(****)")
        }
    }
}
