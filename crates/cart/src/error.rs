use thiserror::Error;

pub type CartResult<T> = Result<T, CartError>;

/// Failures reported to whoever asked the cart to change.
///
/// The cart never retries on its own; retry means calling `add` again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The request was rejected before any lookup was attempted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The product lookup failed; the cart is unchanged.
    #[error("product lookup failed for {source_url}: {reason}")]
    LookupFailed { source_url: String, reason: String },

    /// Another lookup is still outstanding.
    #[error("a product lookup is already in progress")]
    LookupInProgress,
}

impl CartError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn lookup_failed(source_url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LookupFailed {
            source_url: source_url.into(),
            reason: reason.into(),
        }
    }
}
