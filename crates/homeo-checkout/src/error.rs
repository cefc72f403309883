use homeo_client::ApiError;
use thiserror::Error;

/// Failures reported by a [`crate::PaymentWidget`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WidgetError {
    #[error("Failed to load payment SDK: {0}")]
    ScriptLoad(String),

    /// The customer closed the widget without paying.
    #[error("payment was cancelled")]
    Dismissed,

    #[error("payment failed: {0}")]
    Payment(String),
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A customer field is missing or malformed. Nothing was sent.
    #[error("{0}")]
    Validation(String),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid item in cart at index {index}: missing or invalid id")]
    InvalidCartItem { index: usize },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Widget(#[from] WidgetError),

    /// The backend did not confirm the payment signature.
    #[error("{0}")]
    VerificationFailed(String),
}

impl CheckoutError {
    /// True when the error was raised before any network call.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            CheckoutError::Validation(_)
                | CheckoutError::EmptyCart
                | CheckoutError::InvalidCartItem { .. }
        )
    }
}
