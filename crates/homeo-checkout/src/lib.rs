//! Checkout flow: customer validation, order creation, payment and
//! verification against the storefront backend.

mod details;
mod error;
mod flow;
mod widget;

pub use details::{normalize_phone, CustomerDetails};
pub use error::{CheckoutError, WidgetError};
pub use flow::{CheckoutFlow, CheckoutReceipt, CheckoutState};
pub use widget::{PaymentOptions, PaymentWidget, Prefill, ScriptLoader};
