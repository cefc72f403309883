//! Typed client for the Homeo storefront REST API.

pub mod client;
pub mod error;
pub mod types;

pub use client::catalog::ProductDetail;
pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    CreateOrderRequest, CreatedOrder, GatewayOrder, OrderLine, PaymentVerification, ProductForm,
    VerifyPaymentResponse,
};
