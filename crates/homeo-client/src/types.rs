//! Request and response bodies for the storefront API.
//!
//! Shared domain types (products, reviews, orders) live in `homeo-core`;
//! this module only holds the shapes that exist purely on the wire.

use std::path::PathBuf;

use homeo_core::{StockStatus, UserDetails};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `{ "data": ... }` envelope used by the payments endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// One cart line as sent to `POST /api/payments/create-order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
}

/// Body of `POST /api/payments/create-order`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    /// Client-minted `order_<unix-millis>` token. Also sent as the
    /// `Idempotency-Key` header.
    pub receipt: String,
    pub notes: UserDetails,
    pub items: Vec<OrderLine>,
}

/// Gateway order created by the backend. `amount` is in the gateway's minor
/// unit and is passed through to the widget untouched.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
}

/// `data` payload of a successful create-order call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreatedOrder {
    pub order: GatewayOrder,
    /// Public key the payment widget is opened with.
    pub key_id: String,
}

/// The three values the payment gateway hands back on completion, forwarded
/// verbatim to `POST /api/payments/verify-payment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyPaymentResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Admin product form, sent as `multipart/form-data`.
///
/// `status` is not part of the form: it is always derived from `stock`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductForm {
    pub name: String,
    pub price: Decimal,
    pub stock: i64,
    pub skin_type: String,
    pub ingredient: String,
    pub fragrance: String,
    pub badges: Vec<String>,
    pub description: String,
    pub how_to_use: String,
    /// New image files to upload. When empty, `existing_images` is sent as
    /// `imageUrls` instead.
    pub image_files: Vec<PathBuf>,
    pub existing_images: Vec<String>,
}

impl ProductForm {
    #[must_use]
    pub fn status(&self) -> StockStatus {
        StockStatus::from_stock(self.stock)
    }

    /// Text fields in the order the backend expects them.
    ///
    /// # Errors
    ///
    /// Returns an error if `badges` or `existing_images` cannot be encoded as
    /// JSON.
    pub(crate) fn text_fields(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("price", self.price.normalize().to_string()),
            ("stock", self.stock.to_string()),
            ("skinType", self.skin_type.clone()),
            ("ingredient", self.ingredient.clone()),
            ("fragrance", self.fragrance.clone()),
            ("badges", serde_json::to_string(&self.badges)?),
            ("description", self.description.clone()),
            ("howToUse", self.how_to_use.clone()),
            ("status", self.status().as_str().to_owned()),
        ];
        if self.image_files.is_empty() && !self.existing_images.is_empty() {
            fields.push(("imageUrls", serde_json::to_string(&self.existing_images)?));
        }
        Ok(fields)
    }
}
