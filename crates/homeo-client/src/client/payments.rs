//! Payment endpoints: order creation, verification and the order list.

use homeo_core::Order;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{
    CreateOrderRequest, CreatedOrder, DataEnvelope, PaymentVerification, VerifyPaymentResponse,
};

impl ApiClient {
    /// `POST /api/payments/create-order`.
    ///
    /// The request's receipt doubles as the `Idempotency-Key` header, so a
    /// resubmitted checkout can be deduplicated by the backend.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status, carrying the backend's
    ///   `message` or "Failed to create order".
    /// - [`ApiError::Deserialize`] if the body is not `{data:{order, key_id}}`.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<CreatedOrder, ApiError> {
        let url = self.endpoint(&["api", "payments", "create-order"])?;
        tracing::info!(
            receipt = %request.receipt,
            amount = %request.amount,
            currency = %request.currency,
            items = request.items.len(),
            "creating order"
        );
        let envelope: DataEnvelope<CreatedOrder> = self
            .send_json(
                self.client
                    .post(url)
                    .header("Idempotency-Key", &request.receipt)
                    .json(request),
                "create-order",
                "Failed to create order",
            )
            .await?;
        tracing::debug!(order_id = %envelope.data.order.id, "gateway order created");
        Ok(envelope.data)
    }

    /// `POST /api/payments/verify-payment`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::Status`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not `{success, message?}`.
    pub async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        let url = self.endpoint(&["api", "payments", "verify-payment"])?;
        self.send_json(
            self.client.post(url).json(verification),
            "verify-payment",
            "Payment verification failed",
        )
        .await
    }

    /// `GET /api/payments/orders`, unwrapping the `data` envelope.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::verify_payment`].
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let url = self.endpoint(&["api", "payments", "orders"])?;
        let envelope: DataEnvelope<Vec<Order>> = self
            .send_json(self.client.get(url), "orders", "failed to load orders")
            .await?;
        Ok(envelope.data)
    }
}
