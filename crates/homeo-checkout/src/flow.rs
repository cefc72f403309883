use homeo_cart::{CartStorage, CartStore};
use homeo_client::{ApiClient, CreateOrderRequest, OrderLine, PaymentVerification};
use homeo_core::{AppConfig, UserDetails};
use rust_decimal::Decimal;

use crate::details::CustomerDetails;
use crate::error::CheckoutError;
use crate::widget::{PaymentOptions, PaymentWidget, Prefill, ScriptLoader};

const PAYMENT_DESCRIPTION: &str = "Order Payment";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Idle,
    CollectingDetails,
    AwaitingOrderCreation,
    AwaitingPayment,
    Verifying,
    Confirmed,
    Failed,
}

/// What a confirmed checkout paid for.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    pub receipt: String,
    pub order_id: String,
    pub payment_id: String,
    pub amount: Decimal,
    pub currency: String,
    pub customer: UserDetails,
}

/// Drives one cart panel through checkout.
///
/// The flow owns the panel state and the customer form. A submission runs
/// create-order, the payment widget and verification in sequence; the cart is
/// only cleared once the backend confirms the payment.
pub struct CheckoutFlow<W: PaymentWidget> {
    client: ApiClient,
    loader: ScriptLoader<W>,
    currency: String,
    store_name: String,
    state: CheckoutState,
    panel_open: bool,
    details: CustomerDetails,
    pending: Option<PendingOrder>,
}

/// Receipt minted for an attempt that has not been confirmed, together with
/// the order contents it was minted for.
struct PendingOrder {
    receipt: String,
    minted_at_ms: i64,
    amount: Decimal,
    items: Vec<OrderLine>,
}

impl<W: PaymentWidget> CheckoutFlow<W> {
    pub fn new(client: ApiClient, widget: W, config: &AppConfig) -> Self {
        Self {
            client,
            loader: ScriptLoader::new(widget),
            currency: config.currency.clone(),
            store_name: config.store_name.clone(),
            state: CheckoutState::Idle,
            panel_open: false,
            details: CustomerDetails::default(),
            pending: None,
        }
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn details(&self) -> &CustomerDetails {
        &self.details
    }

    /// Receipt that the next submission will reuse, if an earlier attempt
    /// did not reach `Confirmed` and the cart has not changed since.
    pub fn pending_receipt(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.receipt.as_str())
    }

    pub fn script_loader(&self) -> &ScriptLoader<W> {
        &self.loader
    }

    /// Opens the cart panel and starts collecting customer details.
    pub fn open(&mut self) {
        self.panel_open = true;
        self.state = CheckoutState::CollectingDetails;
    }

    /// Closes the panel. A confirmed checkout keeps its state.
    pub fn close(&mut self) {
        self.panel_open = false;
        if self.state != CheckoutState::Confirmed {
            self.state = CheckoutState::Idle;
        }
    }

    pub fn set_details(&mut self, details: CustomerDetails) {
        self.details = details;
    }

    /// Runs checkout for everything in `cart`.
    ///
    /// Validation happens before any network call. On success the cart is
    /// cleared, the panel closed and the form reset. On failure the cart and
    /// form are left exactly as they were.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Validation`], [`CheckoutError::EmptyCart`] or
    ///   [`CheckoutError::InvalidCartItem`] before anything is sent.
    /// - [`CheckoutError::Api`] if create-order or verify-payment fails.
    /// - [`CheckoutError::Widget`] if the widget script cannot load or the
    ///   payment does not complete.
    /// - [`CheckoutError::VerificationFailed`] if the backend rejects the
    ///   payment signature.
    pub async fn submit<S: CartStorage>(
        &mut self,
        cart: &mut CartStore<S>,
    ) -> Result<CheckoutReceipt, CheckoutError> {
        self.state = CheckoutState::CollectingDetails;

        let customer = self.details.validate()?;
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if let Some(index) = cart.items().iter().position(|i| i.id.trim().is_empty()) {
            tracing::warn!(index, "cart item without id");
            return Err(CheckoutError::InvalidCartItem { index });
        }

        let amount = cart.cart_total();
        let items: Vec<OrderLine> = cart
            .items()
            .iter()
            .map(|i| OrderLine {
                id: i.id.clone(),
                name: i.name.clone(),
                price: i.price,
                quantity: i.quantity,
            })
            .collect();
        let receipt = self.receipt_for(amount, &items);
        let request = CreateOrderRequest {
            amount,
            currency: self.currency.clone(),
            receipt: receipt.clone(),
            notes: customer.clone(),
            items,
        };

        match self.pay(&request, &customer).await {
            Ok(verification) => {
                cart.clear_cart();
                self.panel_open = false;
                self.details = CustomerDetails::default();
                self.pending = None;
                self.state = CheckoutState::Confirmed;
                tracing::info!(
                    receipt = %receipt,
                    order_id = %verification.razorpay_order_id,
                    "checkout confirmed"
                );
                Ok(CheckoutReceipt {
                    receipt,
                    order_id: verification.razorpay_order_id,
                    payment_id: verification.razorpay_payment_id,
                    amount: request.amount,
                    currency: request.currency,
                    customer,
                })
            }
            Err(e) => {
                self.state = CheckoutState::Failed;
                tracing::warn!(receipt = %receipt, error = %e, "checkout failed");
                Err(e)
            }
        }
    }

    /// Reuses the pending receipt while the order contents are unchanged,
    /// otherwise mints a fresh one.
    fn receipt_for(&mut self, amount: Decimal, items: &[OrderLine]) -> String {
        let previous_ms = match &self.pending {
            Some(p) if p.amount == amount && p.items == items => return p.receipt.clone(),
            Some(p) => {
                tracing::debug!(receipt = %p.receipt, "cart changed, minting new receipt");
                Some(p.minted_at_ms)
            }
            None => None,
        };
        // Receipts must differ even when minted within the same millisecond.
        let now_ms = chrono::Utc::now().timestamp_millis();
        let minted_at_ms = previous_ms.map_or(now_ms, |prev| now_ms.max(prev + 1));
        let receipt = format!("order_{minted_at_ms}");
        self.pending = Some(PendingOrder {
            receipt: receipt.clone(),
            minted_at_ms,
            amount,
            items: items.to_vec(),
        });
        receipt
    }

    async fn pay(
        &mut self,
        request: &CreateOrderRequest,
        customer: &UserDetails,
    ) -> Result<PaymentVerification, CheckoutError> {
        self.state = CheckoutState::AwaitingOrderCreation;
        let created = self.client.create_order(request).await?;

        self.state = CheckoutState::AwaitingPayment;
        self.loader.ensure_loaded().await?;
        let options = PaymentOptions {
            key: created.key_id,
            amount: created.order.amount,
            currency: created.order.currency,
            name: self.store_name.clone(),
            description: PAYMENT_DESCRIPTION.to_owned(),
            order_id: created.order.id,
            prefill: Prefill {
                name: customer.full_name(),
                contact: customer.phone.trim_start_matches('+').to_owned(),
            },
        };
        let verification = self.loader.widget().open(&options).await?;

        self.state = CheckoutState::Verifying;
        let outcome = self.client.verify_payment(&verification).await?;
        if outcome.success {
            Ok(verification)
        } else {
            Err(CheckoutError::VerificationFailed(
                outcome
                    .message
                    .unwrap_or_else(|| "Payment verification failed".to_owned()),
            ))
        }
    }
}

