//! The payment-widget seam.

use async_trait::async_trait;
use homeo_client::PaymentVerification;
use rust_decimal::Decimal;
use tokio::sync::OnceCell;

use crate::error::WidgetError;

/// Customer data pre-filled into the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefill {
    pub name: String,
    /// Phone number without the leading `+`.
    pub contact: String,
}

/// Everything the widget is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOptions {
    /// Public gateway key returned by create-order.
    pub key: String,
    /// Amount in the gateway's minor unit, as returned by create-order.
    pub amount: Decimal,
    pub currency: String,
    pub name: String,
    pub description: String,
    pub order_id: String,
    pub prefill: Prefill,
}

/// A hosted payment widget.
///
/// `load_script` fetches whatever the widget needs before it can open; it is
/// called through a [`ScriptLoader`] so a successful load happens once.
/// `open` runs the payment and resolves with the values the gateway hands
/// back on completion.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    async fn load_script(&self) -> Result<(), WidgetError>;

    async fn open(&self, options: &PaymentOptions) -> Result<PaymentVerification, WidgetError>;
}

/// Wraps a widget so its script is loaded at most once. A failed load leaves
/// the loader empty, so the next attempt tries again.
#[derive(Debug)]
pub struct ScriptLoader<W> {
    widget: W,
    loaded: OnceCell<()>,
}

impl<W: PaymentWidget> ScriptLoader<W> {
    pub fn new(widget: W) -> Self {
        Self {
            widget,
            loaded: OnceCell::new(),
        }
    }

    /// Loads the script unless an earlier call already succeeded.
    ///
    /// # Errors
    ///
    /// Returns the widget's [`WidgetError`] when loading fails.
    pub async fn ensure_loaded(&self) -> Result<(), WidgetError> {
        self.loaded
            .get_or_try_init(|| async {
                tracing::debug!("loading payment widget script");
                self.widget.load_script().await
            })
            .await?;
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }
}
