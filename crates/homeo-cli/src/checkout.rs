//! Checkout command and the terminal payment widget.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use homeo_cart::{CartStorage, CartStore};
use homeo_checkout::{CheckoutFlow, CustomerDetails, PaymentOptions, PaymentWidget, WidgetError};
use homeo_client::{ApiClient, PaymentVerification};
use homeo_core::export::format_money;
use homeo_core::AppConfig;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::cart::print_cart;

/// Payment widget for a terminal session.
///
/// Loading the script checks the gateway's checkout script is reachable.
/// Opening prints the order and reads the payment id and signature the
/// gateway issued from stdin; a blank payment id cancels.
pub(crate) struct TerminalWidget {
    http: reqwest::Client,
    script_url: String,
}

impl TerminalWidget {
    pub(crate) fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self {
            http,
            script_url: config.payment_script_url.clone(),
        })
    }
}

#[async_trait]
impl PaymentWidget for TerminalWidget {
    async fn load_script(&self) -> Result<(), WidgetError> {
        self.http
            .get(&self.script_url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| WidgetError::ScriptLoad(e.to_string()))?;
        tracing::debug!(url = %self.script_url, "payment script reachable");
        Ok(())
    }

    async fn open(&self, options: &PaymentOptions) -> Result<PaymentVerification, WidgetError> {
        // Gateway amounts are in the minor unit.
        let major = options.amount / Decimal::ONE_HUNDRED;
        println!();
        println!("{} - {}", options.name, options.description);
        println!("order:    {}", options.order_id);
        println!("amount:   {}", format_money(major, Some(&options.currency)));
        println!("customer: {} ({})", options.prefill.name, options.prefill.contact);
        println!("key:      {}", options.key);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let payment_id = prompt(&mut lines, "payment id (blank to cancel): ").await?;
        if payment_id.is_empty() {
            return Err(WidgetError::Dismissed);
        }
        let signature = prompt(&mut lines, "signature: ").await?;
        if signature.is_empty() {
            return Err(WidgetError::Payment("no signature entered".to_owned()));
        }

        Ok(PaymentVerification {
            razorpay_order_id: options.order_id.clone(),
            razorpay_payment_id: payment_id,
            razorpay_signature: signature,
        })
    }
}

async fn prompt<R>(
    lines: &mut tokio::io::Lines<BufReader<R>>,
    label: &str,
) -> Result<String, WidgetError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut stdout = tokio::io::stdout();
    let io_err = |e: std::io::Error| WidgetError::Payment(e.to_string());
    stdout.write_all(label.as_bytes()).await.map_err(io_err)?;
    stdout.flush().await.map_err(io_err)?;
    let line = lines.next_line().await.map_err(io_err)?;
    Ok(line.unwrap_or_default().trim().to_owned())
}

pub(crate) async fn run_checkout<S: CartStorage>(
    client: ApiClient,
    config: &AppConfig,
    cart: &mut CartStore<S>,
    details: CustomerDetails,
) -> anyhow::Result<()> {
    print_cart(cart);

    let widget = TerminalWidget::new(config)?;
    let mut flow = CheckoutFlow::new(client, widget, config);
    flow.open();
    flow.set_details(details);

    let receipt = flow.submit(cart).await.context("checkout failed")?;
    println!();
    println!("Payment successful!");
    println!("receipt: {}", receipt.receipt);
    println!("order:   {}", receipt.order_id);
    println!("payment: {}", receipt.payment_id);
    println!(
        "paid {} for {}",
        format_money(receipt.amount, Some(&receipt.currency)),
        receipt.customer.full_name()
    );
    Ok(())
}
