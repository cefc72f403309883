//! End-to-end checkout against a wiremock backend and a scripted widget.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use homeo_cart::{CartItem, CartStore, MemoryStorage};
use homeo_checkout::{
    CheckoutError, CheckoutFlow, CheckoutState, CustomerDetails, PaymentOptions, PaymentWidget,
    WidgetError,
};
use homeo_client::{ApiClient, PaymentVerification};
use homeo_core::AppConfig;
use rust_decimal::Decimal;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Completes every payment with fixed gateway values and records what it
/// was opened with.
#[derive(Default)]
struct ScriptedWidget {
    loads: AtomicUsize,
    opened: Mutex<Vec<PaymentOptions>>,
    dismiss: bool,
    /// Number of upcoming script loads that fail.
    failing_loads: AtomicUsize,
}

#[async_trait]
impl PaymentWidget for ScriptedWidget {
    async fn load_script(&self) -> Result<(), WidgetError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.failing_loads.load(Ordering::SeqCst) > 0 {
            self.failing_loads.fetch_sub(1, Ordering::SeqCst);
            return Err(WidgetError::ScriptLoad("script unreachable".to_owned()));
        }
        Ok(())
    }

    async fn open(&self, options: &PaymentOptions) -> Result<PaymentVerification, WidgetError> {
        self.opened.lock().unwrap().push(options.clone());
        if self.dismiss {
            return Err(WidgetError::Dismissed);
        }
        Ok(PaymentVerification {
            razorpay_order_id: options.order_id.clone(),
            razorpay_payment_id: "pay_1".to_owned(),
            razorpay_signature: "sig_1".to_owned(),
        })
    }
}

fn config(api_url: &str) -> AppConfig {
    let api_url = api_url.to_owned();
    homeo_core::config::build_app_config(move |key| match key {
        "HOMEO_API_URL" => Ok(api_url.clone()),
        _ => Err(std::env::VarError::NotPresent),
    })
    .expect("config")
}

fn flow(server: &MockServer, widget: ScriptedWidget) -> CheckoutFlow<ScriptedWidget> {
    let config = config(&server.uri());
    let client = ApiClient::new(&config).expect("client");
    let mut flow = CheckoutFlow::new(client, widget, &config);
    flow.open();
    flow.set_details(CustomerDetails::new(
        "Asha",
        "Rao",
        "91 98765 43210",
        "12 MG Road",
    ));
    flow
}

fn cart() -> CartStore<MemoryStorage> {
    let mut cart = CartStore::open(MemoryStorage::default());
    cart.add_to_cart(CartItem::new("p-1", "Oat Bar", Decimal::from(175), 2));
    cart
}

async fn mount_create_order(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/payments/create-order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "order": { "id": "order_gw_1", "amount": 35000, "currency": "INR" },
                "key_id": "rzp_test_key"
            }
        })))
        .mount(server)
        .await;
}

async fn mount_verify(server: &MockServer, success: bool) {
    Mock::given(method("POST"))
        .and(path("/api/payments/verify-payment"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": success })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn successful_checkout_clears_cart_and_resets_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-order"))
        .and(body_partial_json(serde_json::json!({
            "amount": 350.0,
            "currency": "INR",
            "notes": { "phone": "+919876543210", "address": "12 MG Road" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "order": { "id": "order_gw_1", "amount": 35000, "currency": "INR" },
                "key_id": "rzp_test_key"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/payments/verify-payment"))
        .and(body_partial_json(serde_json::json!({
            "razorpay_order_id": "order_gw_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "sig_1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();
    let receipt = flow.submit(&mut cart).await.expect("checkout should succeed");

    assert!(receipt.receipt.starts_with("order_"));
    assert_eq!(receipt.order_id, "order_gw_1");
    assert_eq!(receipt.amount, Decimal::from(350));
    assert!(cart.is_empty());
    assert!(!flow.is_panel_open());
    assert_eq!(flow.state(), CheckoutState::Confirmed);
    assert_eq!(flow.details(), &CustomerDetails::default());
    assert!(flow.pending_receipt().is_none());

    let widget = flow.script_loader().widget();
    let opened = widget.opened.lock().unwrap();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].key, "rzp_test_key");
    assert_eq!(opened[0].amount, Decimal::from(35_000));
    assert_eq!(opened[0].name, "Homeo Handmade Soaps");
    assert_eq!(opened[0].description, "Order Payment");
    assert_eq!(opened[0].prefill.name, "Asha Rao");
    assert_eq!(opened[0].prefill.contact, "919876543210");
}

#[tokio::test]
async fn empty_cart_is_rejected_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = CartStore::open(MemoryStorage::default());
    let err = flow.submit(&mut cart).await.expect_err("empty cart");

    assert!(matches!(err, CheckoutError::EmptyCart));
    assert!(err.is_local());
    assert_eq!(flow.state(), CheckoutState::CollectingDetails);
}

#[tokio::test]
async fn missing_field_is_rejected_without_network_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut flow = flow(&server, ScriptedWidget::default());
    flow.set_details(CustomerDetails::new("Asha", "", "919876543210", "12 MG Road"));
    let mut cart = cart();
    let err = flow.submit(&mut cart).await.expect_err("missing last name");

    assert!(matches!(err, CheckoutError::Validation(_)));
    assert_eq!(cart.cart_item_count(), 2);
}

#[tokio::test]
async fn item_without_id_is_rejected_with_its_index() {
    let server = MockServer::start().await;
    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();
    cart.add_to_cart(CartItem::new("", "Ghost Bar", Decimal::from(10), 1));

    let err = flow.submit(&mut cart).await.expect_err("blank id");
    assert!(matches!(err, CheckoutError::InvalidCartItem { index: 1 }));
}

#[tokio::test]
async fn create_order_failure_leaves_cart_and_reports_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/payments/create-order"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(serde_json::json!({ "message": "Amount too low" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();
    let err = flow.submit(&mut cart).await.expect_err("400 should fail");

    assert!(err.to_string().contains("Amount too low"), "got: {err}");
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert_eq!(cart.cart_item_count(), 2);
    assert_eq!(flow.details().first_name, "Asha");
    assert_eq!(flow.script_loader().widget().loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn verification_failure_keeps_cart_and_reuses_receipt() {
    let server = MockServer::start().await;
    mount_create_order(&server).await;
    mount_verify(&server, false).await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();

    let err = flow.submit(&mut cart).await.expect_err("unverified");
    assert!(matches!(err, CheckoutError::VerificationFailed(_)));
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert!(!cart.is_empty());
    let first = flow.pending_receipt().map(str::to_owned).expect("receipt kept");

    let _ = flow.submit(&mut cart).await.expect_err("still unverified");
    assert_eq!(flow.pending_receipt(), Some(first.as_str()));

    let requests = server.received_requests().await.expect("recording enabled");
    let receipts: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path() == "/api/payments/create-order")
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).expect("json body");
            body["receipt"].as_str().unwrap_or_default().to_owned()
        })
        .collect();
    assert_eq!(receipts, vec![first.clone(), first]);
}

fn create_order_bodies(requests: &[wiremock::Request]) -> Vec<serde_json::Value> {
    requests
        .iter()
        .filter(|r| r.url.path() == "/api/payments/create-order")
        .map(|r| serde_json::from_slice(&r.body).expect("json body"))
        .collect()
}

#[tokio::test]
async fn changed_cart_gets_a_fresh_receipt() {
    let server = MockServer::start().await;
    mount_create_order(&server).await;
    mount_verify(&server, false).await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();

    let _ = flow.submit(&mut cart).await.expect_err("unverified");
    let first = flow.pending_receipt().map(str::to_owned).expect("receipt kept");

    cart.add_to_cart(CartItem::new("p-2", "Neem Bar", Decimal::from(20), 1));
    let _ = flow.submit(&mut cart).await.expect_err("still unverified");
    let second = flow.pending_receipt().map(str::to_owned).expect("receipt kept");
    assert_ne!(first, second);

    let requests = server.received_requests().await.expect("recording enabled");
    let bodies = create_order_bodies(&requests);
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["receipt"], first.as_str());
    assert_eq!(bodies[0]["amount"], 350.0);
    assert_eq!(bodies[1]["receipt"], second.as_str());
    assert_eq!(bodies[1]["amount"], 370.0);
    let keys: Vec<String> = requests
        .iter()
        .filter(|r| r.url.path() == "/api/payments/create-order")
        .filter_map(|r| r.headers.get("idempotency-key"))
        .map(|v| v.to_str().unwrap_or_default().to_owned())
        .collect();
    assert_eq!(keys, vec![first, second]);
}

#[tokio::test]
async fn verify_payment_error_status_fails_and_keeps_cart() {
    let server = MockServer::start().await;
    mount_create_order(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/payments/verify-payment"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({ "message": "Signature check crashed" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();
    let err = flow.submit(&mut cart).await.expect_err("500 should fail");

    assert!(matches!(err, CheckoutError::Api(_)), "got: {err:?}");
    assert!(err.to_string().contains("Signature check crashed"), "got: {err}");
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert_eq!(cart.cart_item_count(), 2);
    assert_eq!(flow.details().first_name, "Asha");
    assert!(flow.is_panel_open());
}

#[tokio::test]
async fn unreachable_backend_fails_and_keeps_cart() {
    let server = MockServer::start().await;
    let mut flow = flow(&server, ScriptedWidget::default());
    drop(server);

    let mut cart = cart();
    let err = flow.submit(&mut cart).await.expect_err("no backend");

    assert!(matches!(err, CheckoutError::Api(_)), "got: {err:?}");
    assert!(!err.is_local());
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert_eq!(cart.cart_item_count(), 2);
    assert_eq!(flow.details().phone, "91 98765 43210");
    assert_eq!(flow.script_loader().widget().loads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn script_load_failure_fails_and_retries_on_next_submit() {
    let server = MockServer::start().await;
    mount_create_order(&server).await;
    mount_verify(&server, true).await;

    let widget = ScriptedWidget {
        failing_loads: AtomicUsize::new(1),
        ..ScriptedWidget::default()
    };
    let mut flow = flow(&server, widget);
    let mut cart = cart();

    let err = flow.submit(&mut cart).await.expect_err("script load fails");
    assert!(matches!(err, CheckoutError::Widget(WidgetError::ScriptLoad(_))));
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert_eq!(cart.cart_item_count(), 2);
    assert_eq!(flow.details().first_name, "Asha");
    assert!(!flow.script_loader().is_loaded());
    assert!(flow.script_loader().widget().opened.lock().unwrap().is_empty());

    flow.submit(&mut cart).await.expect("retry should succeed");
    assert_eq!(flow.state(), CheckoutState::Confirmed);
    assert!(cart.is_empty());
    assert_eq!(flow.script_loader().widget().loads.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn script_is_loaded_once_across_attempts() {
    let server = MockServer::start().await;
    mount_create_order(&server).await;
    mount_verify(&server, false).await;

    let mut flow = flow(&server, ScriptedWidget::default());
    let mut cart = cart();
    let _ = flow.submit(&mut cart).await;
    let _ = flow.submit(&mut cart).await;
    let _ = flow.submit(&mut cart).await;

    assert_eq!(flow.script_loader().widget().loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn dismissed_widget_fails_without_verifying() {
    let server = MockServer::start().await;
    mount_create_order(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/payments/verify-payment"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let widget = ScriptedWidget {
        dismiss: true,
        ..ScriptedWidget::default()
    };
    let mut flow = flow(&server, widget);
    let mut cart = cart();
    let err = flow.submit(&mut cart).await.expect_err("dismissed");

    assert!(matches!(err, CheckoutError::Widget(WidgetError::Dismissed)));
    assert_eq!(flow.state(), CheckoutState::Failed);
    assert!(!cart.is_empty());

    flow.open();
    assert_eq!(flow.state(), CheckoutState::CollectingDetails);
}
