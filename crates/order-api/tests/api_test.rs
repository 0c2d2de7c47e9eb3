//! End-to-end handler tests: real router, real service, real signature
//! verification, with the gateway's network call replaced by a scripted
//! fake behind the `PaymentGateway` port.

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use order_api::state::{AppConfig, AppState};
use order_api::create_router;
use order_core::{
    Currency, GatewayOrder, InMemoryCartStore, InMemoryOrderStore, OrderError, OrderResult,
    PaymentGateway,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const TEST_SECRET: &str = "test_secret";

// hex(HMAC-SHA256("test_secret", "gw_1|pay_1"))
const SIG_GW1_PAY1: &str = "2fe067a468bf6fc5dc8ef0ad2160298684413873de48de827b020e51dd7b5af1";

/// Hands out sequential gateway order ids and verifies signatures with
/// the real HMAC check against `TEST_SECRET`.
struct FakeGateway {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeGateway {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_gateway_order(
        &self,
        _amount_minor: i64,
        _currency: Currency,
        _receipt: &str,
    ) -> OrderResult<GatewayOrder> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(OrderError::Gateway {
                provider: "fake".to_string(),
                message: "gateway unavailable".to_string(),
            });
        }
        Ok(GatewayOrder {
            gateway_order_id: format!("gw_{}", n),
        })
    }

    fn verify_payment_signature(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> bool {
        order_razorpay::verify_signature(gateway_order_id, payment_id, signature, TEST_SECRET)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
    }
}

fn server_with(gateway: Arc<FakeGateway>) -> TestServer {
    let state = AppState::with_components(
        test_config(),
        gateway,
        Arc::new(InMemoryOrderStore::new()),
        Arc::new(InMemoryCartStore::new()),
    );
    TestServer::new(create_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(Arc::new(FakeGateway::new()))
}

fn as_user(user_id: &'static str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-user-id"),
        HeaderValue::from_static(user_id),
    )
}

fn create_order_body() -> Value {
    json!({
        "items": [{"sku": "A", "qty": 1}],
        "amount": 100.0,
        "address": {"line1": "1 Main St", "city": "Pune"},
        "email": "a@example.com",
        "phone": "9999999999"
    })
}

async fn create_order_as(server: &TestServer, user_id: &'static str) -> Value {
    let (name, value) = as_user(user_id);
    let response = server
        .post("/api/order/create-order")
        .add_header(name, value)
        .json(&create_order_body())
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()
}

fn amount_of(value: &Value) -> Decimal {
    match value {
        Value::String(s) => Decimal::from_str(s).unwrap(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).unwrap(),
        other => panic!("unexpected amount representation: {:?}", other),
    }
}

#[tokio::test]
async fn test_health() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_create_order_returns_pending_order() {
    let server = server();
    let body = create_order_as(&server, "user_1").await;

    assert_eq!(body["success"], json!(true));
    assert_eq!(body["order"]["razorpay_order_id"], json!("gw_1"));
    assert!(body["order"]["id"].as_str().is_some());
    assert_eq!(amount_of(&body["order"]["amount"]), dec!(100));

    let (name, value) = as_user("user_1");
    let listing = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(listing["orders"][0]["status"], json!("PENDING"));
    assert_eq!(amount_of(&listing["orders"][0]["amount"]), dec!(100));
}

#[tokio::test]
async fn test_create_order_empty_items_rejected_without_gateway_call() {
    let gateway = Arc::new(FakeGateway::new());
    let server = server_with(gateway.clone());

    let (name, value) = as_user("user_1");
    let response = server
        .post("/api/order/create-order")
        .add_header(name, value)
        .json(&json!({
            "items": [],
            "amount": 100.0,
            "address": {"city": "Pune"},
            "email": "a@example.com",
            "phone": "9999999999"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

    let (name, value) = as_user("user_1");
    let listing = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(listing["orders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_create_order_gateway_failure_is_server_error() {
    let server = server_with(Arc::new(FakeGateway::failing()));

    let (name, value) = as_user("user_1");
    let response = server
        .post("/api/order/create-order")
        .add_header(name, value)
        .json(&create_order_body())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_create_order_requires_auth() {
    let server = server();
    let response = server
        .post("/api/order/create-order")
        .json(&create_order_body())
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_payment_success() {
    let server = server();
    let created = create_order_as(&server, "user_1").await;
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let (name, value) = as_user("user_1");
    let response = server
        .post("/api/order/verify-payment")
        .add_header(name, value)
        .json(&json!({
            "order_id": order_id,
            "razorpay_payment_id": "pay_1",
            "razorpay_order_id": "gw_1",
            "razorpay_signature": SIG_GW1_PAY1
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));

    let (name, value) = as_user("user_1");
    let listing = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(listing["orders"][0]["status"], json!("SUCCESS"));
}

#[tokio::test]
async fn test_verify_payment_bad_signature_marks_failed() {
    let server = server();
    let created = create_order_as(&server, "user_1").await;
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let (name, value) = as_user("user_1");
    let response = server
        .post("/api/order/verify-payment")
        .add_header(name, value)
        .json(&json!({
            "order_id": order_id,
            "razorpay_payment_id": "pay_1",
            "razorpay_order_id": "gw_1",
            "razorpay_signature": "0000000000000000000000000000000000000000000000000000000000000000"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(false));

    let (name, value) = as_user("user_1");
    let listing = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(listing["orders"][0]["status"], json!("FAILED"));
}

#[tokio::test]
async fn test_verify_payment_wrong_owner_is_forbidden() {
    let server = server();
    let created = create_order_as(&server, "user_a").await;
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let (name, value) = as_user("user_b");
    let response = server
        .post("/api/order/verify-payment")
        .add_header(name, value)
        .json(&json!({
            "order_id": order_id,
            "razorpay_payment_id": "pay_1",
            "razorpay_order_id": "gw_1",
            "razorpay_signature": SIG_GW1_PAY1
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);

    // Order untouched
    let (name, value) = as_user("user_a");
    let listing = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(listing["orders"][0]["status"], json!("PENDING"));
}

#[tokio::test]
async fn test_verify_payment_unknown_order_is_not_found() {
    let server = server();

    let (name, value) = as_user("user_1");
    let response = server
        .post("/api/order/verify-payment")
        .add_header(name, value)
        .json(&json!({
            "order_id": "missing",
            "razorpay_payment_id": "pay_1",
            "razorpay_order_id": "gw_1",
            "razorpay_signature": SIG_GW1_PAY1
        }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_verify_payment_missing_fields_rejected() {
    let server = server();

    let (name, value) = as_user("user_1");
    let response = server
        .post("/api/order/verify-payment")
        .add_header(name, value)
        .json(&json!({
            "orderId": "o1",
            "razorpay_payment_id": "pay_1"
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_order_ownership_and_not_found() {
    let server = server();
    let created = create_order_as(&server, "user_a").await;
    let order_id = created["order"]["id"].as_str().unwrap().to_string();

    let (name, value) = as_user("user_b");
    let response = server
        .delete(&format!("/api/order/{}", order_id))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let (name, value) = as_user("user_a");
    let response = server
        .delete(&format!("/api/order/{}", order_id))
        .add_header(name, value)
        .await;
    response.assert_status_ok();

    let (name, value) = as_user("user_a");
    let response = server
        .delete(&format!("/api/order/{}", order_id))
        .add_header(name, value)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_orders_newest_first_and_idempotent() {
    let server = server();
    create_order_as(&server, "user_1").await;
    create_order_as(&server, "user_1").await;
    create_order_as(&server, "user_2").await;

    let (name, value) = as_user("user_1");
    let first = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    let orders = first["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders[0]["created_at"].as_str().unwrap() >= orders[1]["created_at"].as_str().unwrap());

    let (name, value) = as_user("user_1");
    let second = server
        .get("/api/order/user-orders")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_clear_cart() {
    let server = server();

    let (name, value) = as_user("user_1");
    let response = server
        .delete("/api/cart/clear")
        .add_header(name, value)
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
}
