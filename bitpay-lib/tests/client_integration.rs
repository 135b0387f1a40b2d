//! Client behavior over real HTTP against a mock BitPay server.

mod common;

use bitpay_lib::models::{Invoice, Payout, PayoutInstruction, PayoutBatch};
use bitpay_lib::transport::{PLUGIN_INFO, SIGNATURE_HEADER, IDENTITY_HEADER};
use bitpay_lib::{Client, ErrorCategory, Facade};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn header_value<'a>(request: &'a wiremock::Request, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// ============================================================================
// Headers and signing
// ============================================================================

#[tokio::test]
async fn test_signed_get_sends_identity_and_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices/abc"))
        .and(query_param("token", common::MERCHANT_TOKEN))
        .and(header("x-accept-version", "2.0.0"))
        .and(header("content-type", "application/json"))
        .and(header("x-bitpay-plugin-info", PLUGIN_INFO))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"facade": "merchant/invoice", "data": {"id": "abc", "status": "new"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let invoice = client
        .get_invoice("abc", Facade::Merchant, true)
        .await
        .expect("invoice");
    assert_eq!(invoice.id.as_deref(), Some("abc"));

    let requests = server.received_requests().await.expect("recording enabled");
    let request = &requests[0];
    let identity = common::identity();
    assert_eq!(header_value(request, IDENTITY_HEADER), identity.public_key_hex());
    // GET requests sign the full URL with no body.
    assert!(identity.verify(
        request.url.as_str().as_bytes(),
        header_value(request, SIGNATURE_HEADER)
    ));
}

#[tokio::test]
async fn test_signed_post_signs_url_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices"))
        .and(header_exists(SIGNATURE_HEADER))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "inv-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let mut invoice = Invoice::new(dec!(10), "USD");
    invoice.guid = Some("fixed-guid".to_string());
    client
        .create_invoice(invoice, Facade::Merchant, true)
        .await
        .expect("created");

    let requests = server.received_requests().await.expect("recording enabled");
    let request = &requests[0];
    let body: Value = serde_json::from_slice(&request.body).expect("json body");
    assert_eq!(body["token"], common::MERCHANT_TOKEN);
    assert_eq!(body["guid"], "fixed-guid");
    assert_eq!(body["price"], json!(10.0));
    assert!(body.get("buyer").is_none());

    let mut payload = request.url.to_string();
    payload.push_str(std::str::from_utf8(&request.body).expect("utf8"));
    assert!(common::identity().verify(payload.as_bytes(), header_value(request, SIGNATURE_HEADER)));
}

#[tokio::test]
async fn test_public_endpoints_are_unsigned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rates/BTC/USD"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"code": "USD", "name": "US Dollar", "rate": 41248.11}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = common::unsigned_client(&server).await;
    let rate = client
        .get_currency_pair_rate("BTC", "USD")
        .await
        .expect("rate");
    assert_eq!(rate.rate, Some(dec!(41248.11)));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(requests[0].headers.get(SIGNATURE_HEADER).is_none());
    assert!(requests[0].headers.get(IDENTITY_HEADER).is_none());
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn test_signed_call_without_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
        .expect(0)
        .mount(&server)
        .await;

    let client = common::unsigned_client(&server).await;
    let err = client
        .get_invoice("abc", Facade::Merchant, true)
        .await
        .expect_err("no private key");
    assert_eq!(err.category(), ErrorCategory::Generic);
}

// ============================================================================
// Parameters
// ============================================================================

#[tokio::test]
async fn test_cancel_invoice_force_flag_only_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/invoices/abc"))
        .and(query_param("forceCancel", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "abc", "status": "expired"}})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/invoices/def"))
        .and(wiremock::matchers::query_param_is_missing("forceCancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "def", "status": "expired"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    client.cancel_invoice("abc", true).await.expect("forced");
    client.cancel_invoice("def", false).await.expect("plain");
}

#[tokio::test]
async fn test_payout_amount_rounded_to_currency_precision() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payouts"))
        .and(body_json(json!({
            "token": common::PAYOUT_TOKEN,
            "amount": 0.12345679,
            "currency": "BTC",
            "ledgerCurrency": "USD",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "p-1", "status": "new"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let payout = client
        .submit_payout(Payout::new(dec!(0.123456789), "BTC", "USD"))
        .await
        .expect("submitted");
    assert_eq!(payout.id.as_deref(), Some("p-1"));
}

#[tokio::test]
async fn test_payout_batch_amount_sums_instructions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/payoutBatches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "b-1"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let batch = PayoutBatch::new(
        "USD",
        "USD",
        vec![
            PayoutInstruction::to_email(dec!(10), "a@example.com"),
            PayoutInstruction::to_recipient(dec!(5.5), "recipient-1"),
        ],
    );
    client.submit_payout_batch(batch).await.expect("submitted");

    let requests = server.received_requests().await.expect("recording enabled");
    let body: Value = serde_json::from_slice(&requests[0].body).expect("json body");
    assert_eq!(body["amount"], json!(15.5));
    assert_eq!(body["instructions"][1]["recipientId"], "recipient-1");
}

#[tokio::test]
async fn test_id_with_reserved_characters_is_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices/a%2Fb%23c"))
        .and(query_param("token", common::MERCHANT_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "a/b#c"}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let invoice = client
        .get_invoice("a/b#c", Facade::Merchant, true)
        .await
        .expect("invoice");
    assert_eq!(invoice.id.as_deref(), Some("a/b#c"));

    let requests = server.received_requests().await.expect("recording enabled");
    assert!(common::identity().verify(
        requests[0].url.as_str().as_bytes(),
        header_value(&requests[0], SIGNATURE_HEADER)
    ));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_api_error_carries_code() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "error",
            "code": "BITPAY-INVOICE-CREATE",
            "message": "Invalid price",
        })))
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let err = client
        .create_invoice(Invoice::new(dec!(0), "USD"), Facade::Merchant, true)
        .await
        .expect_err("rejected");
    assert_eq!(err.category(), ErrorCategory::InvoiceCreation);
    assert_eq!(err.api_code(), "BITPAY-INVOICE-CREATE");
    assert_eq!(err.message(), "failed to serialize Invoice object : Invalid price");
}

#[tokio::test]
async fn test_http_error_status_with_error_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bills/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "Object not found"})))
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let err = client
        .get_bill("missing", Facade::Merchant, true)
        .await
        .expect_err("not found");
    assert_eq!(err.category(), ErrorCategory::BillQuery);
    assert!(err.message().ends_with("Object not found"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ledgers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    let err = client.get_ledgers().await.expect_err("malformed");
    assert_eq!(err.category(), ErrorCategory::LedgerQuery);
    assert!(err
        .message()
        .starts_with("failed to deserialize BitPay server response (Ledger) : "));
}

#[tokio::test]
async fn test_unreachable_server() {
    let server = MockServer::start().await;
    let config = common::config(&server).with_base_url("http://127.0.0.1:9");
    let client = Client::builder(config)
        .with_currencies(common::currencies())
        .build()
        .await
        .expect("builds without I/O");

    let err = client.get_rates().await.expect_err("unreachable");
    assert_eq!(err.category(), ErrorCategory::RateQuery);
}

// ============================================================================
// Client construction
// ============================================================================

#[tokio::test]
async fn test_build_fetches_currencies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"code": "BTC", "symbol": "₿", "precision": 8, "name": "Bitcoin"},
            {"code": "JPY", "precision": 0, "name": "Japanese Yen"},
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder(common::config(&server))
        .build()
        .await
        .expect("builds");
    assert_eq!(client.currencies().precision("JPY"), 0);
    assert_eq!(client.currencies().precision("BTC"), 8);
    assert_eq!(client.currencies().precision("EUR"), 2);
}

#[tokio::test]
async fn test_build_fails_on_currency_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = Client::builder(common::config(&server))
        .build()
        .await
        .expect_err("currency load fails");
    assert_eq!(err.category(), ErrorCategory::Generic);
    assert!(err.message().starts_with("failed to load the currencies"));
}

#[tokio::test]
async fn test_notification_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/refunds/r-1/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success", "data": {}, "code": null})))
        .mount(&server)
        .await;

    let client = common::client(&server).await;
    assert!(client.send_refund_notification("r-1").await.expect("sent"));
}
