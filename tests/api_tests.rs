//! Integration tests for tdameritrade-rs
//!
//! Every test runs against a local mockito server, so no credentials or
//! network access are needed. Log output of each test is captured in memory
//! to check the lines written on failure.
//!
//! Run with: cargo test --test api_tests

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use rust_decimal_macros::dec;
use secrecy::ExposeSecret;
use serde_json::json;

use tdameritrade_rs::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

/// In-memory log sink shared with the subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

/// Route this thread's log output into a buffer until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so every log line of
/// the test lands here.
fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
    let buffer = LogBuffer::default();
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

fn credentials() -> Credentials {
    Credentials::new("KEY", "RT1", "123456789")
}

fn config(server: &ServerGuard) -> ClientConfig {
    ClientConfig::default()
        .with_base_url(server.url())
        .with_retry(RetryConfig::default().with_delay(Duration::ZERO))
}

/// Client that has not fetched a token yet.
fn create_client(server: &ServerGuard) -> TdClient {
    TdClient::new(credentials(), config(server)).expect("Failed to create client")
}

/// Client holding `token` as a fresh access token.
async fn client_with_token(server: &ServerGuard, token: &str) -> TdClient {
    let client = create_client(server);
    client
        .auth()
        .set_token(token, chrono::Duration::minutes(30))
        .await;
    client
}

fn form_matcher(refresh_token: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
        Matcher::UrlEncoded("refresh_token".into(), refresh_token.into()),
        Matcher::UrlEncoded("client_id".into(), "KEY@AMER.OAUTHAP".into()),
    ])
}

const ORDERS_PATH: &str = "/v1/accounts/123456789/orders";
const HISTORY_PATH: &str = "/v1/marketdata/AAPL/pricehistory";

// ============================================================================
// TOKEN MANAGER TESTS
// ============================================================================

mod token_tests {
    use super::*;

    #[tokio::test]
    async fn test_refresh_returns_access_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .match_header("content-type", "application/x-www-form-urlencoded")
            .match_body(form_matcher("RT1"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token": "abc", "expires_in": 1800}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let token = client.auth().refresh_access_token().await;

        assert_eq!(token.as_ref().map(|t| t.expose_secret()), Some("abc"));
        assert!(client.auth().is_valid().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_refresh_logs_body() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(401)
            .with_body(r#"{"error": "invalid_grant"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        assert!(client.auth().refresh_access_token().await.is_none());
        assert!(client.auth().current_token().await.is_none());

        let output = logs.contents();
        assert!(output.contains("Error refreshing access token"), "{}", output);
        assert!(output.contains("invalid_grant"), "{}", output);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_with_retry_stops_on_rejection() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(400)
            .with_body("bad refresh token")
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        assert!(client.auth().refresh_with_retry().await.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_with_retry_retries_server_errors() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(503)
            .expect(3)
            .create_async()
            .await;

        let client = create_client(&server);
        assert!(client.auth().refresh_with_retry().await.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_access_token_renews_missing_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(200)
            .with_body(r#"{"access_token": "fresh"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let first = client.auth().access_token().await.unwrap();
        let second = client.auth().access_token().await.unwrap();

        assert_eq!(first.expose_secret(), "fresh");
        assert_eq!(second.expose_secret(), "fresh");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_oversized_expiry_does_not_panic() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(200)
            .with_body(r#"{"access_token": "abc", "expires_in": 9223372036854775807}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let token = client.auth().refresh_access_token().await;

        assert_eq!(token.as_ref().map(|t| t.expose_secret()), Some("abc"));
        assert!(client.auth().is_valid().await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_inside_refresh_buffer_is_renewed_once() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .match_body(form_matcher("RT1"))
            .with_status(200)
            .with_body(r#"{"access_token": "NEW", "expires_in": 1800}"#)
            .expect(1)
            .create_async()
            .await;

        // expires in 30 s, inside the default 60 s buffer
        let client = create_client(&server);
        client
            .auth()
            .set_token("OLD", chrono::Duration::seconds(30))
            .await;

        let first = client.auth().access_token().await.unwrap();
        let second = client.auth().access_token().await.unwrap();

        assert_eq!(first.expose_secret(), "NEW");
        assert_eq!(second.expose_secret(), "NEW");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_one_renewal() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(200)
            .with_body(r#"{"access_token": "NEW", "expires_in": 1800}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        client
            .auth()
            .set_token("STALE", chrono::Duration::seconds(-5))
            .await;

        let (first, second) = tokio::join!(client.auth().access_token(), client.auth().access_token());

        assert_eq!(first.unwrap().expose_secret(), "NEW");
        assert_eq!(second.unwrap().expose_secret(), "NEW");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_refresh_transport_failure_is_none() {
        let (logs, _guard) = capture_logs();
        let client = TdClient::new(
            credentials(),
            ClientConfig::default().with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();

        assert!(client.auth().refresh_access_token().await.is_none());
        assert!(client.auth().current_token().await.is_none());

        let output = logs.contents();
        assert!(output.contains("Error refreshing access token"), "{}", output);
    }

    #[tokio::test]
    async fn test_rejected_refresh_is_not_announced_as_retry() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(401)
            .with_body("unauthorized client")
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        assert!(client.auth().refresh_with_retry().await.is_none());

        let output = logs.contents();
        assert!(output.contains("Giving up"), "{}", output);
        assert!(!output.contains("Retrying"), "{}", output);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connect_survives_failed_refresh() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/oauth2/token")
            .with_status(401)
            .create_async()
            .await;

        let client = TdClient::connect(credentials(), config(&server)).await;
        assert!(client.is_ok());
        assert!(client.unwrap().auth().current_token().await.is_none());
    }
}

// ============================================================================
// MARKET DATA SERVICE TESTS
// ============================================================================

mod market_data_tests {
    use super::*;

    #[tokio::test]
    async fn test_custom_user_agent_is_sent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::Any)
            .match_header("user-agent", "td-trader-test/1.0")
            .with_status(200)
            .with_body("{}")
            .expect(1)
            .create_async()
            .await;

        let client = TdClient::new(
            credentials(),
            config(&server).with_user_agent("td-trader-test/1.0"),
        )
        .unwrap();
        let response = client.market_data().get_market_data("AAPL").await.unwrap();

        assert!(response.is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_custom_retry_statuses() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = TdClient::new(
            credentials(),
            config(&server).with_retry(
                RetryConfig::default()
                    .with_delay(Duration::ZERO)
                    .with_retry_statuses(vec![500]),
            ),
        )
        .unwrap();
        let response = client.market_data().get_market_data("AAPL").await.unwrap();

        assert_eq!(response.status, 503);
        assert!(!response.is_success());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_market_data_sends_default_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("apikey".into(), "KEY".into()),
                Matcher::UrlEncoded("periodType".into(), "hour".into()),
                Matcher::UrlEncoded("period".into(), "1".into()),
                Matcher::UrlEncoded("frequencyType".into(), "minute".into()),
                Matcher::UrlEncoded("frequency".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"candles": [], "symbol": "AAPL", "empty": true}"#)
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let response = client.market_data().get_market_data("AAPL").await.unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.contains("\"empty\": true"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_errors_are_retried_then_give_up() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .expect(3)
            .create_async()
            .await;

        let client = create_client(&server);
        assert!(client.market_data().get_market_data("AAPL").await.is_none());

        let output = logs.contents();
        assert!(output.contains("Retrying 1/3"), "{}", output);
        assert!(output.contains("Retrying 2/3"), "{}", output);
        assert!(!output.contains("Retrying 3/3"), "{}", output);
        assert!(output.contains("No attempts left (3/3)"), "{}", output);
        assert!(output.contains("All retries failed."), "{}", output);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_errors_are_returned_unchanged() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .with_body("not found")
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let response = client.market_data().get_market_data("AAPL").await.unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.body, "not found");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_candles_custom_window() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("periodType".into(), "day".into()),
                Matcher::UrlEncoded("period".into(), "5".into()),
                Matcher::UrlEncoded("frequencyType".into(), "minute".into()),
                Matcher::UrlEncoded("frequency".into(), "15".into()),
            ]))
            .with_status(200)
            .with_body(
                json!({
                    "candles": [
                        {"open": 150.0, "high": 151.0, "low": 149.5, "close": 150.5,
                         "volume": 1000, "datetime": 1700000000000i64},
                        {"open": 150.5, "high": 152.0, "low": 150.25, "close": 151.75,
                         "volume": 2500, "datetime": 1700000900000i64}
                    ],
                    "symbol": "AAPL",
                    "empty": false
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let query = PriceHistoryQuery::new()
            .period(PeriodType::Day, 5)
            .frequency(FrequencyType::Minute, 15);
        let history = client.market_data().candles("AAPL", query).await.unwrap();

        assert_eq!(history.candles.len(), 2);
        let latest = history.latest().unwrap();
        assert_eq!(latest.close, dec!(151.75));
        assert_eq!(latest.volume, 2500);
        assert_eq!(latest.datetime.timestamp_millis(), 1700000900000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_candles_non_200_is_none() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        server
            .mock("GET", HISTORY_PATH)
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("forbidden")
            .create_async()
            .await;

        let client = create_client(&server);
        let history = client
            .market_data()
            .candles("AAPL", PriceHistoryQuery::default())
            .await;

        assert!(history.is_none());
        assert!(logs.contents().contains("forbidden"));
    }
}

// ============================================================================
// ORDERS SERVICE TESTS
// ============================================================================

mod orders_tests {
    use super::*;

    fn limit_order(price: rust_decimal::Decimal) -> OrderRequest {
        OrderRequest::builder("AAPL")
            .instruction(Instruction::BuyToOpen)
            .quantity(1)
            .price(price)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepted_order_is_logged() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        let location = format!("{}{}/98765", server.url(), ORDERS_PATH);
        let mock = server
            .mock("POST", ORDERS_PATH)
            .match_header("authorization", "Bearer AT1")
            .match_header("content-type", "application/json")
            .with_status(201)
            .with_header("location", &location)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_token(&server, "AT1").await;
        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        assert_eq!(
            outcome,
            OrderOutcome::Placed {
                order_id: Some("98765".to_string())
            }
        );
        let output = logs.contents();
        assert!(
            output.contains("Trade placed: BUY_TO_OPEN 1 shares of AAPL at 150.00"),
            "{}",
            output
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejected_order_is_logged() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ORDERS_PATH)
            .with_status(400)
            .with_body("insufficient buying power")
            .expect(1)
            .create_async()
            .await;

        let client = client_with_token(&server, "AT1").await;
        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        assert_eq!(
            outcome,
            OrderOutcome::Rejected {
                status: 400,
                body: "insufficient buying power".to_string()
            }
        );
        let output = logs.contents();
        assert!(
            output.contains("Error placing trade: 400 insufficient buying power"),
            "{}",
            output
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_order_without_price_omits_price_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ORDERS_PATH)
            .match_body(Matcher::Json(json!({
                "orderType": "LIMIT",
                "session": "NORMAL",
                "duration": "DAY",
                "orderStrategyType": "SINGLE",
                "orderLegCollection": [{
                    "instruction": "SELL",
                    "quantity": 3,
                    "instrument": {"symbol": "MSFT", "assetType": "EQUITY"}
                }]
            })))
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_token(&server, "AT1").await;
        let outcome = client
            .orders()
            .place("MSFT", Instruction::Sell, 3, None)
            .await;

        assert_eq!(outcome, OrderOutcome::Placed { order_id: None });
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_order_with_price_sends_number() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ORDERS_PATH)
            .match_body(Matcher::PartialJson(json!({"price": 150.25})))
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_token(&server, "AT1").await;
        let outcome = client.orders().place_trade(&limit_order(dec!(150.25))).await;

        assert!(outcome.is_placed());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_order_never_reaches_api() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ORDERS_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = client_with_token(&server, "AT1").await;
        let outcome = client
            .orders()
            .place("AAPL", Instruction::Buy, 0, Some(dec!(10)))
            .await;

        assert!(matches!(outcome, OrderOutcome::Failed { .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_order_refreshes_and_resubmits() {
        let mut server = Server::new_async().await;
        let stale = server
            .mock("POST", ORDERS_PATH)
            .match_header("authorization", "Bearer STALE")
            .with_status(401)
            .expect(1)
            .create_async()
            .await;
        let token = server
            .mock("POST", "/v1/oauth2/token")
            .match_body(form_matcher("RT1"))
            .with_status(200)
            .with_body(r#"{"access_token": "AT2", "expires_in": 1800}"#)
            .expect(1)
            .create_async()
            .await;
        let fresh = server
            .mock("POST", ORDERS_PATH)
            .match_header("authorization", "Bearer AT2")
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_token(&server, "STALE").await;
        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        assert!(outcome.is_placed());
        stale.assert_async().await;
        token.assert_async().await;
        fresh.assert_async().await;
    }

    #[tokio::test]
    async fn test_failed_token_refresh_fails_order() {
        let (logs, _guard) = capture_logs();
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/oauth2/token")
            .with_status(401)
            .with_body("expired refresh token")
            .create_async()
            .await;
        let order = server
            .mock("POST", ORDERS_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = create_client(&server);
        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        assert!(matches!(outcome, OrderOutcome::Failed { .. }));
        assert!(logs.contents().contains("Error placing trade"));
        order.assert_async().await;
    }

    #[tokio::test]
    async fn test_orders_are_not_retried_by_default() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ORDERS_PATH)
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = client_with_token(&server, "AT1").await;
        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        assert!(matches!(outcome, OrderOutcome::Rejected { status: 503, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connect_failures_policy_retries_refused_connections() {
        let (logs, _guard) = capture_logs();
        let client = TdClient::new(
            credentials(),
            ClientConfig::default()
                .with_base_url("http://127.0.0.1:1")
                .with_retry(
                    RetryConfig::default()
                        .with_max_attempts(2)
                        .with_delay(Duration::ZERO),
                )
                .with_order_retry(OrderRetryPolicy::ConnectFailures),
        )
        .unwrap();
        client
            .auth()
            .set_token("AT1", chrono::Duration::minutes(30))
            .await;

        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        match outcome {
            OrderOutcome::Failed { reason } => assert!(reason.contains("HTTP error"), "{}", reason),
            other => panic!("Expected Failed, got {:?}", other),
        }
        let output = logs.contents();
        assert!(output.contains("Retrying 1/2"), "{}", output);
        assert!(output.contains("No attempts left (2/2)"), "{}", output);
    }

    #[tokio::test]
    async fn test_connect_failures_policy_reports_permanent_error() {
        let mut server = Server::new_async().await;
        let token = server
            .mock("POST", "/v1/oauth2/token")
            .with_status(401)
            .with_body("expired refresh token")
            .expect(1)
            .create_async()
            .await;
        let order = server
            .mock("POST", ORDERS_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = TdClient::new(
            credentials(),
            config(&server).with_order_retry(OrderRetryPolicy::ConnectFailures),
        )
        .unwrap();
        let outcome = client.orders().place_trade(&limit_order(dec!(150.00))).await;

        match outcome {
            OrderOutcome::Failed { reason } => {
                assert!(reason.contains("Authentication failed"), "{}", reason);
                assert!(!reason.contains("all retries failed"), "{}", reason);
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
        token.assert_async().await;
        order.assert_async().await;
    }
}

// ============================================================================
// END-TO-END
// ============================================================================

mod end_to_end_tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_then_place_trade() {
        let mut server = Server::new_async().await;
        let token = server
            .mock("POST", "/v1/oauth2/token")
            .match_body(form_matcher("RT1"))
            .with_status(200)
            .with_body(r#"{"access_token": "AT1"}"#)
            .expect(1)
            .create_async()
            .await;
        let order = server
            .mock("POST", ORDERS_PATH)
            .match_header("authorization", "Bearer AT1")
            .match_body(Matcher::PartialJson(json!({
                "orderType": "LIMIT",
                "price": 150.0,
                "orderLegCollection": [{
                    "instruction": "BUY_TO_OPEN",
                    "quantity": 1,
                    "instrument": {"symbol": "AAPL", "assetType": "EQUITY"}
                }]
            })))
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let env: HashMap<&str, &str> = HashMap::from([
            ("TD_AMERITRADE_API_KEY", "KEY"),
            ("TD_REFRESH_TOKEN", "RT1"),
            ("TD_ACCOUNT_ID", "123456789"),
        ]);
        let credentials = Credentials::from_lookup(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(credentials.refresh_token().expose_secret(), "RT1");

        let client = TdClient::connect(credentials, config(&server))
            .await
            .unwrap();
        let outcome = client
            .orders()
            .place("AAPL", Instruction::BuyToOpen, 1, Some(dec!(150.00)))
            .await;

        assert!(outcome.is_placed());
        token.assert_async().await;
        order.assert_async().await;
    }
}
