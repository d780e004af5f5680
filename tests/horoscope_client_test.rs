//! Horoscope API client against a mock server
//! Run with: cargo test --test horoscope_client_test

use std::sync::Once;
use std::time::Duration;

use horoscope_bot::application::errors::FetchError;
use horoscope_bot::domain::entities::{DayToken, HoroscopeResult, ZodiacSign};
use horoscope_bot::domain::traits::HoroscopeSource;
use horoscope_bot::infrastructure::horoscope::HoroscopeClient;
use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

static INIT: Once = Once::new();

fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

fn client(server: &MockServer) -> HoroscopeClient {
    HoroscopeClient::new(format!("{}/api/v1/get-horoscope", server.uri()), Duration::from_secs(5))
        .expect("client should build")
}

#[tokio::test]
async fn test_fetch_sends_sign_and_day() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/get-horoscope/daily"))
        .and(query_param("sign", "Scorpio"))
        .and(query_param("day", "2024-03-09"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "date": "Mar 9, 2024", "horoscope_data": "Mind the details." },
            "status": 200,
            "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let day = DayToken::Date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    let result = client(&server).fetch(ZodiacSign::Scorpio, day).await.unwrap();

    assert_eq!(result, HoroscopeResult::new("Mar 9, 2024", "Mind the details."));
}

#[tokio::test]
async fn test_keyword_day_is_capitalized() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/get-horoscope/daily"))
        .and(query_param("sign", "Aries"))
        .and(query_param("day", "Tomorrow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "date": "Jun 16, 2024", "horoscope_data": "Soon." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client(&server).fetch(ZodiacSign::Aries, DayToken::Tomorrow).await.unwrap();
    assert_eq!(result.text, "Soon.");
}

#[tokio::test]
async fn test_error_status() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client(&server).fetch(ZodiacSign::Leo, DayToken::Today).await.unwrap_err();
    assert_eq!(err, FetchError::Status(503));
}

#[tokio::test]
async fn test_missing_field() {
    ensure_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "date": "Jun 15, 2024" } })))
        .mount(&server)
        .await;

    let err = client(&server).fetch(ZodiacSign::Leo, DayToken::Today).await.unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)), "{err:?}");
}

#[tokio::test]
async fn test_unreachable_server() {
    ensure_init();

    // Grab a free port, then close it so the connection is refused
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = HoroscopeClient::new(format!("http://127.0.0.1:{}", port), Duration::from_secs(5)).unwrap();
    let err = client.fetch(ZodiacSign::Leo, DayToken::Today).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "{err:?}");
}
