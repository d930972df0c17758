//! Tests of the `reqwest` call against a local mock server

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use remote_data_service::{
    CallError, ErrorKind, ErrorRecord, HttpCall, HttpMethod, ReqwestCall, RequestConfig,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> RequestConfig {
    RequestConfig::get(format!("{}/v1/gifs/random", server.uri()))
}

#[tokio::test]
async fn test_sends_params_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/gifs/random"))
        .and(query_param("tag", "cat"))
        .and(query_param("limit", "1"))
        .and(header("x-client", "remote-data"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "image_url": "u" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = ReqwestCall::new()
        .call(
            config(&server)
                .with_param("tag", "cat")
                .with_param("limit", 1)
                .with_header("x-client", "remote-data"),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({ "data": { "image_url": "u" } }));
}

#[tokio::test]
async fn test_method_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let body = ReqwestCall::new()
        .call(config(&server).with_method(HttpMethod::Delete))
        .await
        .unwrap();

    assert_eq!(body, serde_json::Value::Null);
}

#[tokio::test]
async fn test_error_status_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;

    let error = ReqwestCall::new().call(config(&server)).await.unwrap_err();

    assert_eq!(
        error,
        CallError::Status {
            status: 500,
            body: json!({ "message": "boom" }),
        }
    );
}

#[tokio::test]
async fn test_error_status_survives_binary_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_bytes(vec![0xff, 0xfe, 0x00]))
        .mount(&server)
        .await;

    let error = ReqwestCall::new().call(config(&server)).await.unwrap_err();

    assert_eq!(
        error,
        CallError::Status {
            status: 503,
            body: serde_json::Value::Null,
        }
    );
    let record = ErrorRecord::from_call_error(&error, &config(&server));
    assert_eq!(record.name, ErrorKind::HttpStatusError);
    assert_eq!(record.status, Some(503));
}

#[tokio::test]
async fn test_binary_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xff, 0xfe, 0x00]))
        .mount(&server)
        .await;

    let error = ReqwestCall::new().call(config(&server)).await.unwrap_err();

    assert!(matches!(error, CallError::Decode(_)), "{error:?}");
}

#[tokio::test]
async fn test_text_body_is_kept_as_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let body = ReqwestCall::new().call(config(&server)).await.unwrap();

    assert_eq!(body, json!("plain text"));
}

#[tokio::test]
async fn test_timeout_is_enforced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let error = ReqwestCall::new()
        .call(config(&server).with_timeout(Duration::from_millis(50)))
        .await
        .unwrap_err();

    assert_eq!(error, CallError::Timeout(Some(Duration::from_millis(50))));
}

#[tokio::test]
async fn test_client_timeout_has_no_duration() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let error = ReqwestCall::with_client(client)
        .call(config(&server))
        .await
        .unwrap_err();

    assert_eq!(error, CallError::Timeout(None));
    assert_eq!(error.to_string(), "timeout exceeded");
}

#[tokio::test]
async fn test_unreachable_host_is_a_transport_error() {
    let error = ReqwestCall::new()
        .call(RequestConfig::get("http://127.0.0.1:9/unreachable"))
        .await
        .unwrap_err();

    assert!(matches!(error, CallError::Transport(_)), "{error:?}");
}
