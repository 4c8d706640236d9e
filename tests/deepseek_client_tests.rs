use axum::http::{Method, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};

use recap::config::Settings;
use recap::llm::{CompletionRequest, DeepSeekClient, LlmProvider};
use recap::server::{IncomingRequest, SummaryHandler};

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.llm.endpoint = server.url("/v1");
    settings.llm.api_key = "sk-test".to_string();
    settings
}

#[tokio::test]
async fn sends_bearer_auth_and_fixed_request_shape() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_includes(r#""model":"deepseek-chat""#)
                .body_includes(r#""max_tokens":150"#)
                .body_includes(r#""temperature":0.7"#)
                .body_includes(r#""role":"user""#);
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"choices":[{"message":{"content":"done"}}]}"#);
        })
        .await;

    let client = DeepSeekClient::from_settings(&settings_for(&server)).unwrap();
    let request = CompletionRequest::summary("deepseek-chat", "a transcript");
    let reply = client.complete("sk-test", &request).await.unwrap();

    assert_eq!(reply.status, StatusCode::OK);
    let body: Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(body["choices"][0]["message"]["content"], "done");
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_is_returned_as_reply() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(429).body("rate limited");
        })
        .await;

    let client = DeepSeekClient::from_settings(&settings_for(&server)).unwrap();
    let request = CompletionRequest::summary("deepseek-chat", "a transcript");
    let reply = client.complete("sk-test", &request).await.unwrap();

    assert_eq!(reply.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(reply.body, "rate limited");
    mock.assert_async().await;
}

#[tokio::test]
async fn connection_failure_is_an_error() {
    let mut settings = Settings::default();
    settings.llm.endpoint = "http://127.0.0.1:1/v1".to_string();

    let client = DeepSeekClient::from_settings(&settings).unwrap();
    let request = CompletionRequest::summary("deepseek-chat", "a transcript");
    let err = client.complete("sk-test", &request).await.unwrap_err();

    assert!(err.to_string().contains("DeepSeek request failed"));
}

#[tokio::test]
async fn handler_relays_upstream_rejection_end_to_end() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_includes("Summarize this YouTube video transcript in exactly 100 words:");
            then.status(401)
                .body(r#"{"error":{"message":"Authentication Fails"}}"#);
        })
        .await;

    let handler = SummaryHandler::from_settings(&settings_for(&server)).unwrap();
    let response = handler
        .handle(IncomingRequest::new(
            Method::POST,
            json!({ "transcript": "hello world" }).to_string(),
        ))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        serde_json::to_value(response.body.unwrap()).unwrap(),
        json!({
            "error": "DeepSeek API error",
            "details": r#"{"error":{"message":"Authentication Fails"}}"#
        })
    );
    mock.assert_async().await;
}
