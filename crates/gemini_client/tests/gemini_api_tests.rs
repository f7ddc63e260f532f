//! Integration tests for GeminiClient against a mock generateContent endpoint

use gemini_client::{GatewayError, GeminiClient, GeminiConfig, GenerationGateway};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(GeminiConfig::new("test-key").with_api_base(server.uri()))
}

#[tokio::test]
async fn test_generate_returns_first_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{ "parts": [{ "text": "Where should I go?" }] }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "Try Japan." }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let answer = client_for(&server)
        .generate("Where should I go?")
        .await
        .unwrap();
    assert_eq!(answer, "Try Japan.");
}

#[tokio::test]
async fn test_generate_rejects_empty_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server).generate("question").await.unwrap_err();
    assert!(matches!(err, GatewayError::EmptyResponse));
}

#[tokio::test]
async fn test_generate_propagates_upstream_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "error": "overloaded" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).generate("question").await.unwrap_err();
    match err {
        GatewayError::Status { status, .. } => assert_eq!(status, 503),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_regenerate_embeds_previous_answer() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({ "contents": [{}] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "A better answer." }] }
            }]
        })))
        .mount(&server)
        .await;

    let answer = client_for(&server).regenerate("Try Japan.").await.unwrap();
    assert_eq!(answer, "A better answer.");

    // The regenerate prompt is built from the previous answer
    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = requests[0].body_json().unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Try Japan."));
}
