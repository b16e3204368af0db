use faq_model_client::{GeminiClient, GenerativeModel, ModelConfig, ModelError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn client_for(server: &MockServer, timeout_secs: u64) -> GeminiClient {
    let config = ModelConfig {
        base_url: server.uri(),
        request_timeout_secs: timeout_secs,
        ..Default::default()
    };
    GeminiClient::new(config, Some("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn test_generate_returns_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "ÇAP nedir?"}]}],
            "generationConfig": {"maxOutputTokens": 200}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "Çift anadal programı."}], "role": "model"},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let text = client.generate("ÇAP nedir?", 200).await.unwrap();
    assert_eq!(text, Some("Çift anadal programı.".to_string()));
}

#[tokio::test]
async fn test_generate_with_no_candidates_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    assert_eq!(client.generate("soru", 1024).await.unwrap(), None);
}

#[test_log::test(tokio::test)]
async fn test_api_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    match client.generate("soru", 1024).await {
        Err(ModelError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "The model is overloaded.");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, 5);
    let err = client.generate("soru", 1024).await.unwrap_err();
    assert!(matches!(err, ModelError::InvalidResponse(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"candidates": []}))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server, 1);
    let err = client.generate("soru", 1024).await.unwrap_err();
    assert!(matches!(err, ModelError::Timeout(_)), "{err:?}");
}

#[test_log::test(tokio::test)]
async fn test_unconfigured_client_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = ModelConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let client = GeminiClient::new(config, None).unwrap();
    assert!(!client.is_available());
    let err = client.generate("soru", 1024).await.unwrap_err();
    assert!(matches!(err, ModelError::NotConfigured(_)));
}
