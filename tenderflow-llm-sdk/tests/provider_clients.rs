//! HTTP-level tests for the provider clients, against a mock server.

use tenderflow_llm_sdk::{
    CompletionRequest, GeminiClient, GroqClient, LlmClient, LlmError,
};

#[tokio::test]
async fn gemini_complete_parses_candidate_text() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/v1beta/models/gemini-2.0-flash-exp:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [
                    {
                        "content": {
                            "role": "model",
                            "parts": [{"text": "{\"resume_projet\": \"ok\"}"}]
                        },
                        "finishReason": "STOP"
                    }
                ],
                "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 7}
            }"#,
        )
        .create_async()
        .await;

    let client = GeminiClient::new("test-key")
        .unwrap()
        .with_base_url(server.url());

    let response = client
        .complete(CompletionRequest::new("analyse", 2000))
        .await
        .unwrap();

    assert_eq!(response.text, "{\"resume_projet\": \"ok\"}");
    let usage = response.usage.unwrap();
    assert_eq!(usage.input_tokens, 12);
    assert_eq!(usage.output_tokens, 7);
    mock.assert_async().await;
}

#[tokio::test]
async fn gemini_maps_auth_error() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/v1beta/models/gemini-2.0-flash-exp:generateContent")
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"code": 403, "message": "API key not valid"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::new("bad-key")
        .unwrap()
        .with_base_url(server.url());

    let err = client
        .complete(CompletionRequest::new("analyse", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Authentication { .. }));
}

#[tokio::test]
async fn groq_complete_parses_first_choice() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "choices": [
                    {
                        "message": {"role": "assistant", "content": "generated offer"},
                        "finish_reason": "stop"
                    }
                ],
                "usage": {"prompt_tokens": 20, "completion_tokens": 5}
            }"#,
        )
        .create_async()
        .await;

    let client = GroqClient::new("test-key")
        .unwrap()
        .with_base_url(server.url());

    let response = client
        .complete(CompletionRequest::new("genere", 3000))
        .await
        .unwrap();

    assert_eq!(response.text, "generated offer");
    assert_eq!(response.usage.unwrap().input_tokens, 20);
    mock.assert_async().await;
}

#[tokio::test]
async fn groq_maps_rate_limit() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", "/openai/v1/chat/completions")
        .with_status(429)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#)
        .create_async()
        .await;

    let client = GroqClient::new("test-key")
        .unwrap()
        .with_base_url(server.url());

    let err = client
        .complete(CompletionRequest::new("genere", 100))
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::RateLimit { .. }));
}
