use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use super::types::*;
use crate::error::LlmError;
use crate::types::{CompletionRequest, CompletionResponse, Usage};

/// Groq API client (OpenAI-compatible chat completions)
pub struct GroqClient {
    base_url: String,
    model: String,
    http_client: reqwest::Client,
    auth_header: HeaderValue,
}

impl GroqClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        let auth_header = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| LlmError::authentication(format!("Invalid API key format: {}", e)))?;

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300))
            .build()
            .map_err(|e| LlmError::Network { source: e })?;

        Ok(Self {
            base_url: "https://api.groq.com".to_string(),
            model: crate::models::groq::LLAMA_3_3_70B_ID.to_string(),
            http_client,
            auth_header,
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn chat_completion(
        &self,
        request: GroqChatRequest,
    ) -> Result<GroqChatResponse, LlmError> {
        let url = format!("{}/openai/v1/chat/completions", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            if let Ok(error_response) = serde_json::from_str::<GroqErrorResponse>(&error_body) {
                return Err(Self::map_error(status.as_u16(), error_response.error.message));
            }

            return Err(LlmError::api_error(status.as_u16(), error_body));
        }

        let chat_response = response
            .json::<GroqChatResponse>()
            .await
            .map_err(|e| LlmError::internal(format!("Failed to parse response: {}", e)))?;

        Ok(chat_response)
    }

    fn map_error(status: u16, message: String) -> LlmError {
        match status {
            400 => LlmError::invalid_request(message),
            401 | 403 => LlmError::Authentication { message },
            429 => LlmError::rate_limit(message, None),
            _ => LlmError::api_error(status, message),
        }
    }
}

#[async_trait]
impl crate::client::LlmClient for GroqClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let groq_request = GroqChatRequest {
            model: self.model.clone(),
            messages: vec![GroqMessage::user(request.prompt)],
            max_tokens: Some(request.max_tokens),
            temperature: request.temperature,
        };

        let response = self.chat_completion(groq_request).await?;

        Ok(CompletionResponse {
            text: response.text(),
            usage: response.usage.map(|usage| Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            }),
        })
    }

    fn provider_name(&self) -> &str {
        crate::providers::GROQ
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GroqClient::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_creation_empty_key() {
        let client = GroqClient::new("");
        assert!(client.is_err());
    }

    #[test]
    fn test_response_text_takes_first_choice() {
        let response = GroqChatResponse {
            choices: vec![GroqChoice {
                message: GroqMessage {
                    role: "assistant".to_string(),
                    content: "answer".to_string(),
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: None,
        };
        assert_eq!(response.text(), "answer");
    }
}
