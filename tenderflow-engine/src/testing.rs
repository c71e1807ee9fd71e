//! Shared test doubles for the delegate completion chain.

use std::sync::Arc;

use async_trait::async_trait;
use tenderflow_llm_sdk::{
    CompletionManager, CompletionRequest, CompletionResponse, LlmClient, LlmError,
};

/// Canned single-provider client.
pub struct StubClient {
    reply: Result<&'static str, &'static str>,
}

#[async_trait]
impl LlmClient for StubClient {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        match self.reply {
            Ok(text) => Ok(CompletionResponse {
                text: text.to_string(),
                usage: None,
            }),
            Err(message) => Err(LlmError::internal(message)),
        }
    }

    fn provider_name(&self) -> &str {
        "stub"
    }

    fn model_name(&self) -> &str {
        "stub-model"
    }
}

/// A one-provider manager answering with the canned reply.
pub fn stub_manager(reply: Result<&'static str, &'static str>) -> Arc<CompletionManager> {
    Arc::new(CompletionManager::new(vec![Arc::new(StubClient { reply })]))
}
