use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::types::{Completion, CompletionRequest};

/// Per-provider deadline for a single completion attempt.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Routes completion requests through an ordered list of providers.
///
/// Providers are tried in registration order; the first one that answers
/// within the timeout wins. Failures are logged and the next provider is
/// tried, so a single flaky upstream does not fail the caller.
pub struct CompletionManager {
    clients: Vec<Arc<dyn LlmClient>>,
    timeout: Duration,
}

impl CompletionManager {
    pub fn new(clients: Vec<Arc<dyn LlmClient>>) -> Self {
        Self {
            clients,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Providers registered, in fallback order.
    pub fn provider_names(&self) -> Vec<String> {
        self.clients
            .iter()
            .map(|client| client.provider_name().to_string())
            .collect()
    }

    pub fn has_providers(&self) -> bool {
        !self.clients.is_empty()
    }

    /// Send `prompt` to the first provider that answers.
    pub async fn analyze(
        &self,
        prompt: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Completion, LlmError> {
        if self.clients.is_empty() {
            return Err(LlmError::exhausted("no providers configured"));
        }

        let request = CompletionRequest::new(prompt, max_tokens);
        let mut last_error: Option<LlmError> = None;

        for client in &self.clients {
            let provider = client.provider_name().to_string();
            debug!(provider = %provider, model = %client.model_name(), "trying completion provider");

            let attempt = tokio::time::timeout(self.timeout, client.complete(request.clone())).await;

            match attempt {
                Ok(Ok(response)) => {
                    debug!(provider = %provider, "completion succeeded");
                    return Ok(Completion {
                        text: response.text,
                        provider,
                    });
                }
                Ok(Err(e)) => {
                    warn!(provider = %provider, error = %e, "provider failed, falling back");
                    last_error = Some(e);
                }
                Err(_) => {
                    let e = LlmError::Timeout {
                        provider: provider.clone(),
                        seconds: self.timeout.as_secs(),
                    };
                    warn!(provider = %provider, error = %e, "provider timed out, falling back");
                    last_error = Some(e);
                }
            }
        }

        let cause = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown cause".to_string());
        Err(LlmError::exhausted(cause))
    }
}
