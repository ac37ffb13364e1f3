//! Model-backed intent providers.
//!
//! A provider turns a raw chat message into model output text that
//! hopefully contains an intent JSON object. Providers are fail-open:
//! any transport or format problem yields `None` and the caller falls
//! back to rule-based parsing, so no remote failure ever surfaces as an
//! error to the chat user.

use futures::future::BoxFuture;
use serde_json::Value;

/// Default inference endpoint.
const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/tiiuae/falcon-7b-instruct";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// A source of raw model output for a chat message.
pub trait IntentProvider: Send + Sync {
    /// Generate model output for a message, or `None` on any failure.
    fn generate<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Option<String>>;
}

/// Configuration for the Hugging Face provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Bearer token; without one the provider always declines.
    pub api_token: Option<String>,
    /// Inference endpoint URL.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Build a config from the `HF_API_TOKEN` environment variable.
    pub fn from_env() -> Self {
        Self {
            api_token: std::env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom endpoint (for testing).
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Hugging Face text-generation inference provider.
pub struct HuggingFaceProvider {
    http: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceProvider {
    /// Create a provider with the given configuration.
    pub fn new(config: ProviderConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint,
            api_token: config.api_token,
        })
    }

    async fn call(&self, message: &str) -> Option<String> {
        let token = self.api_token.as_ref()?;

        let body = serde_json::json!({
            "inputs": build_prompt(message),
            "parameters": {
                "temperature": 0.1,
                "max_new_tokens": 120,
                "return_full_text": false,
            },
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::debug!("intent provider request failed: {e}"))
            .ok()?;

        let response = response
            .error_for_status()
            .inspect_err(|e| tracing::debug!("intent provider returned error status: {e}"))
            .ok()?;

        let payload: Value = response.json().await.ok()?;
        extract_generated_text(&payload)
    }
}

impl IntentProvider for HuggingFaceProvider {
    fn generate<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Option<String>> {
        Box::pin(self.call(message))
    }
}

/// The instruction prompt wrapped around the user message.
fn build_prompt(message: &str) -> String {
    format!(
        "You are an intent parser for a Lucknow bus chatbot.\n\
         Rules:\n\
         1) For greetings or small talk, return only JSON: {{\"intent\":\"greeting\"}}.\n\
         2) For travel query, return only JSON with keys exactly: {{\"from\":\"\",\"to\":\"\",\"after_time\":\"\"}}.\n\
         3) If intent cannot be extracted, return: {{\"from\":\"\",\"to\":\"\",\"after_time\":\"\"}}.\n\
         4) Never answer route details.\n\
         User: {message}\n\
         JSON:"
    )
}

/// Pull generated text out of the two response shapes the API uses:
/// a list of objects, or a single object.
fn extract_generated_text(payload: &Value) -> Option<String> {
    let text = match payload {
        Value::Array(items) => items.first()?.get("generated_text")?,
        Value::Object(map) => map.get("generated_text")?,
        _ => return None,
    };
    text.as_str().map(str::to_string)
}
