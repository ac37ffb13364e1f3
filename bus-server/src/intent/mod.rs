//! Natural-language intent extraction.
//!
//! Turns a free-text chat message into a structured intent. A pluggable
//! model provider gets the first attempt; its output is parsed as JSON
//! with some tolerance for chatty formatting. Anything the provider
//! cannot handle falls through to pure rule-based extraction, so intent
//! parsing never fails outright.

mod provider;
mod rules;

pub use provider::{HuggingFaceProvider, IntentProvider, ProviderConfig};
pub use rules::rule_fallback;

use moka::future::Cache;
use serde_json::Value;

/// A structured route query extracted from a message.
///
/// Fields may be empty when the message named no usable value; the chat
/// layer prompts for the missing pieces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteQuery {
    pub from: String,
    pub to: String,
    pub after_time: String,
}

/// What the user meant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Greeting or small talk.
    Greeting,
    /// A travel question.
    RouteQuery(RouteQuery),
    /// Could not tell.
    Unknown,
}

/// Default cache capacity for parsed intents.
const CACHE_CAPACITY: u64 = 1024;

/// Cache TTL for parsed intents.
const CACHE_TTL: std::time::Duration = std::time::Duration::from_secs(10 * 60);

/// Intent parser composing a model provider with a rule fallback.
///
/// Identical messages parse to identical intents while the timetable is
/// static, so results are cached briefly to avoid repeat provider calls.
pub struct IntentParser {
    provider: Box<dyn IntentProvider>,
    cache: Cache<String, Intent>,
}

impl IntentParser {
    /// Create a parser over the given provider.
    pub fn new(provider: Box<dyn IntentProvider>) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self { provider, cache }
    }

    /// Parse a chat message into an intent.
    pub async fn parse_intent(&self, message: &str) -> Intent {
        let key = crate::domain::normalize(message);

        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        let intent = self.parse_uncached(message).await;
        self.cache.insert(key, intent.clone()).await;
        intent
    }

    async fn parse_uncached(&self, message: &str) -> Intent {
        if let Some(raw) = self.provider.generate(message).await {
            if let Some(intent) = parse_model_output(&raw) {
                return intent;
            }
            tracing::debug!("model output was unusable, falling back to rules");
        }

        rule_fallback(message)
    }
}

/// Interpret raw model output as an intent, tolerantly.
///
/// Returns `None` when no usable JSON object can be dug out, which sends
/// the caller to the rule fallback.
fn parse_model_output(raw: &str) -> Option<Intent> {
    let payload = extract_json(raw)?;

    let intent_value = payload
        .get("intent")
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .to_lowercase();
    if intent_value == "greeting" {
        return Some(Intent::Greeting);
    }

    if ["from", "to", "after_time"]
        .iter()
        .all(|k| payload.contains_key(*k))
    {
        let field = |k: &str| payload.get(k).and_then(Value::as_str).unwrap_or("");
        return Some(Intent::RouteQuery(RouteQuery {
            from: rules::clean_place(field("from")),
            to: rules::clean_place(field("to")),
            after_time: rules::clean_after_time(field("after_time")),
        }));
    }

    None
}

/// Find a JSON object in possibly chatty model output.
///
/// Strips Markdown code fences, then tries the whole text, then the
/// outermost brace-delimited span.
fn extract_json(text: &str) -> Option<serde_json::Map<String, Value>> {
    let mut cleaned = text.trim().to_string();
    if cleaned.starts_with("```") {
        cleaned = cleaned
            .replace("```json", "")
            .replace("```", "")
            .trim()
            .to_string();
    }

    if let Ok(Value::Object(map)) = serde_json::from_str(&cleaned) {
        return Some(map);
    }

    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end <= start {
        return None;
    }
    match serde_json::from_str(&cleaned[start..=end]) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
