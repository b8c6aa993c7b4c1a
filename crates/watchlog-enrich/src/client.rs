use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::error::EnrichError;

/// Thin client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct AiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

impl AiClient {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// One chat completion round trip, returning the reply text
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, EnrichError> {
        let api_key = self.api_key.as_deref().ok_or(EnrichError::MissingApiKey)?;

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "temperature": 0.7,
        });

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, model = %self.model, "Sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| EnrichError::BadResponse("response has no choices".to_string()))?;
        Ok(content)
    }
}

/// Strip a Markdown code fence the model may wrap JSON replies in
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
