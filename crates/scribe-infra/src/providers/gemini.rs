//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use scribe_core::ports::{CompletionError, CompletionRequest, ProviderKind, TextCompletion};

use super::send_error;

pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiBackend {
    pub fn new(client: Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn request_body(request: &CompletionRequest) -> Value {
    json!({
        "systemInstruction": {
            "parts": [{ "text": request.system }]
        },
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }]
        }],
        "generationConfig": {
            "maxOutputTokens": request.max_tokens,
            "temperature": request.temperature,
        }
    })
}

/// Extract the generated text from a successful response.
fn parse_response(body: &Value) -> Result<String, CompletionError> {
    if let Some(reason) = body["promptFeedback"]["blockReason"].as_str() {
        return Err(CompletionError::Blocked(format!("blockReason {reason}")));
    }

    let candidate = body["candidates"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or_else(|| CompletionError::InvalidResponse("no candidates".to_string()))?;

    let text: String = candidate["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
        .unwrap_or_default();

    // Any other finish reason with no text means the candidate was withheld.
    let finish_reason = candidate["finishReason"].as_str().unwrap_or_default();
    if text.is_empty() && !matches!(finish_reason, "" | "STOP" | "MAX_TOKENS") {
        return Err(CompletionError::Blocked(format!(
            "finishReason {finish_reason}"
        )));
    }

    Ok(text)
}

/// `{"error": {"code", "message", "status"}}` -> `"STATUS: message"`.
fn parse_error(status: u16, body: &str) -> CompletionError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let error = &v["error"];
            let message = error["message"].as_str()?;
            Some(match error["status"].as_str() {
                Some(code) => format!("{code}: {message}"),
                None => message.to_string(),
            })
        })
        .unwrap_or_else(|| body.to_string());

    CompletionError::Provider { status, message }
}

#[async_trait]
impl TextCompletion for GeminiBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        tracing::debug!(model = %self.model, max_tokens = request.max_tokens, "Calling Gemini");

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(request))
            .send()
            .await
            .map_err(send_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(send_error)?;

        if !status.is_success() {
            let err = parse_error(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), error = %err, "Gemini request failed");
            return Err(err);
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;
        parse_response(&body)
    }
}
