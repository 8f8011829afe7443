//! OpenAI chat completions backend.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};

use scribe_core::ports::{CompletionError, CompletionRequest, ProviderKind, TextCompletion};

use super::send_error;

pub struct OpenAiBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(client: Client, base_url: String, model: String) -> Self {
        Self {
            client,
            base_url,
            model,
        }
    }
}

fn request_body(model: &str, request: &CompletionRequest) -> Value {
    json!({
        "model": model,
        "messages": [
            { "role": "system", "content": request.system },
            { "role": "user", "content": request.prompt }
        ],
        "max_tokens": request.max_tokens,
        "temperature": request.temperature,
    })
}

fn parse_response(body: &Value) -> Result<String, CompletionError> {
    let choice = body["choices"]
        .as_array()
        .and_then(|c| c.first())
        .ok_or_else(|| CompletionError::InvalidResponse("no choices".to_string()))?;

    if choice["finish_reason"].as_str() == Some("content_filter") {
        return Err(CompletionError::Blocked("SAFETY: content_filter".to_string()));
    }

    // A null content is an empty answer.
    Ok(choice["message"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string())
}

/// `{"error": {"message", "type", "code"}}` -> `"code: message"`.
fn parse_error(status: u16, body: &str) -> CompletionError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let error = &v["error"];
            let message = error["message"].as_str()?;
            let code = error["code"].as_str().or_else(|| error["type"].as_str());
            Some(match code {
                Some(code) => format!("{code}: {message}"),
                None => message.to_string(),
            })
        })
        .unwrap_or_else(|| body.to_string());

    CompletionError::Provider { status, message }
}

#[async_trait]
impl TextCompletion for OpenAiBackend {
    fn provider(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, CompletionError> {
        tracing::debug!(model = %self.model, max_tokens = request.max_tokens, "Calling OpenAI");

        let resp = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body(&self.model, request))
            .send()
            .await
            .map_err(send_error)?;

        let status = resp.status();
        let text = resp.text().await.map_err(send_error)?;

        if !status.is_success() {
            let err = parse_error(status.as_u16(), &text);
            tracing::warn!(status = status.as_u16(), error = %err, "OpenAI request failed");
            return Err(err);
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;
        parse_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body() {
        let body = request_body(
            "gpt-3.5-turbo",
            &CompletionRequest {
                system: "sys".to_string(),
                prompt: "write".to_string(),
                max_tokens: 4000,
                temperature: 0.5,
            },
        );

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 4000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "write");
    }

    #[test]
    fn test_parse_response() {
        let body = json!({
            "choices": [{ "message": { "content": "# Post" }, "finish_reason": "stop" }]
        });
        assert_eq!(parse_response(&body).unwrap(), "# Post");

        let null_content = json!({
            "choices": [{ "message": { "content": null }, "finish_reason": "stop" }]
        });
        assert_eq!(parse_response(&null_content).unwrap(), "");
    }

    #[test]
    fn test_content_filter_is_blocked() {
        let body = json!({
            "choices": [{ "message": { "content": null }, "finish_reason": "content_filter" }]
        });
        assert!(matches!(
            parse_response(&body),
            Err(CompletionError::Blocked(_))
        ));
    }

    #[test]
    fn test_parse_error_prefers_code() {
        let body = r#"{"error":{"message":"You exceeded your current quota","type":"insufficient_quota","code":"insufficient_quota"}}"#;
        assert_eq!(
            parse_error(429, body),
            CompletionError::Provider {
                status: 429,
                message: "insufficient_quota: You exceeded your current quota".to_string(),
            }
        );

        let typed = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":null}}"#;
        assert!(matches!(
            parse_error(401, typed),
            CompletionError::Provider { message, .. } if message.starts_with("invalid_request_error")
        ));
    }
}
