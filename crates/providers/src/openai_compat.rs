//! OpenAI-compatible adapter.
//!
//! Works with OpenAI, Ollama, vLLM, LM Studio, Together, and any other
//! endpoint that follows the OpenAI chat completions contract.

use std::time::{Duration, Instant};

use crate::traits::{CompletionRequest, CompletionResponse, LlmProvider, Usage};
use crate::util::{from_reqwest, resolve_api_key};
use cp_domain::config::LlmConfig;
use cp_domain::error::{Error, Result};
use cp_domain::trace::TraceEvent;
use serde_json::Value;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// An LLM provider adapter for any OpenAI-compatible API endpoint.
pub struct OpenAiCompatProvider {
    id: String,
    base_url: String,
    api_key: String,
    auth_header: String,
    auth_prefix: String,
    default_model: String,
    temperature: f32,
    max_tokens: u32,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new provider from the `[llm]` config section.
    ///
    /// The API key is resolved once, here.
    pub fn from_config(cfg: &LlmConfig) -> Result<Self> {
        let provider = &cfg.provider;
        if provider.base_url.trim().is_empty() {
            return Err(Error::Config(format!(
                "provider '{}' has an empty base_url",
                provider.id
            )));
        }
        let api_key = resolve_api_key(&provider.auth)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            id: provider.id.clone(),
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            api_key,
            auth_header: provider
                .auth
                .header
                .clone()
                .unwrap_or_else(|| "Authorization".into()),
            auth_prefix: provider
                .auth
                .prefix
                .clone()
                .unwrap_or_else(|| "Bearer ".into()),
            default_model: provider.default_model.clone(),
            temperature: cfg.temperature,
            max_tokens: cfg.max_tokens,
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn authed_post(&self, url: &str) -> reqwest::RequestBuilder {
        let header_value = format!("{}{}", self.auth_prefix, self.api_key);
        self.client
            .post(url)
            .header(&self.auth_header, &header_value)
            .header("Content-Type", "application/json")
    }

    fn effective_model(&self, req: &CompletionRequest) -> String {
        req.model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.default_model.clone())
    }

    fn build_chat_body(&self, req: &CompletionRequest) -> Value {
        serde_json::json!({
            "model": self.effective_model(req),
            "messages": [
                { "role": "user", "content": req.prompt },
            ],
            "temperature": req.temperature.unwrap_or(self.temperature),
            "max_tokens": req.max_tokens.unwrap_or(self.max_tokens),
            "stream": false,
        })
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_chat_response(provider: &str, body: &Value) -> Result<CompletionResponse> {
    let choice = body
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Provider {
            provider: provider.into(),
            message: "no choices in response".into(),
        })?;

    let message = choice.get("message").ok_or_else(|| Error::Provider {
        provider: provider.into(),
        message: "no message in choice".into(),
    })?;

    let content = message
        .get("content")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .trim();
    if content.is_empty() {
        return Err(Error::Provider {
            provider: provider.into(),
            message: "empty reply".into(),
        });
    }

    let finish_reason = choice
        .get("finish_reason")
        .and_then(|v| v.as_str())
        .map(String::from);

    let model = body
        .get("model")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(CompletionResponse {
        content: content.to_string(),
        model,
        usage: body.get("usage").and_then(parse_openai_usage),
        finish_reason,
    })
}

fn parse_openai_usage(v: &Value) -> Option<Usage> {
    Some(Usage {
        prompt_tokens: v.get("prompt_tokens")?.as_u64()? as u32,
        completion_tokens: v.get("completion_tokens")?.as_u64()? as u32,
        total_tokens: v.get("total_tokens")?.as_u64()? as u32,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl LlmProvider for OpenAiCompatProvider {
    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse> {
        let url = self.chat_url();
        let body = self.build_chat_body(req);
        let started = Instant::now();

        tracing::debug!(provider = %self.id, url = %url, "openai_compat chat request");

        let resp = self
            .authed_post(&url)
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Provider {
                provider: self.id.clone(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        let response = parse_chat_response(&self.id, &resp_json)?;

        TraceEvent::LlmRequest {
            provider: self.id.clone(),
            model: response.model.clone(),
            prompt_chars: req.prompt.chars().count(),
            duration_ms: started.elapsed().as_millis() as u64,
            prompt_tokens: response.usage.map(|u| u.prompt_tokens),
            completion_tokens: response.usage.map(|u| u.completion_tokens),
        }
        .emit();

        Ok(response)
    }

    fn provider_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cp_domain::config::{AuthConfig, ProviderConfig};

    fn provider() -> OpenAiCompatProvider {
        let cfg = LlmConfig {
            provider: ProviderConfig {
                id: "local".into(),
                base_url: "http://localhost:11434/v1/".into(),
                auth: AuthConfig {
                    key: Some("sk-local".into()),
                    ..Default::default()
                },
                default_model: "llama3".into(),
            },
            ..Default::default()
        };
        OpenAiCompatProvider::from_config(&cfg).unwrap()
    }

    #[test]
    fn url_strips_trailing_slash() {
        assert_eq!(
            provider().chat_url(),
            "http://localhost:11434/v1/chat/completions"
        );
    }

    #[test]
    fn body_uses_configured_defaults() {
        let body = provider().build_chat_body(&CompletionRequest::new("hello"));
        assert_eq!(body["model"], "llama3");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["max_tokens"], 2000);
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(body["stream"], false);
    }

    #[test]
    fn request_overrides_win() {
        let req = CompletionRequest {
            prompt: "p".into(),
            model: Some("gpt-4o".into()),
            temperature: Some(0.0),
            max_tokens: Some(64),
        };
        let body = provider().build_chat_body(&req);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 64);
        assert_eq!(body["temperature"].as_f64(), Some(0.0));
    }

    #[test]
    fn blank_model_override_falls_back() {
        let req = CompletionRequest {
            model: Some("  ".into()),
            ..CompletionRequest::new("p")
        };
        assert_eq!(provider().build_chat_body(&req)["model"], "llama3");
    }

    #[test]
    fn parses_and_trims_reply() {
        let body = serde_json::json!({
            "model": "gpt-3.5-turbo-0125",
            "choices": [{
                "message": { "role": "assistant", "content": "\n  Edit main.py.  \n" },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 8, "total_tokens": 128 }
        });
        let resp = parse_chat_response("openai", &body).unwrap();
        assert_eq!(resp.content, "Edit main.py.");
        assert_eq!(resp.model, "gpt-3.5-turbo-0125");
        assert_eq!(resp.finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.usage.map(|u| u.total_tokens), Some(128));
    }

    #[test]
    fn empty_reply_is_an_error() {
        let body = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": "   " } }]
        });
        let err = parse_chat_response("openai", &body).unwrap_err();
        assert!(matches!(err, Error::Provider { .. }));
        assert!(err.to_string().contains("empty reply"));
    }

    #[test]
    fn missing_choices_is_an_error() {
        let err = parse_chat_response("openai", &serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let mut cfg = LlmConfig::default();
        cfg.provider.base_url = " ".into();
        cfg.provider.auth.key = Some("k".into());
        assert!(matches!(
            OpenAiCompatProvider::from_config(&cfg),
            Err(Error::Config(_))
        ));
    }
}
