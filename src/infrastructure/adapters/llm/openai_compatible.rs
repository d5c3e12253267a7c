//! OpenAI 兼容的 chat completions 客户端
//!
//! POST {endpoint}/chat/completions
//! Authorization: Bearer {api_key}
//! Request: {"model", "messages": [system, user], "temperature", "max_tokens"}
//! Response: 取第一个非空的 choices[].message.content

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LanguageModelPort, LlmError, Provider};

use super::{build_http_client, ensure_success, map_send_error, ProviderProfile, RequestOptions};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn extract_content(response: ChatCompletionResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .filter_map(|choice| choice.message.and_then(|m| m.content))
        .find(|content| !content.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

/// Groq / DeepSeek / Qwen 共用的客户端
pub struct OpenAiCompatibleClient {
    client: Client,
    profile: ProviderProfile,
    api_key: String,
    options: RequestOptions,
}

impl OpenAiCompatibleClient {
    pub fn new(
        profile: ProviderProfile,
        api_key: String,
        options: RequestOptions,
    ) -> Result<Self, LlmError> {
        let client = build_http_client(&options)?;
        Ok(Self {
            client,
            profile,
            api_key,
            options,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.profile.endpoint.trim_end_matches('/'))
    }

    fn build_request<'a>(
        &'a self,
        system_persona: &'a str,
        prompt: &'a str,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.profile.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_persona,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.options.temperature,
            max_tokens: self.options.max_tokens,
        }
    }
}

#[async_trait]
impl LanguageModelPort for OpenAiCompatibleClient {
    async fn complete(&self, system_persona: &str, prompt: &str) -> Result<String, LlmError> {
        let url = self.completions_url();
        let request = self.build_request(system_persona, prompt);

        tracing::debug!(
            provider = %self.profile.provider,
            model = %self.profile.model,
            url = %url,
            prompt_chars = prompt.chars().count(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_send_error(e, &self.profile.endpoint))?;

        let response = ensure_success(response).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to decode completion: {}", e))
        })?;

        let content = extract_content(parsed)?;

        tracing::info!(
            provider = %self.profile.provider,
            model = %self.profile.model,
            output_chars = content.chars().count(),
            "Chat completion received"
        );

        Ok(content)
    }

    fn provider(&self) -> Provider {
        self.profile.provider
    }

    fn model(&self) -> &str {
        &self.profile.model
    }
}

#[cfg(test)]
mod tests {
    use super::super::stub_server::respond_once;
    use super::*;
    use serde_json::json;

    fn client(endpoint: &str) -> OpenAiCompatibleClient {
        let mut profile = ProviderProfile::builtin(Provider::DeepSeek);
        profile.endpoint = endpoint.to_string();
        OpenAiCompatibleClient::new(profile, "key".to_string(), RequestOptions::default()).unwrap()
    }

    #[test]
    fn test_completions_url_ignores_trailing_slash() {
        assert_eq!(
            client("https://api.deepseek.com/").completions_url(),
            "https://api.deepseek.com/chat/completions"
        );
    }

    #[test]
    fn test_request_body_has_system_then_user() {
        let client = client("https://api.deepseek.com");
        let body = serde_json::to_value(client.build_request("人设", "提示词")).unwrap();

        assert_eq!(body["model"], "deepseek-chat");
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"][0], json!({"role": "system", "content": "人设"}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "提示词"}));
        assert!((body["temperature"].as_f64().unwrap() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_extract_first_non_empty_choice() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [
                {"message": {"content": "  "}},
                {"message": {"role": "assistant", "content": "她坐在窗前"}}
            ]
        }))
        .unwrap();
        assert_eq!(extract_content(response).unwrap(), "她坐在窗前");
    }

    #[test]
    fn test_no_choices_is_empty_response() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(extract_content(response), Err(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_complete_posts_to_chat_completions_with_bearer_auth() {
        let (endpoint, server) = respond_once(
            200,
            r#"{"choices":[{"message":{"role":"assistant","content":"白流苏"}}]}"#,
        )
        .await;

        let content = client(&endpoint).complete("人设", "提示词").await.unwrap();
        assert_eq!(content, "白流苏");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /chat/completions HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer key"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_error() {
        let (endpoint, server) = respond_once(429, "slow").await;

        let err = client(&endpoint).complete("人设", "提示词").await.unwrap_err();
        match err {
            LlmError::ServiceError { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow");
            }
            other => panic!("unexpected error: {other}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (endpoint, server) = respond_once(200, "bad").await;

        let err = client(&endpoint).complete("人设", "提示词").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = client("http://127.0.0.1:9");
        let err = client.complete("人设", "提示词").await.unwrap_err();
        assert!(matches!(err, LlmError::NetworkError(_) | LlmError::Timeout));
        assert!(!err.is_config());
    }
}
