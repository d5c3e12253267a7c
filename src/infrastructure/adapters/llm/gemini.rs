//! Gemini generateContent 客户端
//!
//! POST {endpoint}/models/{model}:generateContent
//! Header: x-goog-api-key
//!
//! 单轮调用：只发送用户提示词，不带系统人设；
//! 返回第一个候选中所有文本片段的拼接。

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{LanguageModelPort, LlmError, Provider};

use super::{build_http_client, ensure_success, map_send_error, ProviderProfile, RequestOptions};

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason", default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    for candidate in response.candidates {
        match candidate.finish_reason.as_deref() {
            Some("MAX_TOKENS") => tracing::warn!("Gemini response truncated by max tokens"),
            Some("SAFETY") => tracing::warn!("Gemini response blocked by safety filters"),
            _ => {}
        }

        let text: String = candidate
            .content
            .into_iter()
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .collect();

        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    Err(LlmError::EmptyResponse)
}

pub struct GeminiClient {
    client: Client,
    profile: ProviderProfile,
    api_key: String,
    options: RequestOptions,
}

impl GeminiClient {
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

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.profile.endpoint.trim_end_matches('/'),
            self.profile.model
        )
    }

    fn build_request<'a>(&self, prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: [Content {
                role: "user",
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.options.temperature,
                max_output_tokens: self.options.max_tokens,
            },
        }
    }
}

#[async_trait]
impl LanguageModelPort for GeminiClient {
    async fn complete(&self, _system_persona: &str, prompt: &str) -> Result<String, LlmError> {
        let url = self.generate_url();
        let request = self.build_request(prompt);

        tracing::debug!(
            model = %self.profile.model,
            url = %url,
            prompt_chars = prompt.chars().count(),
            "Sending Gemini generateContent request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| map_send_error(e, &self.profile.endpoint))?;

        let response = ensure_success(response).await?;

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::InvalidResponse(format!("Failed to decode Gemini response: {}", e))
        })?;

        let text = extract_text(parsed)?;

        tracing::info!(
            model = %self.profile.model,
            output_chars = text.chars().count(),
            "Gemini content received"
        );

        Ok(text)
    }

    fn provider(&self) -> Provider {
        Provider::Gemini
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

    fn client() -> GeminiClient {
        GeminiClient::new(
            ProviderProfile::builtin(Provider::Gemini),
            "key".to_string(),
            RequestOptions::default(),
        )
        .unwrap()
    }

    fn client_at(endpoint: &str) -> GeminiClient {
        let mut profile = ProviderProfile::builtin(Provider::Gemini);
        profile.endpoint = endpoint.to_string();
        GeminiClient::new(profile, "key".to_string(), RequestOptions::default()).unwrap()
    }

    #[tokio::test]
    async fn test_complete_posts_to_generate_content_with_api_key_header() {
        let (endpoint, server) = respond_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"七巧"}]},"finishReason":"STOP"}]}"#,
        )
        .await;

        let text = client_at(&endpoint).complete("人设", "提示词").await.unwrap();
        assert_eq!(text, "七巧");

        let request = server.await.unwrap();
        assert!(
            request.starts_with("POST /models/gemini-1.5-pro-latest:generateContent HTTP/1.1")
        );
        let lowered = request.to_lowercase();
        assert!(lowered.contains("x-goog-api-key: key"));
        assert!(!lowered.contains("authorization:"));
        // 单轮调用不发送系统人设
        assert!(!request.contains("人设"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_service_error() {
        let (endpoint, server) = respond_once(429, "slow").await;

        let err = client_at(&endpoint).complete("人设", "提示词").await.unwrap_err();
        assert!(matches!(
            err,
            LlmError::ServiceError { status: 429, ref body } if body == "slow"
        ));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (endpoint, server) = respond_once(200, "bad").await;

        let err = client_at(&endpoint).complete("人设", "提示词").await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(_)));
        server.await.unwrap();
    }

    #[test]
    fn test_generate_url() {
        assert_eq!(
            client().generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro-latest:generateContent"
        );
    }

    #[test]
    fn test_request_body_carries_only_the_prompt() {
        let body = serde_json::to_value(client().build_request("写一段")).unwrap();
        assert_eq!(
            body["contents"],
            json!([{"role": "user", "parts": [{"text": "写一段"}]}])
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2000);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_parts_are_concatenated() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [{"text": "月亮"}, {"inlineData": {}}, {"text": "很大"}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "月亮很大");
    }

    #[test]
    fn test_blocked_candidate_is_empty_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        }))
        .unwrap();
        assert!(matches!(extract_text(response), Err(LlmError::EmptyResponse)));
    }
}
