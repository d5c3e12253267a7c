//! Language Model Adapters
//!
//! - openai_compatible: 消息式后端（Groq / DeepSeek / Qwen）
//! - gemini: 单轮后端
//! - provider: 后端表与工厂

mod gemini;
mod openai_compatible;
mod provider;

pub use gemini::GeminiClient;
pub use openai_compatible::OpenAiCompatibleClient;
pub use provider::{
    create_language_model, create_language_model_with_env, resolve_api_key, ProviderProfile,
    RequestOptions,
};

use reqwest::{Client, Response};

use crate::application::ports::LlmError;

fn build_http_client(options: &RequestOptions) -> Result<Client, LlmError> {
    let mut builder = Client::builder();
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| LlmError::InvalidConfig(format!("Failed to build HTTP client: {}", e)))
}

fn map_send_error(err: reqwest::Error, endpoint: &str) -> LlmError {
    if err.is_timeout() {
        LlmError::Timeout
    } else if err.is_connect() {
        LlmError::NetworkError(format!("Cannot connect to {}: {}", endpoint, err))
    } else {
        LlmError::NetworkError(err.to_string())
    }
}

/// 非 2xx 响应转换为 ServiceError，保留响应体
async fn ensure_success(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(LlmError::ServiceError {
        status: status.as_u16(),
        body,
    })
}
