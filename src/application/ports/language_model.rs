//! Language Model Port - 文本生成后端抽象
//!
//! 定义"系统人设 + 用户提示词 -> 文本"的统一接口，
//! 具体的各家服务实现在 infrastructure/adapters/llm

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 文本生成错误
///
/// 配置类错误在构造后端时立即返回；其余为远程调用错误，原样向上传播，不重试。
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Unsupported provider: {0} (expected one of: groq, deepseek, qwen, gemini)")]
    UnsupportedProvider(String),

    #[error("API key for {provider} not found: set one of [{env_vars}] or pass an explicit key")]
    MissingCredential {
        provider: Provider,
        env_vars: String,
    },

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: HTTP {status}: {body}")]
    ServiceError { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned an empty response")]
    EmptyResponse,
}

impl LlmError {
    /// 是否为构造阶段的配置错误
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            LlmError::UnsupportedProvider(_)
                | LlmError::MissingCredential { .. }
                | LlmError::InvalidConfig(_)
        )
    }
}

/// 后端的调用方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireStyle {
    /// 消息式：system + user 两条消息
    Chat,
    /// 单轮：只发送一段提示词
    SingleTurn,
}

/// 支持的后端服务（封闭集合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Groq,
    DeepSeek,
    Qwen,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Groq,
        Provider::DeepSeek,
        Provider::Qwen,
        Provider::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Groq => "groq",
            Provider::DeepSeek => "deepseek",
            Provider::Qwen => "qwen",
            Provider::Gemini => "gemini",
        }
    }

    pub fn wire_style(&self) -> WireStyle {
        match self {
            Provider::Gemini => WireStyle::SingleTurn,
            _ => WireStyle::Chat,
        }
    }
}

impl Default for Provider {
    fn default() -> Self {
        Provider::Groq
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Ok(Provider::Groq),
            "deepseek" => Ok(Provider::DeepSeek),
            "qwen" => Ok(Provider::Qwen),
            "gemini" => Ok(Provider::Gemini),
            _ => Err(LlmError::UnsupportedProvider(s.to_string())),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Language Model Port
///
/// 每个实现封装自己的 endpoint / 凭证 / 模型三元组
#[async_trait]
pub trait LanguageModelPort: Send + Sync {
    /// 用固定的系统人设和一段用户提示词生成文本
    ///
    /// 单轮后端可以忽略 `system_persona`
    async fn complete(&self, system_persona: &str, prompt: &str) -> Result<String, LlmError>;

    /// 后端标识
    fn provider(&self) -> Provider;

    /// 模型名称（用于日志）
    fn model(&self) -> &str;
}
