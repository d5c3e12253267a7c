//! Provider 表与后端工厂
//!
//! 每个后端对应一个 {endpoint, model, 凭证环境变量} 三元组，
//! 内置默认值可以被配置文件覆盖。构造时解析凭证，
//! 未知后端或缺少凭证立即返回配置错误，不发出任何网络请求。

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{LanguageModelPort, LlmError, Provider, WireStyle};
use crate::config::{GenerationConfig, ProviderOverride, ProvidersConfig};

use super::gemini::GeminiClient;
use super::openai_compatible::OpenAiCompatibleClient;

/// 解析完成的后端描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderProfile {
    pub provider: Provider,
    pub endpoint: String,
    pub model: String,
    /// 按顺序检查的凭证环境变量
    pub credential_env_vars: Vec<String>,
}

impl ProviderProfile {
    /// 内置默认值
    pub fn builtin(provider: Provider) -> Self {
        let (endpoint, model, env_vars): (&str, &str, &[&str]) = match provider {
            Provider::Groq => (
                "https://api.groq.com/openai/v1",
                "llama-3.3-70b-versatile",
                &["GROQ_API_KEY"],
            ),
            Provider::DeepSeek => (
                "https://api.deepseek.com",
                "deepseek-chat",
                &["DEEPSEEK_API_KEY"],
            ),
            Provider::Qwen => (
                "https://dashscope-intl.aliyuncs.com/compatible-mode/v1",
                "qwen-plus",
                &["QWEN_API_KEY", "DASHSCOPE_API_KEY"],
            ),
            Provider::Gemini => (
                "https://generativelanguage.googleapis.com/v1beta",
                "gemini-1.5-pro-latest",
                &["GEMINI_API_KEY"],
            ),
        };

        Self {
            provider,
            endpoint: endpoint.to_string(),
            model: model.to_string(),
            credential_env_vars: env_vars.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// 应用配置文件中的覆盖项
    pub fn with_override(mut self, overrides: &ProviderOverride) -> Self {
        if let Some(endpoint) = non_empty(overrides.endpoint.as_deref()) {
            self.endpoint = endpoint.to_string();
        }
        if let Some(model) = non_empty(overrides.model.as_deref()) {
            self.model = model.to_string();
        }
        if let Some(vars) = &overrides.credential_env_vars {
            self.credential_env_vars = vars.clone();
        }
        self
    }

    pub fn resolve(provider: Provider, providers: &ProvidersConfig) -> Self {
        Self::builtin(provider).with_override(providers.for_provider(provider))
    }
}

/// 后端请求参数（温度、长度上限、超时）
#[derive(Debug, Clone, Copy)]
pub struct RequestOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// None 表示不设超时
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 2000,
            timeout: None,
        }
    }
}

impl From<&GenerationConfig> for RequestOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs)),
        }
    }
}

/// 解析 API Key
///
/// 显式传入的 key 优先；否则按顺序检查环境变量，第一个非空值生效
pub fn resolve_api_key(
    explicit: Option<&str>,
    profile: &ProviderProfile,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, LlmError> {
    if let Some(key) = non_empty(explicit) {
        return Ok(key.to_string());
    }

    profile
        .credential_env_vars
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .ok_or_else(|| LlmError::MissingCredential {
            provider: profile.provider,
            env_vars: profile.credential_env_vars.join(", "),
        })
}

/// 按名称创建后端，凭证从进程环境变量读取
pub fn create_language_model(
    provider_name: &str,
    explicit_key: Option<&str>,
    generation: &GenerationConfig,
    providers: &ProvidersConfig,
) -> Result<Arc<dyn LanguageModelPort>, LlmError> {
    create_language_model_with_env(provider_name, explicit_key, generation, providers, |name| {
        std::env::var(name).ok()
    })
}

/// 按名称创建后端，使用给定的环境变量查找函数
pub fn create_language_model_with_env(
    provider_name: &str,
    explicit_key: Option<&str>,
    generation: &GenerationConfig,
    providers: &ProvidersConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn LanguageModelPort>, LlmError> {
    let provider: Provider = provider_name.parse()?;
    let profile = ProviderProfile::resolve(provider, providers);
    let api_key = resolve_api_key(explicit_key, &profile, lookup)?;
    let options = RequestOptions::from(generation);

    let model: Arc<dyn LanguageModelPort> = match provider.wire_style() {
        WireStyle::Chat => Arc::new(OpenAiCompatibleClient::new(
            profile.clone(),
            api_key,
            options,
        )?),
        WireStyle::SingleTurn => {
            Arc::new(GeminiClient::new(profile.clone(), api_key, options)?)
        }
    };

    tracing::info!(
        provider = %provider,
        model = %profile.model,
        endpoint = %profile.endpoint,
        "Language model backend initialized"
    );

    Ok(model)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_builtin_table() {
        let qwen = ProviderProfile::builtin(Provider::Qwen);
        assert_eq!(qwen.model, "qwen-plus");
        assert_eq!(
            qwen.credential_env_vars,
            vec!["QWEN_API_KEY".to_string(), "DASHSCOPE_API_KEY".to_string()]
        );
        assert_eq!(
            ProviderProfile::builtin(Provider::Groq).endpoint,
            "https://api.groq.com/openai/v1"
        );
    }

    #[test]
    fn test_override_replaces_only_given_fields() {
        let overrides = ProviderOverride {
            model: Some("qwen-turbo".to_string()),
            endpoint: Some("  ".to_string()),
            credential_env_vars: None,
        };
        let profile = ProviderProfile::builtin(Provider::Qwen).with_override(&overrides);
        assert_eq!(profile.model, "qwen-turbo");
        assert_eq!(
            profile.endpoint,
            "https://dashscope-intl.aliyuncs.com/compatible-mode/v1"
        );
    }

    #[test]
    fn test_explicit_key_wins() {
        let profile = ProviderProfile::builtin(Provider::Groq);
        let key = resolve_api_key(
            Some("explicit"),
            &profile,
            env(&[("GROQ_API_KEY", "from-env")]),
        );
        assert_eq!(key.unwrap(), "explicit");
    }

    #[test]
    fn test_env_vars_checked_in_order() {
        let profile = ProviderProfile::builtin(Provider::Qwen);

        let key = resolve_api_key(
            None,
            &profile,
            env(&[("QWEN_API_KEY", "first"), ("DASHSCOPE_API_KEY", "second")]),
        );
        assert_eq!(key.unwrap(), "first");

        let key = resolve_api_key(
            None,
            &profile,
            env(&[("QWEN_API_KEY", ""), ("DASHSCOPE_API_KEY", "second")]),
        );
        assert_eq!(key.unwrap(), "second");
    }

    #[test]
    fn test_missing_credential_fails_at_construction() {
        let result = create_language_model_with_env(
            "deepseek",
            None,
            &GenerationConfig::default(),
            &ProvidersConfig::default(),
            env(&[]),
        );
        match result {
            Err(LlmError::MissingCredential { provider, env_vars }) => {
                assert_eq!(provider, Provider::DeepSeek);
                assert_eq!(env_vars, "DEEPSEEK_API_KEY");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_unknown_provider_fails_before_credentials() {
        let result = create_language_model_with_env(
            "claude-free",
            Some("key"),
            &GenerationConfig::default(),
            &ProvidersConfig::default(),
            env(&[]),
        );
        assert!(matches!(result, Err(LlmError::UnsupportedProvider(_))));
    }

    #[test]
    fn test_create_each_provider() {
        for provider in Provider::ALL {
            let model = create_language_model_with_env(
                provider.as_str(),
                Some("test-key"),
                &GenerationConfig::default(),
                &ProvidersConfig::default(),
                env(&[]),
            )
            .unwrap();
            assert_eq!(model.provider(), provider);
            assert_eq!(model.model(), ProviderProfile::builtin(provider).model);
        }
    }

    #[test]
    fn test_request_options_from_config() {
        let mut config = GenerationConfig::default();
        let options = RequestOptions::from(&config);
        assert_eq!(options.max_tokens, 2000);
        assert!(options.timeout.is_none());

        config.timeout_secs = 90;
        assert_eq!(
            RequestOptions::from(&config).timeout,
            Some(Duration::from_secs(90))
        );
    }
}
