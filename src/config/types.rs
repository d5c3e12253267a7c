//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::ports::Provider;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 文本生成配置
    #[serde(default)]
    pub generation: GenerationConfig,

    /// 各后端的 endpoint / 模型 / 凭证环境变量覆盖
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// 风格语料配置
    #[serde(default)]
    pub corpus: CorpusConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 文档输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 文本生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// 后端名称: groq / deepseek / qwen / gemini
    #[serde(default = "default_provider")]
    pub provider: String,

    /// 显式 API Key，优先于环境变量
    #[serde(default)]
    pub api_key: Option<String>,

    /// 采样温度
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// 单次生成的最大 token 数
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// 请求超时（秒），0 表示不设超时
    #[serde(default)]
    pub timeout_secs: u64,

    /// 章节提示词中风格参考片段的长度（字符数）
    #[serde(default = "default_snippet_length")]
    pub snippet_length: usize,

    /// 传给下一章的前情提要长度（字符数）
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
}

fn default_provider() -> String {
    Provider::default().as_str().to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_snippet_length() -> usize {
    300
}

fn default_context_chars() -> usize {
    500
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: 0,
            snippet_length: default_snippet_length(),
            context_chars: default_context_chars(),
        }
    }
}

/// 单个后端的覆盖项，未设置的字段使用内置默认值
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderOverride {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    /// 按顺序检查的凭证环境变量名
    #[serde(default)]
    pub credential_env_vars: Option<Vec<String>>,
}

/// 后端覆盖表
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub groq: ProviderOverride,

    #[serde(default)]
    pub deepseek: ProviderOverride,

    #[serde(default)]
    pub qwen: ProviderOverride,

    #[serde(default)]
    pub gemini: ProviderOverride,
}

impl ProvidersConfig {
    pub fn for_provider(&self, provider: Provider) -> &ProviderOverride {
        match provider {
            Provider::Groq => &self.groq,
            Provider::DeepSeek => &self.deepseek,
            Provider::Qwen => &self.qwen,
            Provider::Gemini => &self.gemini,
        }
    }
}

/// 风格语料配置
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    /// 语料目录（*.txt）
    #[serde(default = "default_corpus_dir")]
    pub dir: PathBuf,
}

fn default_corpus_dir() -> PathBuf {
    PathBuf::from("corpus")
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            dir: default_corpus_dir(),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "novels.db".to_string()
}

fn default_max_connections() -> u32 {
    1
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 文档输出配置
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated_novels")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.generation.provider, "groq");
        assert_eq!(config.generation.temperature, 0.8);
        assert_eq!(config.generation.max_tokens, 2000);
        assert_eq!(config.generation.snippet_length, 300);
        assert_eq!(config.generation.context_chars, 500);
        assert_eq!(config.database.path, "novels.db");
        assert_eq!(config.corpus.dir, PathBuf::from("corpus"));
    }

    #[test]
    fn test_database_url() {
        let config = DatabaseConfig::default();
        assert_eq!(config.database_url(), "sqlite:novels.db?mode=rwc");
    }

    #[test]
    fn test_provider_override_lookup() {
        let mut providers = ProvidersConfig::default();
        providers.qwen.model = Some("qwen-turbo".to_string());
        assert_eq!(
            providers.for_provider(Provider::Qwen).model.as_deref(),
            Some("qwen-turbo")
        );
        assert!(providers.for_provider(Provider::Groq).model.is_none());
    }
}
