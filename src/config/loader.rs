//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `CANGLIANG_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `CANGLIANG_GENERATION__PROVIDER=deepseek`
/// - `CANGLIANG_GENERATION__TEMPERATURE=0.7`
/// - `CANGLIANG_DATABASE__PATH=/data/novels.db`
/// - `CANGLIANG_PROVIDERS__QWEN__MODEL=qwen-turbo`
///
/// 后端凭证本身仍从各后端约定的环境变量读取（如 `GROQ_API_KEY`）
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("generation.provider", "groq")?
        .set_default("generation.temperature", 0.8)?
        .set_default("generation.max_tokens", 2000)?
        .set_default("generation.timeout_secs", 0)?
        .set_default("generation.snippet_length", 300)?
        .set_default("generation.context_chars", 500)?
        .set_default("corpus.dir", "corpus")?
        .set_default("database.path", "novels.db")?
        .set_default("database.max_connections", 1)?
        .set_default("output.dir", "generated_novels")?
        .set_default("log.level", "info")?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: CANGLIANG_
    // 层级分隔符: __ (双下划线)
    builder = builder.add_source(
        Environment::with_prefix("CANGLIANG")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.database.path.is_empty() {
        return Err(ConfigError::ValidationError(
            "Database path cannot be empty".to_string(),
        ));
    }

    if config.corpus.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Corpus directory cannot be empty".to_string(),
        ));
    }

    if config.generation.max_tokens == 0 {
        return Err(ConfigError::ValidationError(
            "max_tokens must be greater than 0".to_string(),
        ));
    }

    if config.generation.snippet_length == 0 {
        return Err(ConfigError::ValidationError(
            "snippet_length must be greater than 0".to_string(),
        ));
    }

    if !(0.0..=2.0).contains(&config.generation.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "temperature must be within 0.0..=2.0, got {}",
            config.generation.temperature
        )));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Application Configuration ===");
    tracing::debug!("Provider: {}", config.generation.provider);
    tracing::debug!("Temperature: {}", config.generation.temperature);
    tracing::debug!("Max Tokens: {}", config.generation.max_tokens);
    tracing::debug!("Snippet Length: {}", config.generation.snippet_length);
    tracing::debug!("Context Chars: {}", config.generation.context_chars);
    tracing::debug!("Corpus Directory: {:?}", config.corpus.dir);
    tracing::debug!("Database: {}", config.database.path);
    tracing::debug!("Output Directory: {:?}", config.output.dir);
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("=================================");
}
