//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 端口定义（LanguageModel、StyleCorpus、Repository、DocumentRenderer）
//! - generator: 提示词组装与后端调度
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod generator;
pub mod ports;
pub mod queries;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports
pub use commands::{
    handlers::{GenerateNovelHandler, GenerateNovelResponse, RenderNovelHandler},
    GenerateNovel, RenderNovel,
};

pub use error::ApplicationError;

pub use generator::{NovelGenerator, DEFAULT_SNIPPET_LENGTH, SYSTEM_PERSONA};

pub use ports::{
    DocumentRendererPort, LanguageModelPort, LlmError, NewNovel, NovelRepositoryPort,
    NovelSummary, Provider, RepositoryError, StyleCorpusPort, WireStyle, DEFAULT_SAMPLE_LENGTH,
};

pub use queries::{
    handlers::{GetNovelHandler, ListNovelsHandler},
    GetNovel, ListNovels,
};
