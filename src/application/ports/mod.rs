//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod document_renderer;
mod language_model;
mod repositories;
mod style_corpus;

pub use document_renderer::DocumentRendererPort;
pub use language_model::{LanguageModelPort, LlmError, Provider, WireStyle};
pub use repositories::{NewNovel, NovelRepositoryPort, NovelSummary, RepositoryError};
pub use style_corpus::{StyleCorpusPort, DEFAULT_SAMPLE_LENGTH};
