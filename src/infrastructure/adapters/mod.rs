//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod corpus;
pub mod llm;

pub use corpus::{CorpusError, FileStyleCorpus};
pub use llm::{create_language_model, GeminiClient, OpenAiCompatibleClient, ProviderProfile};
