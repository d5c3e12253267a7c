//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod persistence;
pub mod render;

pub use adapters::{create_language_model, FileStyleCorpus};
pub use persistence::SqliteNovelRepository;
pub use render::HtmlRenderer;
