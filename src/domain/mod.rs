//! Domain Layer - 领域层
//!
//! - Novel Context: 小说、章节及其值对象
//! - 按字符截取文本的共享工具

pub mod novel;

mod text_window;

pub use text_window::{char_window, tail_chars, DEFAULT_CONTEXT_CHARS};
