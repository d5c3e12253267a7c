//! Novel Context - 小说限界上下文
//!
//! 职责:
//! - 小说聚合（大纲 + 有序章节）
//! - 章节实体
//! - 标识、标题、章节编号等值对象

mod aggregate;
mod entities;
mod errors;
mod value_objects;

pub use aggregate::Novel;
pub use entities::Chapter;
pub use errors::NovelError;
pub use value_objects::{ChapterNumber, NovelId, Title};
