//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：处理所有读操作

mod novel_queries;

pub mod handlers;

pub use novel_queries::*;
