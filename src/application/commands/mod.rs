//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：生成与渲染

mod novel_commands;

pub mod handlers;

pub use novel_commands::*;
