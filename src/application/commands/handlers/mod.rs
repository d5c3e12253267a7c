//! Command Handlers 实现

mod novel_handlers;

pub use novel_handlers::*;
