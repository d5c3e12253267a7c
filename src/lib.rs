//! Cangliang - 张爱玲风格小说生成器
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel Context: 小说、章节及其值对象
//!
//! 应用层 (application/):
//! - Ports: 端口定义（LanguageModel, StyleCorpus, NovelRepository, DocumentRenderer）
//! - Generator: 提示词组装与后端调度
//! - Commands: 批量生成、渲染
//! - Queries: 小说查询
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: 各家 LLM 客户端、文件风格语料
//! - Persistence: SQLite 存储
//! - Render: HTML 文档

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
