//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::novel::{ChapterNumber, Novel, NovelId, Title};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        RepositoryError::DatabaseError(err.to_string())
    }
}

/// 新建小说的输入
#[derive(Debug, Clone)]
pub struct NewNovel {
    pub title: Title,
    pub theme: String,
    pub setting: String,
    pub plot_outline: String,
}

/// 小说列表项（附带章节数）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NovelSummary {
    pub id: NovelId,
    pub title: String,
    pub theme: String,
    pub setting: String,
    pub plot_outline: String,
    pub created_at: DateTime<Utc>,
    pub chapter_count: usize,
}

/// Novel Repository Port
#[async_trait]
pub trait NovelRepositoryPort: Send + Sync {
    /// 保存小说，返回自动分配的 ID
    async fn save_novel(&self, novel: &NewNovel) -> Result<NovelId, RepositoryError>;

    /// 保存章节
    ///
    /// 不校验 `novel_id` 是否存在，也不阻止同一小说出现重复章节号
    async fn save_chapter(
        &self,
        novel_id: NovelId,
        number: ChapterNumber,
        content: &str,
    ) -> Result<(), RepositoryError>;

    /// 根据 ID 获取小说及其全部章节（按章节号升序）
    ///
    /// ID 不存在时返回 `Ok(None)`
    async fn get_novel(&self, id: NovelId) -> Result<Option<Novel>, RepositoryError>;

    /// 列出所有小说，最新创建的在前
    async fn list_novels(&self) -> Result<Vec<NovelSummary>, RepositoryError>;
}
