//! Novel Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NovelError {
    #[error("无效的小说 ID: {0}")]
    InvalidId(String),

    #[error("无效的标题: {0}")]
    InvalidTitle(String),

    #[error("无效的章节编号: {0}（必须为正整数）")]
    InvalidChapterNumber(i64),
}
