//! Novel Queries

use crate::domain::novel::NovelId;

/// 获取小说详情（含全部章节）
#[derive(Debug, Clone)]
pub struct GetNovel {
    pub novel_id: NovelId,
}

/// 列出所有小说
#[derive(Debug, Clone)]
pub struct ListNovels;
