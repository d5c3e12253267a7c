//! Novel Context - Entities

use chrono::{DateTime, Utc};

use super::{ChapterNumber, NovelId};

/// 章节 - 一次生成得到的、带编号的叙事文本
///
/// 不变量:
/// - 总是引用一个 Novel（外键声明，调用时不校验）
/// - 构造后不可修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: i64,
    novel_id: NovelId,
    number: ChapterNumber,
    content: String,
    created_at: DateTime<Utc>,
}

impl Chapter {
    pub fn new(
        id: i64,
        novel_id: NovelId,
        number: ChapterNumber,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            novel_id,
            number,
            content: content.into(),
            created_at,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn novel_id(&self) -> NovelId {
        self.novel_id
    }

    pub fn number(&self) -> ChapterNumber {
        self.number
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
