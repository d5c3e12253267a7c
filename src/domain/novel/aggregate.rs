//! Novel Context - Aggregate Root

use chrono::{DateTime, Utc};

use super::{Chapter, NovelId, Title};

/// Novel 聚合根
///
/// 不变量:
/// - 情节大纲在创建时确定，之后只读
/// - 章节按编号升序排列（编号相同时保持插入顺序）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Novel {
    id: NovelId,
    title: Title,
    theme: String,
    setting: String,
    plot_outline: String,
    created_at: DateTime<Utc>,
    chapters: Vec<Chapter>,
}

impl Novel {
    /// 从存储记录重建小说
    pub fn restore(
        id: NovelId,
        title: Title,
        theme: impl Into<String>,
        setting: impl Into<String>,
        plot_outline: impl Into<String>,
        created_at: DateTime<Utc>,
        mut chapters: Vec<Chapter>,
    ) -> Self {
        // 稳定排序，重复编号保持原有顺序
        chapters.sort_by_key(|chapter| chapter.number());
        Self {
            id,
            title,
            theme: theme.into(),
            setting: setting.into(),
            plot_outline: plot_outline.into(),
            created_at,
            chapters,
        }
    }

    // Getters
    pub fn id(&self) -> NovelId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn setting(&self) -> &str {
        &self.setting
    }

    pub fn plot_outline(&self) -> &str {
        &self.plot_outline
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// 大纲与全部章节的总字数
    pub fn total_chars(&self) -> usize {
        self.plot_outline.chars().count()
            + self.chapters.iter().map(Chapter::char_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::ChapterNumber;

    fn chapter(id: i64, number: u32, content: &str) -> Chapter {
        Chapter::new(
            id,
            NovelId::new(1),
            ChapterNumber::new(number).unwrap(),
            content,
            Utc::now(),
        )
    }

    #[test]
    fn test_restore_sorts_chapters() {
        let novel = Novel::restore(
            NovelId::new(1),
            Title::new("金锁记").unwrap(),
            "家族的衰落",
            "1940年代上海",
            "大纲",
            Utc::now(),
            vec![chapter(1, 3, "三"), chapter(2, 1, "一"), chapter(3, 2, "二")],
        );

        let numbers: Vec<u32> = novel.chapters().iter().map(|c| c.number().get()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(novel.chapter_count(), 3);
    }

    #[test]
    fn test_duplicate_numbers_keep_insertion_order() {
        let novel = Novel::restore(
            NovelId::new(1),
            Title::new("半生缘").unwrap(),
            "",
            "",
            "",
            Utc::now(),
            vec![chapter(10, 2, "后写的"), chapter(11, 1, "一"), chapter(12, 2, "再写的")],
        );

        let contents: Vec<&str> = novel.chapters().iter().map(|c| c.content()).collect();
        assert_eq!(contents, vec!["一", "后写的", "再写的"]);
    }

    #[test]
    fn test_total_chars_counts_characters() {
        let novel = Novel::restore(
            NovelId::new(1),
            Title::new("倾城之恋").unwrap(),
            "",
            "",
            "大纲",
            Utc::now(),
            vec![chapter(1, 1, "胡琴咿咿哑哑")],
        );
        assert_eq!(novel.total_chars(), 2 + 6);
    }
}
