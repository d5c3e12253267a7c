//! Novel Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{NovelRepositoryPort, NovelSummary};
use crate::application::queries::{GetNovel, ListNovels};
use crate::domain::novel::Novel;

/// GetNovel Handler
///
/// 小说不存在时返回 `Ok(None)`，不当作错误
pub struct GetNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl GetNovelHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, query: GetNovel) -> Result<Option<Novel>, ApplicationError> {
        let novel = self.novel_repo.get_novel(query.novel_id).await?;
        if novel.is_none() {
            tracing::debug!(novel_id = %query.novel_id, "Novel not found");
        }
        Ok(novel)
    }
}

/// ListNovels Handler
pub struct ListNovelsHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl ListNovelsHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(&self, _query: ListNovels) -> Result<Vec<NovelSummary>, ApplicationError> {
        Ok(self.novel_repo.list_novels().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NewNovel;
    use crate::application::testing::InMemoryNovelRepository;
    use crate::domain::novel::{ChapterNumber, NovelId, Title};

    #[tokio::test]
    async fn test_get_unknown_novel_returns_none() {
        let handler = GetNovelHandler::new(Arc::new(InMemoryNovelRepository::new()));
        let result = handler
            .handle(GetNovel {
                novel_id: NovelId::new(404),
            })
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_reports_chapter_counts() {
        let repo = Arc::new(InMemoryNovelRepository::new());
        let id = repo
            .save_novel(&NewNovel {
                title: Title::new("金锁记").unwrap(),
                theme: String::new(),
                setting: String::new(),
                plot_outline: String::new(),
            })
            .await
            .unwrap();
        repo.save_chapter(id, ChapterNumber::first(), "一")
            .await
            .unwrap();

        let novels = ListNovelsHandler::new(repo).handle(ListNovels).await.unwrap();
        assert_eq!(novels.len(), 1);
        assert_eq!(novels[0].chapter_count, 1);
    }
}
