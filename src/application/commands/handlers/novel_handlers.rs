//! Novel Command Handlers

use chrono::Local;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::{GenerateNovel, RenderNovel};
use crate::application::error::ApplicationError;
use crate::application::generator::NovelGenerator;
use crate::application::ports::{DocumentRendererPort, NewNovel, NovelRepositoryPort};
use crate::domain::novel::{ChapterNumber, Novel, NovelId, Title};
use crate::domain::{tail_chars, DEFAULT_CONTEXT_CHARS};

// ============================================================================
// GenerateNovel
// ============================================================================

/// 生成结果
#[derive(Debug, Clone)]
pub struct GenerateNovelResponse {
    pub novel_id: NovelId,
    pub output_path: PathBuf,
    /// 大纲与全部章节的总字数
    pub total_chars: usize,
}

/// GenerateNovel Handler - 批量生成流水线
///
/// 严格顺序执行：第 N+1 章以第 N 章末尾的文字作为前情提要，
/// 因此必须等第 N 章生成并入库后才会请求下一章。
pub struct GenerateNovelHandler {
    generator: Arc<NovelGenerator>,
    novel_repo: Arc<dyn NovelRepositoryPort>,
    renderer: Arc<dyn DocumentRendererPort>,
    context_chars: usize,
}

impl GenerateNovelHandler {
    pub fn new(
        generator: Arc<NovelGenerator>,
        novel_repo: Arc<dyn NovelRepositoryPort>,
        renderer: Arc<dyn DocumentRendererPort>,
    ) -> Self {
        Self {
            generator,
            novel_repo,
            renderer,
            context_chars: DEFAULT_CONTEXT_CHARS,
        }
    }

    pub fn with_context_chars(mut self, chars: usize) -> Self {
        self.context_chars = chars;
        self
    }

    pub async fn handle(
        &self,
        command: GenerateNovel,
    ) -> Result<GenerateNovelResponse, ApplicationError> {
        let title = Title::new(command.title)?;
        if command.chapter_count == 0 {
            return Err(ApplicationError::validation("chapter count must be at least 1"));
        }

        tracing::info!(
            title = %title,
            theme = %command.theme,
            setting = %command.setting,
            chapters = command.chapter_count,
            provider = %self.generator.provider(),
            model = %self.generator.model_name(),
            "Starting novel generation"
        );

        // 1. 大纲
        let plot_outline = self
            .generator
            .generate_plot(&command.theme, &command.setting)
            .await?;

        // 2. 入库
        let novel_id = self
            .novel_repo
            .save_novel(&NewNovel {
                title: title.clone(),
                theme: command.theme.clone(),
                setting: command.setting.clone(),
                plot_outline: plot_outline.clone(),
            })
            .await?;
        tracing::info!(novel_id = %novel_id, title = %title, "Novel saved");

        // 3. 逐章生成
        let mut previous_context = String::new();
        let mut number = ChapterNumber::first();
        for _ in 0..command.chapter_count {
            let content = self
                .generator
                .generate_chapter(&plot_outline, number, &previous_context)
                .await?;

            self.novel_repo
                .save_chapter(novel_id, number, &content)
                .await?;
            tracing::info!(
                novel_id = %novel_id,
                chapter_number = number.get(),
                chars = content.chars().count(),
                "Chapter saved"
            );

            previous_context = tail_chars(&content, self.context_chars).to_string();
            number = number.next();
        }

        // 4. 读回完整记录
        let novel = self
            .novel_repo
            .get_novel(novel_id)
            .await?
            .ok_or_else(|| ApplicationError::novel_not_found(novel_id))?;

        // 5. 渲染
        let now = Local::now();
        let file_name = format!(
            "{}_{}.{}",
            title.file_stem(),
            now.format("%Y%m%d_%H%M%S"),
            self.renderer.file_extension()
        );
        let output_path = command.output_dir.join(file_name);
        write_document(&output_path, &self.renderer.render(&novel, now)).await?;

        let total_chars = novel.total_chars();
        tracing::info!(
            novel_id = %novel_id,
            output = %output_path.display(),
            total_chars = total_chars,
            "Novel generation completed"
        );

        Ok(GenerateNovelResponse {
            novel_id,
            output_path,
            total_chars,
        })
    }
}

// ============================================================================
// RenderNovel
// ============================================================================

/// RenderNovel Handler
pub struct RenderNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    renderer: Arc<dyn DocumentRendererPort>,
}

impl RenderNovelHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        renderer: Arc<dyn DocumentRendererPort>,
    ) -> Self {
        Self {
            novel_repo,
            renderer,
        }
    }

    pub async fn handle(&self, command: RenderNovel) -> Result<Novel, ApplicationError> {
        let novel = self
            .novel_repo
            .get_novel(command.novel_id)
            .await?
            .ok_or_else(|| ApplicationError::novel_not_found(command.novel_id))?;

        let document = self.renderer.render(&novel, Local::now());
        write_document(&command.output_path, &document).await?;

        tracing::info!(
            novel_id = %command.novel_id,
            output = %command.output_path.display(),
            "Novel rendered"
        );

        Ok(novel)
    }
}

/// 写出文档，必要时创建父目录
async fn write_document(path: &Path, contents: &str) -> Result<(), ApplicationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| ApplicationError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| ApplicationError::io(path, e))
}
