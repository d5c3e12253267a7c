//! Generation Orchestrator - 张爱玲风格文本生成
//!
//! 把 (主题, 背景) 或 (大纲, 章节号, 前情提要) 组装成提示词，
//! 交给构造时选定的后端生成文本。
//!
//! 本身无状态：前情提要由调用方负责传入。

mod prompts;

use std::sync::Arc;

pub use prompts::{chapter_prompt, plot_prompt, polish_prompt, SYSTEM_PERSONA};

use crate::application::ports::{LanguageModelPort, LlmError, Provider, StyleCorpusPort};
use crate::domain::novel::ChapterNumber;

/// 章节提示词中风格参考片段的默认长度（字符数）
pub const DEFAULT_SNIPPET_LENGTH: usize = 300;

/// 小说文本生成器
pub struct NovelGenerator {
    model: Arc<dyn LanguageModelPort>,
    corpus: Arc<dyn StyleCorpusPort>,
    snippet_length: usize,
}

impl NovelGenerator {
    pub fn new(model: Arc<dyn LanguageModelPort>, corpus: Arc<dyn StyleCorpusPort>) -> Self {
        Self {
            model,
            corpus,
            snippet_length: DEFAULT_SNIPPET_LENGTH,
        }
    }

    pub fn with_snippet_length(mut self, length: usize) -> Self {
        self.snippet_length = length;
        self
    }

    pub fn provider(&self) -> Provider {
        self.model.provider()
    }

    pub fn model_name(&self) -> &str {
        self.model.model()
    }

    /// 生成情节大纲
    pub async fn generate_plot(&self, theme: &str, setting: &str) -> Result<String, LlmError> {
        tracing::info!(
            provider = %self.model.provider(),
            theme = %theme,
            setting = %setting,
            "Generating plot outline"
        );

        let plot = self.dispatch(&plot_prompt(theme, setting)).await?;

        tracing::info!(chars = plot.chars().count(), "Plot outline generated");
        Ok(plot)
    }

    /// 生成一个章节
    ///
    /// 每次调用都会从语料中抽取一段风格参考
    pub async fn generate_chapter(
        &self,
        plot_outline: &str,
        chapter_number: ChapterNumber,
        previous_context: &str,
    ) -> Result<String, LlmError> {
        let style_reference = self.corpus.sample(self.snippet_length);

        tracing::info!(
            provider = %self.model.provider(),
            chapter_number = chapter_number.get(),
            snippet_chars = style_reference.chars().count(),
            context_chars = previous_context.chars().count(),
            "Generating chapter"
        );

        let prompt = chapter_prompt(
            &style_reference,
            plot_outline,
            chapter_number.get(),
            previous_context,
        );
        let chapter = self.dispatch(&prompt).await?;

        tracing::info!(
            chapter_number = chapter_number.get(),
            chars = chapter.chars().count(),
            "Chapter generated"
        );
        Ok(chapter)
    }

    /// 润色文本
    pub async fn polish_text(&self, text: &str) -> Result<String, LlmError> {
        tracing::info!(
            provider = %self.model.provider(),
            input_chars = text.chars().count(),
            "Polishing text"
        );
        self.dispatch(&polish_prompt(text)).await
    }

    async fn dispatch(&self, prompt: &str) -> Result<String, LlmError> {
        self.model.complete(SYSTEM_PERSONA, prompt).await.map_err(|e| {
            tracing::error!(
                provider = %self.model.provider(),
                model = %self.model.model(),
                error = %e,
                "Generation request failed"
            );
            e
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{FixedCorpus, ScriptedModel};

    fn generator(model: Arc<ScriptedModel>) -> NovelGenerator {
        NovelGenerator::new(model, Arc::new(FixedCorpus::new("胡琴咿咿哑哑拉着")))
    }

    #[tokio::test]
    async fn test_generate_plot_sends_persona_and_prompt() {
        let model = Arc::new(ScriptedModel::new(vec!["大纲正文"]));
        let plot = generator(model.clone())
            .generate_plot("家族的衰落", "1943年的上海")
            .await
            .unwrap();

        assert_eq!(plot, "大纲正文");
        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system, SYSTEM_PERSONA);
        assert!(calls[0].prompt.contains("家族的衰落"));
        assert!(calls[0].prompt.contains("1943年的上海"));
    }

    #[tokio::test]
    async fn test_generate_chapter_embeds_snippet_outline_and_context() {
        let model = Arc::new(ScriptedModel::new(vec!["第二章正文"]));
        let chapter = generator(model.clone())
            .generate_chapter("情节大纲内容", ChapterNumber::new(2).unwrap(), "上一章的结尾")
            .await
            .unwrap();

        assert_eq!(chapter, "第二章正文");
        let prompt = &model.calls()[0].prompt;
        assert!(prompt.contains("胡琴咿咿哑哑拉着"));
        assert!(prompt.contains("情节大纲内容"));
        assert!(prompt.contains("第 2 章"));
        assert!(prompt.contains("上一章的结尾"));
    }

    #[tokio::test]
    async fn test_generate_chapter_uses_configured_snippet_length() {
        let corpus = Arc::new(FixedCorpus::new("x"));
        let model = Arc::new(ScriptedModel::new(vec!["ok"]));
        let generator = NovelGenerator::new(model, corpus.clone()).with_snippet_length(120);

        generator
            .generate_chapter("大纲", ChapterNumber::first(), "")
            .await
            .unwrap();

        assert_eq!(corpus.requested_lengths(), vec![120]);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let model = Arc::new(ScriptedModel::failing(|| LlmError::ServiceError {
            status: 429,
            body: "rate limited".to_string(),
        }));
        let err = generator(model.clone())
            .polish_text("原文")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::ServiceError { status: 429, .. }));
        // 不重试
        assert_eq!(model.calls().len(), 1);
    }
}
