//! 测试替身：脚本化的后端、固定语料、内存仓储

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::application::ports::{
    LanguageModelPort, LlmError, NewNovel, NovelRepositoryPort, NovelSummary, Provider,
    RepositoryError, StyleCorpusPort,
};
use crate::domain::novel::{Chapter, ChapterNumber, Novel, NovelId};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
}

/// 按顺序返回预设回复的后端，并记录每次调用
pub struct ScriptedModel {
    responses: Mutex<VecDeque<String>>,
    failure: Option<Box<dyn Fn() -> LlmError + Send + Sync>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedModel {
    pub fn new<S: Into<String>>(responses: Vec<S>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(make_error: impl Fn() -> LlmError + Send + Sync + 'static) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            failure: Some(Box::new(make_error)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModelPort for ScriptedModel {
    async fn complete(&self, system_persona: &str, prompt: &str) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: system_persona.to_string(),
            prompt: prompt.to_string(),
        });

        if let Some(make_error) = &self.failure {
            return Err(make_error());
        }

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }

    fn provider(&self) -> Provider {
        Provider::Groq
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// 总是返回同一段文本的语料，记录请求的采样长度
pub struct FixedCorpus {
    text: String,
    requested: Mutex<Vec<usize>>,
}

impl FixedCorpus {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_lengths(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

impl StyleCorpusPort for FixedCorpus {
    fn sample(&self, length: usize) -> String {
        self.requested.lock().unwrap().push(length);
        self.text.clone()
    }

    fn text_count(&self) -> usize {
        1
    }
}

/// 内存中的小说仓储
#[derive(Default)]
pub struct InMemoryNovelRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Default)]
struct InMemoryState {
    novels: Vec<(NovelId, NewNovel, DateTime<Utc>)>,
    chapters: Vec<Chapter>,
}

impl InMemoryNovelRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NovelRepositoryPort for InMemoryNovelRepository {
    async fn save_novel(&self, novel: &NewNovel) -> Result<NovelId, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let id = NovelId::new(state.novels.len() as i64 + 1);
        state.novels.push((id, novel.clone(), Utc::now()));
        Ok(id)
    }

    async fn save_chapter(
        &self,
        novel_id: NovelId,
        number: ChapterNumber,
        content: &str,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let id = state.chapters.len() as i64 + 1;
        state
            .chapters
            .push(Chapter::new(id, novel_id, number, content, Utc::now()));
        Ok(())
    }

    async fn get_novel(&self, id: NovelId) -> Result<Option<Novel>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .novels
            .iter()
            .find(|(novel_id, _, _)| *novel_id == id)
            .map(|(novel_id, novel, created_at)| {
                let chapters = state
                    .chapters
                    .iter()
                    .filter(|c| c.novel_id() == *novel_id)
                    .cloned()
                    .collect();
                Novel::restore(
                    *novel_id,
                    novel.title.clone(),
                    novel.theme.clone(),
                    novel.setting.clone(),
                    novel.plot_outline.clone(),
                    *created_at,
                    chapters,
                )
            }))
    }

    async fn list_novels(&self) -> Result<Vec<NovelSummary>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .novels
            .iter()
            .rev()
            .map(|(id, novel, created_at)| NovelSummary {
                id: *id,
                title: novel.title.to_string(),
                theme: novel.theme.clone(),
                setting: novel.setting.clone(),
                plot_outline: novel.plot_outline.clone(),
                created_at: *created_at,
                chapter_count: state.chapters.iter().filter(|c| c.novel_id() == *id).count(),
            })
            .collect())
    }
}
