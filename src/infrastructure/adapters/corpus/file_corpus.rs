//! File Style Corpus - 目录中的 *.txt 风格语料
//!
//! 实现 StyleCorpusPort trait

use rand::seq::SliceRandom;
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

use crate::application::ports::StyleCorpusPort;
use crate::domain::char_window;

use super::default_excerpts::{DEFAULT_CORPUS_FILE_NAME, DEFAULT_EXCERPTS};

/// 语料目录错误
///
/// 单个文件读取失败不属于错误，只记录日志并跳过
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CorpusError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// 单篇已加载的文本，缓存字符数
#[derive(Debug, Clone)]
struct CorpusText {
    content: String,
    char_count: usize,
}

impl CorpusText {
    fn new(content: String) -> Self {
        let char_count = content.chars().count();
        Self {
            content,
            char_count,
        }
    }
}

/// 文件系统风格语料
pub struct FileStyleCorpus {
    dir: PathBuf,
    texts: Vec<CorpusText>,
}

impl FileStyleCorpus {
    /// 打开语料目录
    ///
    /// 目录不存在时创建；没有任何 *.txt 文件时先写入默认样本，然后加载全部文本
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, CorpusError> {
        let dir = dir.as_ref().to_path_buf();

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| CorpusError::io(&dir, e))?;

        let mut files = list_text_files(&dir).await?;
        if files.is_empty() {
            files.push(seed_default_file(&dir).await?);
        } else {
            tracing::debug!(
                dir = %dir.display(),
                files = files.len(),
                "Found existing corpus files"
            );
        }

        let mut texts = Vec::with_capacity(files.len());
        for path in &files {
            match fs::read_to_string(path).await {
                Ok(content) if content.trim().is_empty() => {
                    tracing::debug!(path = %path.display(), "Skipping empty corpus file");
                }
                Ok(content) => {
                    let text = CorpusText::new(content);
                    tracing::info!(
                        file = %file_name(path),
                        chars = text.char_count,
                        "Loaded corpus file"
                    );
                    texts.push(text);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read corpus file, skipping"
                    );
                }
            }
        }

        tracing::info!(dir = %dir.display(), texts = texts.len(), "Style corpus ready");

        Ok(Self { dir, texts })
    }

    /// 直接用内存文本构造（不读取目录）
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let texts = texts
            .into_iter()
            .map(|t| -> String { t.into() })
            .filter(|t| !t.trim().is_empty())
            .map(CorpusText::new)
            .collect();

        Self {
            dir: PathBuf::new(),
            texts,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 使用给定的随机源采样
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> String {
        let Some(text) = self.texts.choose(rng) else {
            return String::new();
        };

        if text.char_count <= length {
            return text.content.clone();
        }

        let start = rng.gen_range(0..=text.char_count - length);
        char_window(&text.content, start, length).to_string()
    }
}

impl StyleCorpusPort for FileStyleCorpus {
    fn sample(&self, length: usize) -> String {
        self.sample_with(&mut rand::thread_rng(), length)
    }

    fn text_count(&self) -> usize {
        self.texts.len()
    }
}

/// 列出目录下的 *.txt 文件（按路径排序）
async fn list_text_files(dir: &Path) -> Result<Vec<PathBuf>, CorpusError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| CorpusError::io(dir, e))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| CorpusError::io(dir, e))?
    {
        let path = entry.path();
        let is_txt = path.extension().and_then(|ext| ext.to_str()) == Some("txt");
        if is_txt && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

async fn seed_default_file(dir: &Path) -> Result<PathBuf, CorpusError> {
    let path = dir.join(DEFAULT_CORPUS_FILE_NAME);
    fs::write(&path, DEFAULT_EXCERPTS)
        .await
        .map_err(|e| CorpusError::io(&path, e))?;

    tracing::info!(
        path = %path.display(),
        "No corpus files found, created default excerpts; add more *.txt files to improve style emulation"
    );

    Ok(path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
