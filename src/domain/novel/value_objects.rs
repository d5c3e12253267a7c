//! Novel Context - Value Objects

use std::fmt;
use std::str::FromStr;

use super::NovelError;

/// 小说唯一标识（由存储层自增分配）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NovelId(i64);

impl NovelId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for NovelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for NovelId {
    type Err = NovelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| NovelError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for NovelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 章节编号
///
/// 不变量: 正整数（>= 1）。不要求连续，也不要求在同一小说内唯一。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChapterNumber(u32);

impl ChapterNumber {
    pub fn new(number: u32) -> Result<Self, NovelError> {
        if number == 0 {
            return Err(NovelError::InvalidChapterNumber(0));
        }
        Ok(Self(number))
    }

    pub fn first() -> Self {
        Self(1)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl TryFrom<i64> for ChapterNumber {
    type Error = NovelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let number = u32::try_from(value).map_err(|_| NovelError::InvalidChapterNumber(value))?;
        Self::new(number)
    }
}

impl fmt::Display for ChapterNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 小说标题
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    pub const MAX_CHARS: usize = 200;

    /// 文件名主体的字节上限（常见文件系统单个文件名上限 255 字节，留出时间戳和扩展名）
    pub const FILE_STEM_MAX_BYTES: usize = 200;

    pub fn new(title: impl Into<String>) -> Result<Self, NovelError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(NovelError::InvalidTitle("标题不能为空".to_string()));
        }
        if title.chars().count() > Self::MAX_CHARS {
            return Err(NovelError::InvalidTitle(format!(
                "标题长度不能超过{}字符",
                Self::MAX_CHARS
            )));
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 从存储记录恢复标题
    ///
    /// 旧库中可能存在空标题或超长标题：空标题记为"无题"，超长部分截断
    pub fn from_stored(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self("无题".to_string());
        }
        Self(trimmed.chars().take(Self::MAX_CHARS).collect())
    }

    /// 可安全用作文件名的标题
    ///
    /// 替换路径分隔符等字符，并在字符边界上截断到 `FILE_STEM_MAX_BYTES` 字节以内
    pub fn file_stem(&self) -> String {
        let mut stem = String::new();
        for c in self.0.trim().chars() {
            let c = match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            };
            if stem.len() + c.len_utf8() > Self::FILE_STEM_MAX_BYTES {
                break;
            }
            stem.push(c);
        }
        stem
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
