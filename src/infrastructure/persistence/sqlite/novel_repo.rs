//! SQLite Novel Repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{NewNovel, NovelRepositoryPort, NovelSummary, RepositoryError};
use crate::domain::novel::{Chapter, ChapterNumber, Novel, NovelId, Title};

/// SQLite Novel Repository
pub struct SqliteNovelRepository {
    pool: DbPool,
}

impl SqliteNovelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// 定宽 RFC 3339（UTC，微秒），字典序即时间序
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 解析时间戳
///
/// 除本库写入的 RFC 3339 外，也接受 SQLite `CURRENT_TIMESTAMP` 的 `YYYY-MM-DD HH:MM:SS`（UTC）
fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            RepositoryError::SerializationError(format!("Invalid timestamp {value:?}: {e}"))
        })
}

#[derive(FromRow)]
struct NovelRow {
    id: i64,
    title: String,
    theme: Option<String>,
    setting: Option<String>,
    plot_outline: Option<String>,
    created_at: String,
}

#[derive(FromRow)]
struct ChapterRow {
    id: i64,
    novel_id: i64,
    chapter_number: i64,
    content: String,
    created_at: String,
}

#[derive(FromRow)]
struct NovelSummaryRow {
    id: i64,
    title: String,
    theme: Option<String>,
    setting: Option<String>,
    plot_outline: Option<String>,
    created_at: String,
    chapter_count: i64,
}

impl TryFrom<ChapterRow> for Chapter {
    type Error = RepositoryError;

    fn try_from(row: ChapterRow) -> Result<Self, Self::Error> {
        let number = ChapterNumber::try_from(row.chapter_number)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        Ok(Chapter::new(
            row.id,
            NovelId::new(row.novel_id),
            number,
            row.content,
            parse_timestamp(&row.created_at)?,
        ))
    }
}

impl NovelRow {
    fn into_novel(self, chapters: Vec<Chapter>) -> Result<Novel, RepositoryError> {
        Ok(Novel::restore(
            NovelId::new(self.id),
            Title::from_stored(&self.title),
            self.theme.unwrap_or_default(),
            self.setting.unwrap_or_default(),
            self.plot_outline.unwrap_or_default(),
            parse_timestamp(&self.created_at)?,
            chapters,
        ))
    }
}

impl TryFrom<NovelSummaryRow> for NovelSummary {
    type Error = RepositoryError;

    fn try_from(row: NovelSummaryRow) -> Result<Self, Self::Error> {
        Ok(NovelSummary {
            id: NovelId::new(row.id),
            title: Title::from_stored(&row.title).to_string(),
            theme: row.theme.unwrap_or_default(),
            setting: row.setting.unwrap_or_default(),
            plot_outline: row.plot_outline.unwrap_or_default(),
            created_at: parse_timestamp(&row.created_at)?,
            chapter_count: row.chapter_count.max(0) as usize,
        })
    }
}

#[async_trait]
impl NovelRepositoryPort for SqliteNovelRepository {
    async fn save_novel(&self, novel: &NewNovel) -> Result<NovelId, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO novels (title, theme, setting, plot_outline, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(novel.title.as_str())
        .bind(&novel.theme)
        .bind(&novel.setting)
        .bind(&novel.plot_outline)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        let id = NovelId::new(result.last_insert_rowid());
        tracing::debug!(novel_id = %id, title = %novel.title.as_str(), "Novel saved");

        Ok(id)
    }

    async fn save_chapter(
        &self,
        novel_id: NovelId,
        number: ChapterNumber,
        content: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chapters (novel_id, chapter_number, content, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(novel_id.value())
        .bind(i64::from(number.get()))
        .bind(content)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await?;

        tracing::debug!(
            novel_id = %novel_id,
            chapter_number = number.get(),
            chars = content.chars().count(),
            "Chapter saved"
        );

        Ok(())
    }

    async fn get_novel(&self, id: NovelId) -> Result<Option<Novel>, RepositoryError> {
        let row: Option<NovelRow> = sqlx::query_as(
            "SELECT id, title, theme, setting, plot_outline, created_at FROM novels WHERE id = ?",
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let chapter_rows: Vec<ChapterRow> = sqlx::query_as(
            r#"
            SELECT id, novel_id, chapter_number, content, created_at
            FROM chapters
            WHERE novel_id = ?
            ORDER BY chapter_number ASC, id ASC
            "#,
        )
        .bind(id.value())
        .fetch_all(&self.pool)
        .await?;

        let chapters = chapter_rows
            .into_iter()
            .map(Chapter::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        row.into_novel(chapters).map(Some)
    }

    async fn list_novels(&self) -> Result<Vec<NovelSummary>, RepositoryError> {
        let rows: Vec<NovelSummaryRow> = sqlx::query_as(
            r#"
            SELECT n.id, n.title, n.theme, n.setting, n.plot_outline, n.created_at,
                   COUNT(c.id) AS chapter_count
            FROM novels n
            LEFT JOIN chapters c ON c.novel_id = n.id
            GROUP BY n.id
            ORDER BY n.created_at DESC, n.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(NovelSummary::try_from).collect()
    }
}
