//! Novel Commands

use std::path::PathBuf;

use crate::domain::novel::NovelId;

/// 完整生成一部小说：大纲 → 入库 → 逐章生成入库 → 读回 → 渲染文档
#[derive(Debug, Clone)]
pub struct GenerateNovel {
    pub title: String,
    pub theme: String,
    pub setting: String,
    pub chapter_count: u32,
    /// 文档输出目录，文件名由标题和时间戳组成
    pub output_dir: PathBuf,
}

/// 把已入库的小说渲染到指定路径
#[derive(Debug, Clone)]
pub struct RenderNovel {
    pub novel_id: NovelId,
    pub output_path: PathBuf,
}
