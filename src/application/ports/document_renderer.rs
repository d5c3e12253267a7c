//! Document Renderer Port - 小说文档渲染

use chrono::{DateTime, Local};

use crate::domain::novel::Novel;

/// Document Renderer Port
///
/// 纯函数：同样的输入总是得到等价的文档，只有 `generated_at` 会变化
pub trait DocumentRendererPort: Send + Sync {
    /// 把小说渲染为一个自包含的文档
    fn render(&self, novel: &Novel, generated_at: DateTime<Local>) -> String;

    /// 输出文件扩展名（不含点）
    fn file_extension(&self) -> &'static str;
}
