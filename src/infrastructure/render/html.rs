//! HTML Renderer - 自包含的 HTML5 小说文档
//!
//! 内联 CSS，不引用任何外部资源。所有来自用户或模型的文本都经过转义。

use chrono::{DateTime, Local};

use crate::application::ports::DocumentRendererPort;
use crate::domain::novel::Novel;

const STYLESHEET: &str = r#"
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Songti SC', 'SimSun', serif;
            background: linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%);
            min-height: 100vh;
            padding: 20px;
            line-height: 1.8;
        }

        .container {
            max-width: 900px;
            margin: 0 auto;
            background: white;
            box-shadow: 0 10px 40px rgba(0,0,0,0.1);
            border-radius: 10px;
            overflow: hidden;
        }

        .header {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            color: white;
            padding: 60px 40px;
            text-align: center;
        }

        .header h1 {
            font-size: 2.5em;
            margin-bottom: 20px;
            font-weight: 300;
            letter-spacing: 3px;
        }

        .metadata {
            background: rgba(255,255,255,0.1);
            padding: 20px;
            border-radius: 8px;
            margin-top: 20px;
            font-size: 0.95em;
        }

        .metadata p { margin: 8px 0; }

        .content { padding: 40px; }

        .plot-outline {
            background: #f8f9fa;
            padding: 30px;
            border-left: 4px solid #667eea;
            margin-bottom: 40px;
            border-radius: 4px;
        }

        .plot-outline h2 {
            color: #667eea;
            margin-bottom: 15px;
            font-size: 1.5em;
        }

        .plot-outline p {
            white-space: pre-wrap;
            color: #555;
        }

        .chapter {
            margin-bottom: 50px;
            padding-bottom: 30px;
            border-bottom: 1px solid #eee;
        }

        .chapter:last-child { border-bottom: none; }

        .chapter h2 {
            color: #333;
            margin-bottom: 25px;
            font-size: 1.8em;
            text-align: center;
            font-weight: 300;
        }

        .chapter-content {
            text-indent: 2em;
            color: #333;
            font-size: 1.1em;
            white-space: pre-wrap;
        }

        .footer {
            background: #f8f9fa;
            padding: 30px;
            text-align: center;
            color: #666;
            font-size: 0.9em;
        }

        @media (max-width: 768px) {
            .header { padding: 40px 20px; }
            .header h1 { font-size: 1.8em; }
            .content { padding: 20px; }
        }
"#;

/// HTML 文档渲染器
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentRendererPort for HtmlRenderer {
    fn render(&self, novel: &Novel, generated_at: DateTime<Local>) -> String {
        let title = escape_html(novel.title().as_str());
        let created_at = novel
            .created_at()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");

        let mut html = String::with_capacity(8 * 1024 + novel.total_chars() * 4);

        html.push_str(&format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLESHEET}    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>{title}</h1>
            <div class="metadata">
                <p><strong>主题：</strong>{theme}</p>
                <p><strong>背景：</strong>{setting}</p>
                <p><strong>创作时间：</strong>{created_at}</p>
                <p><strong>章节数：</strong>{chapter_count}</p>
            </div>
        </div>

        <div class="content">
            <div class="plot-outline">
                <h2>情节大纲</h2>
                <p>{outline}</p>
            </div>

"#,
            theme = escape_html(novel.theme()),
            setting = escape_html(novel.setting()),
            chapter_count = novel.chapter_count(),
            outline = escape_html(novel.plot_outline()),
        ));

        for chapter in novel.chapters() {
            html.push_str(&format!(
                r#"            <div class="chapter">
                <h2>第 {number} 章</h2>
                <div class="chapter-content">{content}</div>
            </div>

"#,
                number = chapter.number(),
                content = escape_html(chapter.content()),
            ));
        }

        html.push_str(&format!(
            r#"        </div>

        <div class="footer">
            <p>本作品由张爱玲风格生成器创作</p>
            <p>生成时间：{generated}</p>
        </div>
    </div>
</body>
</html>
"#,
            generated = generated_at.format("%Y年%m月%d日 %H:%M:%S"),
        ));

        html
    }

    fn file_extension(&self) -> &'static str {
        "html"
    }
}

/// 转义 HTML 特殊字符
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
