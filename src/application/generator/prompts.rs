//! 提示词模板
//!
//! 三个固定模板：情节大纲、章节、润色

/// 发送给消息式后端的固定系统人设
pub const SYSTEM_PERSONA: &str = "你是一位精通张爱玲文学风格的作家。";

/// 情节大纲提示词
pub fn plot_prompt(theme: &str, setting: &str) -> String {
    format!(
        "请模仿张爱玲的风格，构思一个短篇小说的情节大纲。

主题：{theme}
背景：{setting}

要求：
1. 故事应包含张爱玲式的苍凉感和对人性的深刻洞察。
2. 人物关系错综复杂，往往带有悲剧色彩。
3. 请提供主要人物介绍和故事起承转合的梗概。
"
    )
}

/// 章节提示词
///
/// 嵌入风格参考片段、完整大纲、章节号和前情提要，列出五条写作要求
pub fn chapter_prompt(
    style_reference: &str,
    plot_outline: &str,
    chapter_number: u32,
    previous_context: &str,
) -> String {
    format!(
        "请根据以下情节大纲，模仿张爱玲的笔触撰写第 {chapter_number} 章。

参考风格（来自张爱玲作品片段）：
{style_reference}

情节大纲：
{plot_outline}

前情提要（如果有）：
{previous_context}

写作风格要求：
1. **感官描写**：大量使用细腻的感官描写，特别是对色彩、气味、声音的捕捉。
2. **服饰与环境**：详细描绘人物的衣着和周围的环境，用物质细节来暗示人物心理。
3. **比喻**：使用新奇、尖锐甚至略带刻薄的比喻。
4. **苍凉基调**：保持一种冷静、旁观、甚至有些无情的叙述语调，透出世态炎凉。
5. **语言**：使用半文半白的民国白话风，或者现代汉语中夹杂着旧式优雅的词汇。

请开始撰写：
"
    )
}

/// 润色提示词
pub fn polish_prompt(text: &str) -> String {
    format!(
        "请润色以下文字，使其更接近张爱玲的风格。重点加强比喻的独特性和环境描写的细腻度，去除过于现代或平淡的表达。

原文：
{text}
"
    )
}
