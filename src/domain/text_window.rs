//! 文本窗口
//!
//! 按字符（而非字节）截取文本片段。中文文本一个字符占 3 字节，
//! 按字节切片会落在字符中间。

/// 默认的前情提要长度（字符数）
pub const DEFAULT_CONTEXT_CHARS: usize = 500;

/// 取文本末尾最多 `max_chars` 个字符
///
/// 文本不足 `max_chars` 时原样返回。
pub fn tail_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }
    char_window(text, total - max_chars, max_chars)
}

/// 从第 `start` 个字符开始截取 `len` 个字符
///
/// 越界部分被截断，不会 panic。
pub fn char_window(text: &str, start: usize, len: usize) -> &str {
    let mut indices = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len()));

    let begin = match indices.nth(start) {
        Some(i) => i,
        None => return "",
    };
    let end = if len == 0 {
        begin
    } else {
        indices.nth(len - 1).unwrap_or(text.len())
    };

    &text[begin..end]
}
