//! Style Corpus Port - 风格参考语料

/// 默认采样长度（字符数）
pub const DEFAULT_SAMPLE_LENGTH: usize = 500;

/// Style Corpus Port
///
/// 提供风格参考片段。采样是纯内存操作，没有 I/O。
pub trait StyleCorpusPort: Send + Sync {
    /// 随机抽取一段参考文本
    ///
    /// - 随机选一篇已加载的文本
    /// - 文本字符数 <= `length` 时整篇返回
    /// - 否则返回恰好 `length` 个字符的随机连续子串
    /// - 没有加载任何文本时返回空字符串
    fn sample(&self, length: usize) -> String;

    /// 已加载的文本数
    fn text_count(&self) -> usize;
}
