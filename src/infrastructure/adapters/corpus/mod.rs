//! Style Corpus Adapter

mod default_excerpts;
mod file_corpus;

pub use default_excerpts::{DEFAULT_CORPUS_FILE_NAME, DEFAULT_EXCERPTS};
pub use file_corpus::{CorpusError, FileStyleCorpus};
