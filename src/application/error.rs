//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::application::ports::{LlmError, RepositoryError};
use crate::domain::novel::{NovelError, NovelId};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 生成失败（配置错误或远程调用失败，原样保留）
    #[error("Generation failed: {0}")]
    Generation(#[from] LlmError),

    /// 仓储错误
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// 文件读写错误
    #[error("IO error at `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn novel_not_found(id: NovelId) -> Self {
        Self::NotFound {
            resource_type: "Novel",
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// 是否为配置错误（未知后端、缺少凭证）
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Generation(err) if err.is_config())
    }
}

impl From<NovelError> for ApplicationError {
    fn from(err: NovelError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
