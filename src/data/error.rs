//! 统一错误类型定义
//!
//! 使用 `thiserror` 定义配置存储层的错误类型，迁移层通过 `anyhow` 直接兼容。

use std::path::PathBuf;
use thiserror::Error;

/// 配置存储层的统一错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件 I/O 错误
    #[error("文件 I/O 错误: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化/反序列化错误
    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 无效的键路径
    #[error("无效的键路径: {0}")]
    InvalidKey(String),

    /// 存储不支持写入
    #[error("配置存储不支持写入")]
    ReadOnly,

    /// 配置根节点不是对象
    #[error("配置根节点不是对象: {0}")]
    UnexpectedRoot(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// 从 `std::io::Error` 和路径创建 I/O 错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
