//! 错误类型。
//!
//! 约定：
//! - 查询路径（`IndexService::suggest`）永远不返回错误，最坏情况是空列表
//! - 构建失败只返回给触发构建的一方，并保留旧快照继续服务
use std::{io, path::PathBuf};

use thiserror::Error;

/// 前缀树写入错误。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrieError {
    /// 空串会让根节点变成终止节点，构造上禁止。
    #[error("cannot insert an empty word")]
    EmptyWord,
}

/// 目录（catalog）协作方返回的错误。
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 数据源暂不可用（文件不存在、服务未就绪等）。
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// 数据格式错误；`location` 指出出错位置（例如 `line 3`）。
    #[error("malformed catalog at {location}: {reason}")]
    Malformed { location: String, reason: String },
}

/// 索引构建失败（BuildFailure）。
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to fetch catalog snapshot: {0}")]
    Catalog(#[from] CatalogError),

    /// 同一时间只允许一次构建。
    #[error("an index build is already in progress")]
    AlreadyBuilding,
}

/// 配置加载/校验错误。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
