//! `config`：引擎配置（TOML）。
//!
//! ```toml
//! default_limit = 5
//! max_limit = 50
//! min_prefix_chars = 1
//! history_capacity = 8
//!
//! [fuzzy]
//! threshold = 0.4
//! max_hits = 32
//! distance = 100
//! keys = [
//!     { field = "name", weight = 1.0 },
//!     { field = "description", weight = 0.5 },
//! ]
//! ```
//!
//! 所有字段都有默认值，缺省的文件等价于 `SuggestConfig::default()`。
use std::{fs, path::Path};

use serde::Deserialize;

use crate::error::ConfigError;

/// 参与模糊匹配的字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyField {
    Name,
    Description,
}

/// 模糊匹配的一个 key：字段 + 权重（0, 1]。
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FuzzyKey {
    pub field: KeyField,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// 模糊索引配置。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzyOptions {
    /// 相似度阈值 [0, 1]；分数高于阈值的条目被丢弃（0 只接受完全匹配）
    pub threshold: f64,
    /// 单次查询最多返回多少条命中
    pub max_hits: usize,
    /// 位置惩罚尺度：匹配起点每偏离字段开头 `distance` 个字符，分数加 1
    pub distance: usize,
    pub keys: Vec<FuzzyKey>,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            max_hits: 32,
            distance: 100,
            keys: vec![
                FuzzyKey {
                    field: KeyField::Name,
                    weight: 1.0,
                },
                FuzzyKey {
                    field: KeyField::Description,
                    weight: 0.5,
                },
            ],
        }
    }
}

/// 引擎配置。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SuggestConfig {
    /// 调用方不指定时返回的建议数量
    pub default_limit: usize,
    /// 调用方指定的数量上限（超出会被截到这里）
    pub max_limit: usize,
    /// 去掉首尾空白后少于这么多字符的前缀直接返回空列表
    pub min_prefix_chars: usize,
    /// 每个用户保留的搜索历史条数
    pub history_capacity: usize,
    pub fuzzy: FuzzyOptions,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            default_limit: 5,
            max_limit: 50,
            min_prefix_chars: 1,
            history_capacity: 8,
            fuzzy: FuzzyOptions::default(),
        }
    }
}

impl SuggestConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验取值范围。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(invalid("default_limit", "must be at least 1"));
        }
        if self.max_limit < self.default_limit {
            return Err(invalid(
                "max_limit",
                format!("must be >= default_limit ({})", self.default_limit),
            ));
        }
        if self.min_prefix_chars == 0 {
            return Err(invalid("min_prefix_chars", "must be at least 1"));
        }
        let threshold = self.fuzzy.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(invalid(
                "fuzzy.threshold",
                format!("{threshold} is outside [0, 1]"),
            ));
        }
        if self.fuzzy.distance == 0 {
            return Err(invalid("fuzzy.distance", "must be at least 1"));
        }
        if let Some(key) = self
            .fuzzy
            .keys
            .iter()
            .find(|k| !(k.weight > 0.0 && k.weight <= 1.0))
        {
            return Err(invalid(
                "fuzzy.keys",
                format!("weight {} of {:?} is outside (0, 1]", key.weight, key.field),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}
