//! 模糊召回：按阈值过滤的近似子串匹配。
//!
//! 每个条目的分数 = 各 key 加权分数中最好（最小）的那个：
//! - 单个字段的原始分数：`errors / 查询长度 + 起点偏移 / distance`，上限 1
//! - 加权：`min(原始分数 / weight, 1)`；完全匹配在任何 key 上都是 0
//!
//! 分数不超过 `threshold` 的条目按分数升序（同分按目录顺序）返回。

pub mod matcher;

use autosuggest_core::{
    config::{FuzzyKey, FuzzyOptions, KeyField},
    fuzzy::{FuzzyHit, FuzzyIndex, FuzzyIndexer},
    model::{CatalogEntry, fold},
};
use tracing::debug;

use crate::matcher::best_match;

/// 构建 `ThresholdIndex`。
#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdIndexer;

impl FuzzyIndexer for ThresholdIndexer {
    type Index = ThresholdIndex;

    fn index(&self, entries: &[CatalogEntry], options: &FuzzyOptions) -> ThresholdIndex {
        ThresholdIndex::new(entries.to_vec(), options.clone())
    }
}

/// 预先折叠好的字段文本。
struct Record {
    /// 与 `options.keys` 一一对应
    fields: Vec<Vec<char>>,
}

pub struct ThresholdIndex {
    entries: Vec<CatalogEntry>,
    records: Vec<Record>,
    options: FuzzyOptions,
}

impl ThresholdIndex {
    pub fn new(entries: Vec<CatalogEntry>, options: FuzzyOptions) -> Self {
        let records = entries
            .iter()
            .map(|entry| Record {
                fields: options
                    .keys
                    .iter()
                    .map(|key| fold(field_text(entry, key.field)).chars().collect())
                    .collect(),
            })
            .collect();
        debug!(
            entries = entries.len(),
            keys = options.keys.len(),
            threshold = options.threshold,
            "fuzzy index ready"
        );
        Self {
            entries,
            records,
            options,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 单个条目的分数；没有任何可用字段时为 None。
    fn score(&self, pattern: &[char], record: &Record) -> Option<f64> {
        self.options
            .keys
            .iter()
            .zip(&record.fields)
            .filter(|(_, text)| !text.is_empty())
            .filter_map(|(key, text)| {
                let (_, raw) = best_match(pattern, text, self.options.distance)?;
                Some(weighted(raw, key))
            })
            .min_by(f64::total_cmp)
    }
}

fn field_text(entry: &CatalogEntry, field: KeyField) -> &str {
    match field {
        KeyField::Name => &entry.name,
        KeyField::Description => &entry.description,
    }
}

fn weighted(raw: f64, key: &FuzzyKey) -> f64 {
    (raw.min(1.0) / key.weight).min(1.0)
}

impl FuzzyIndex for ThresholdIndex {
    fn search(&self, query: &str) -> Vec<FuzzyHit<'_>> {
        let pattern: Vec<char> = fold(query.trim()).chars().collect();
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(i, record)| self.score(&pattern, record).map(|s| (i, s)))
            .filter(|&(_, s)| s <= self.options.threshold)
            .collect();
        // 稳定排序：同分保持目录顺序
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(self.options.max_hits);

        scored
            .into_iter()
            .map(|(i, score)| FuzzyHit {
                entry: &self.entries[i],
                score,
            })
            .collect()
    }
}
