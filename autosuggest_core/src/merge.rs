//! `merge`：把前缀树结果和模糊结果合成一个建议列表。

use ahash::AHashSet;

use crate::model::{SuggestionList, fold};

/// Merger：合并两路候选（去重、截断）。
pub trait Merger: Send + Sync {
    /// `primary` 先于 `secondary` 进入结果。
    fn merge(&self, primary: Vec<String>, secondary: Vec<String>, limit: usize) -> SuggestionList;
}

/// 默认 merger：按插入顺序保留，按大小写折叠去重，截断到 limit。
///
/// 同一个折叠 key 以先出现的那条为准（也就是保留它的大小写）。
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupMerge;

impl Merger for DedupMerge {
    fn merge(&self, primary: Vec<String>, secondary: Vec<String>, limit: usize) -> SuggestionList {
        let mut seen: AHashSet<String> = AHashSet::with_capacity(primary.len() + secondary.len());
        let mut out: Vec<String> = Vec::with_capacity(limit.min(primary.len() + secondary.len()));
        for s in primary.into_iter().chain(secondary) {
            if out.len() >= limit {
                break;
            }
            if seen.insert(fold(&s)) {
                out.push(s);
            }
        }
        SuggestionList::from_unique(out)
    }
}
