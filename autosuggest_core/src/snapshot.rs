use std::{fmt, time::Duration};

use crate::{fuzzy::FuzzyIndex, trie::RadixTrie};

/// 一次构建的统计信息。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// 进入索引的目录条目数
    pub entries: usize,
    /// 因名称为空被跳过的条目数
    pub skipped: usize,
    /// 前缀树里不重复（不区分大小写）的词数
    pub words: usize,
    pub elapsed: Duration,
}

/// 建好的只读索引对：（前缀树, 模糊索引）。
///
/// 发布之后不再修改；重建会产生新的快照并整体替换。
pub struct IndexSnapshot {
    trie: RadixTrie,
    fuzzy: Box<dyn FuzzyIndex>,
    report: BuildReport,
}

impl IndexSnapshot {
    pub fn new(trie: RadixTrie, fuzzy: impl FuzzyIndex + 'static, report: BuildReport) -> Self {
        Self {
            trie,
            fuzzy: Box::new(fuzzy),
            report,
        }
    }

    pub fn trie(&self) -> &RadixTrie {
        &self.trie
    }

    pub fn fuzzy(&self) -> &dyn FuzzyIndex {
        self.fuzzy.as_ref()
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }
}

impl fmt::Debug for IndexSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexSnapshot")
            .field("words", &self.trie.len())
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}
