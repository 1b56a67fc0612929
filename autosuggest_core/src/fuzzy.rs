use crate::{config::FuzzyOptions, model::CatalogEntry};

/// 一条模糊匹配命中。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyHit<'a> {
    /// 命中的目录条目
    pub entry: &'a CatalogEntry,
    /// 相似度分数：0 为完全匹配，1 为完全不相关
    pub score: f64,
}

/// 模糊索引抽象：core 不关心近似匹配怎么实现。
///
/// 约定：
/// - 返回结果按相关度从高到低排好序（分数从低到高）
/// - 分数超过配置阈值的条目不出现在结果里
/// - 查询为空时返回空列表
pub trait FuzzyIndex: Send + Sync {
    fn search(&self, query: &str) -> Vec<FuzzyHit<'_>>;
}

/// 模糊索引的构建方：每次建索引都从目录快照造一个全新的 `FuzzyIndex`。
pub trait FuzzyIndexer: Send + Sync {
    type Index: FuzzyIndex + 'static;

    fn index(&self, entries: &[CatalogEntry], options: &FuzzyOptions) -> Self::Index;
}

/// 不做模糊匹配：只有前缀树结果。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFuzzy;

impl FuzzyIndex for NoFuzzy {
    fn search(&self, _query: &str) -> Vec<FuzzyHit<'_>> {
        Vec::new()
    }
}

impl FuzzyIndexer for NoFuzzy {
    type Index = NoFuzzy;

    fn index(&self, _entries: &[CatalogEntry], _options: &FuzzyOptions) -> NoFuzzy {
        NoFuzzy
    }
}
