use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use tracing::trace;

use crate::{
    config::SuggestConfig,
    error::BuildError,
    merge::{DedupMerge, Merger},
    model::SuggestionList,
    snapshot::IndexSnapshot,
};

/// 服务状态机：`Unbuilt -> Building -> Ready`，重建时 `Ready -> Building -> Ready`。
///
/// 构建失败不会进入单独的失败态，而是回到构建前的状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Unbuilt,
    Building,
    Ready,
}

/// 对外的查询入口：持有当前快照。
///
/// 结构上对应流水线：
/// - service（编排） -> trie（前缀补全） + fuzzy（模糊召回） -> merger（去重/截断） -> `SuggestionList`
///
/// 查询只做一次原子 load，不加锁；快照由 `IndexBuilder` 整体替换。
pub struct IndexService<M = DedupMerge> {
    /// 当前快照；None 表示还没有成功构建过
    current: ArcSwapOption<IndexSnapshot>,
    /// 只有构建方会碰这把锁
    state: Mutex<ServiceState>,
    config: SuggestConfig,
    merger: M,
}

impl IndexService<DedupMerge> {
    pub fn new(config: SuggestConfig) -> Self {
        Self::with_merger(config, DedupMerge)
    }
}

impl Default for IndexService<DedupMerge> {
    fn default() -> Self {
        Self::new(SuggestConfig::default())
    }
}

impl<M> IndexService<M>
where
    M: Merger,
{
    pub fn with_merger(config: SuggestConfig, merger: M) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            state: Mutex::new(ServiceState::Unbuilt),
            config,
            merger,
        }
    }

    pub fn config(&self) -> &SuggestConfig {
        &self.config
    }

    pub fn state(&self) -> ServiceState {
        *self.state.lock()
    }

    /// 当前快照（可能为 None）。
    pub fn snapshot(&self) -> Option<Arc<IndexSnapshot>> {
        self.current.load_full()
    }

    /// 以配置里的默认数量查询。
    pub fn suggest_default(&self, prefix: &str) -> SuggestionList {
        self.suggest(prefix, self.config.default_limit)
    }

    /// 查询建议：前缀树结果在前，模糊结果在后，按大小写折叠去重后截断到 `limit`。
    ///
    /// 以下情况直接返回空列表，不算错误：
    /// - 去掉首尾空白后的前缀短于 `min_prefix_chars`
    /// - 还没有成功构建过索引
    ///
    /// 前导空白会被去掉；末尾空白保留，参与前缀匹配。
    pub fn suggest(&self, prefix: &str, limit: usize) -> SuggestionList {
        let prefix = prefix.trim_start();
        if prefix.trim_end().chars().count() < self.config.min_prefix_chars {
            return SuggestionList::empty();
        }
        let limit = limit.min(self.config.max_limit);
        if limit == 0 {
            return SuggestionList::empty();
        }

        let current = self.current.load();
        let Some(snapshot) = current.as_deref() else {
            trace!(prefix, "suggestion index not ready");
            return SuggestionList::empty();
        };

        let from_trie = snapshot.trie().suggestions(prefix, limit);
        let from_fuzzy: Vec<String> = snapshot
            .fuzzy()
            .search(prefix)
            .into_iter()
            .map(|hit| hit.entry.name.clone())
            .collect();
        trace!(
            prefix,
            trie = from_trie.len(),
            fuzzy = from_fuzzy.len(),
            "merging suggestions"
        );
        self.merger.merge(from_trie, from_fuzzy, limit)
    }

    /// 进入 `Building`；已经在构建时拒绝。
    pub(crate) fn begin_build(&self) -> Result<BuildTicket<'_>, BuildError> {
        let mut state = self.state.lock();
        if *state == ServiceState::Building {
            return Err(BuildError::AlreadyBuilding);
        }
        *state = ServiceState::Building;
        Ok(BuildTicket {
            current: &self.current,
            state: &self.state,
            published: false,
        })
    }
}

/// 一次进行中的构建。
///
/// `publish` 原子替换快照并进入 `Ready`；未发布就被丢弃（失败或 panic）时回到构建前的状态。
pub(crate) struct BuildTicket<'a> {
    current: &'a ArcSwapOption<IndexSnapshot>,
    state: &'a Mutex<ServiceState>,
    published: bool,
}

impl BuildTicket<'_> {
    pub(crate) fn publish(mut self, snapshot: IndexSnapshot) {
        self.current.store(Some(Arc::new(snapshot)));
        *self.state.lock() = ServiceState::Ready;
        self.published = true;
    }
}

impl Drop for BuildTicket<'_> {
    fn drop(&mut self) {
        if self.published {
            return;
        }
        let restored = if self.current.load().is_some() {
            ServiceState::Ready
        } else {
            ServiceState::Unbuilt
        };
        *self.state.lock() = restored;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fuzzy::{FuzzyHit, FuzzyIndex},
        model::CatalogEntry,
        snapshot::BuildReport,
        trie::RadixTrie,
    };
    use rstest::rstest;
    use std::time::Duration;

    /// 固定返回一组条目的模糊索引。
    struct FixedFuzzy(Vec<CatalogEntry>);

    impl FuzzyIndex for FixedFuzzy {
        fn search(&self, query: &str) -> Vec<FuzzyHit<'_>> {
            if query.trim().is_empty() {
                return Vec::new();
            }
            self.0
                .iter()
                .map(|entry| FuzzyHit { entry, score: 0.1 })
                .collect()
        }
    }

    fn report() -> BuildReport {
        BuildReport {
            entries: 0,
            skipped: 0,
            words: 0,
            elapsed: Duration::ZERO,
        }
    }

    fn ready_service(words: &[&str], fuzzy: &[&str]) -> IndexService {
        let service = IndexService::default();
        let trie: RadixTrie = words.iter().copied().collect();
        let fuzzy = FixedFuzzy(fuzzy.iter().map(|n| CatalogEntry::named(*n)).collect());
        service
            .begin_build()
            .unwrap()
            .publish(IndexSnapshot::new(trie, fuzzy, report()));
        service
    }

    #[rstest]
    fn test_unbuilt_service_returns_empty() {
        let service = IndexService::default();
        assert_eq!(service.state(), ServiceState::Unbuilt);
        assert!(service.suggest("apple", 5).is_empty());
        assert!(service.snapshot().is_none());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn test_blank_prefix_returns_empty(#[case] prefix: &str) {
        let service = ready_service(&["Apple"], &["Apple"]);
        assert!(service.suggest(prefix, 5).is_empty());
    }

    #[rstest]
    fn test_trie_casing_wins_over_fuzzy() {
        let service = ready_service(&["Apple"], &["apple"]);
        assert_eq!(service.suggest("app", 5).into_vec(), vec!["Apple".to_string()]);
    }

    #[rstest]
    fn test_fuzzy_fills_after_trie() {
        let service = ready_service(&["Samsung Galaxy"], &["Samsung Note", "samsung galaxy"]);
        assert_eq!(
            service.suggest("samsung", 5).into_vec(),
            vec!["Samsung Galaxy".to_string(), "Samsung Note".to_string()]
        );
    }

    #[rstest]
    fn test_limit_is_clamped_to_max_limit() {
        let config = SuggestConfig {
            max_limit: 2,
            default_limit: 1,
            ..SuggestConfig::default()
        };
        let service = IndexService::new(config);
        let trie: RadixTrie = ["Case A", "Case B", "Case C"].into_iter().collect();
        service
            .begin_build()
            .unwrap()
            .publish(IndexSnapshot::new(trie, FixedFuzzy(Vec::new()), report()));
        assert_eq!(service.suggest("case", 10).len(), 2);
        assert_eq!(service.suggest_default("case").len(), 1);
        assert!(service.suggest("case", 0).is_empty());
    }

    #[rstest]
    fn test_min_prefix_chars() {
        let config = SuggestConfig {
            min_prefix_chars: 2,
            ..SuggestConfig::default()
        };
        let service = IndexService::new(config);
        let trie: RadixTrie = ["Apple"].into_iter().collect();
        service
            .begin_build()
            .unwrap()
            .publish(IndexSnapshot::new(trie, FixedFuzzy(Vec::new()), report()));
        assert!(service.suggest(" a ", 5).is_empty());
        assert_eq!(service.suggest("ap", 5).len(), 1);
    }

    #[rstest]
    #[case("apple", &["Apple", "Apple Watch"])]
    #[case("  apple", &["Apple", "Apple Watch"])]
    #[case("\tAPPLE", &["Apple", "Apple Watch"])]
    #[case("apple ", &["Apple Watch"])]
    #[case(" apple ", &["Apple Watch"])]
    fn test_leading_whitespace_is_ignored(#[case] prefix: &str, #[case] expected: &[&str]) {
        let service = ready_service(&["Apple", "Apple Watch"], &[]);
        assert_eq!(service.suggest(prefix, 5).into_vec(), expected);
    }

    #[rstest]
    fn test_second_build_is_rejected_while_building() {
        let service = IndexService::default();
        let ticket = service.begin_build().unwrap();
        assert_eq!(service.state(), ServiceState::Building);
        assert!(matches!(service.begin_build(), Err(BuildError::AlreadyBuilding)));
        drop(ticket);
        assert_eq!(service.state(), ServiceState::Unbuilt);
    }

    #[rstest]
    fn test_abandoned_rebuild_returns_to_ready() {
        let service = ready_service(&["Apple"], &[]);
        let ticket = service.begin_build().unwrap();
        // 构建中旧快照继续服务
        assert_eq!(service.suggest("apple", 5).len(), 1);
        drop(ticket);
        assert_eq!(service.state(), ServiceState::Ready);
        assert_eq!(service.suggest("apple", 5).len(), 1);
    }
}
