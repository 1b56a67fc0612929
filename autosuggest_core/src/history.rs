//! `history`：每个用户最近的搜索记录（搜索框下拉里的“历史”）。
//!
//! 约定：
//! - 记录前去掉首尾空白；空白查询不记录
//! - 不区分大小写地去重：再次搜索同一个词会把它移到最前面，并更新为最新的大小写
//! - 每个用户最多保留 `capacity` 条，最新的在前
use std::collections::VecDeque;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::model::fold;

pub struct SearchHistory {
    capacity: usize,
    users: RwLock<AHashMap<String, VecDeque<String>>>,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            users: RwLock::new(AHashMap::new()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 记录一次搜索；返回是否真的写入了。
    pub fn record(&self, user: &str, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() || self.capacity == 0 {
            return false;
        }
        let key = fold(query);
        let mut users = self.users.write();
        let recent = users.entry(user.to_owned()).or_default();
        recent.retain(|q| fold(q) != key);
        recent.push_front(query.to_owned());
        recent.truncate(self.capacity);
        true
    }

    /// 最近的搜索，最新的在前。
    pub fn recent(&self, user: &str) -> Vec<String> {
        self.users
            .read()
            .get(user)
            .map(|recent| recent.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self, user: &str) {
        self.users.write().remove(user);
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_most_recent_first() {
        let history = SearchHistory::default();
        history.record("alice", "iphone");
        history.record("alice", "pixel");
        assert_eq!(history.recent("alice"), vec!["pixel", "iphone"]);
        assert!(history.recent("bob").is_empty());
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_queries_are_ignored(#[case] query: &str) {
        let history = SearchHistory::default();
        assert!(!history.record("alice", query));
        assert!(history.recent("alice").is_empty());
    }

    #[rstest]
    fn test_repeat_moves_to_front_with_latest_casing() {
        let history = SearchHistory::default();
        history.record("alice", "iphone");
        history.record("alice", "pixel");
        history.record("alice", "  iPhone ");
        assert_eq!(history.recent("alice"), vec!["iPhone", "pixel"]);
    }

    #[rstest]
    fn test_capacity_bound() {
        let history = SearchHistory::new(3);
        for q in ["a", "b", "c", "d", "e"] {
            history.record("alice", q);
        }
        assert_eq!(history.recent("alice"), vec!["e", "d", "c"]);
    }

    #[rstest]
    fn test_users_are_isolated() {
        let history = SearchHistory::default();
        history.record("alice", "kindle");
        history.record("bob", "echo");
        history.clear("alice");
        assert!(history.recent("alice").is_empty());
        assert_eq!(history.recent("bob"), vec!["echo"]);
    }
}
