//! `trie`：压缩前缀树（radix tree / Patricia trie）。
//!
//! 约定：
//! - 边上的标签是 `fold` 之后的字符串，终止节点保存原始大小写的完整词
//! - 同一节点下任意两条边没有非空公共前缀（压缩性质）
//! - 根节点永远不是终止节点；空串不可插入
//! - 子边按“分支首次出现”的顺序保存；边被切分时原位替换，不改变顺序
//!
//! 建好之后只读：重建会产生一棵新树，而不是原地修改。
use crate::{error::TrieError, model::fold};

#[derive(Debug, Clone)]
struct Edge {
    /// 非空标签
    label: String,
    node: TrieNode,
}

/// 前缀树节点。
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    edges: Vec<Edge>,
    /// 终止节点保存的原始词；`Some` 当且仅当该节点是终止节点
    word: Option<String>,
}

impl TrieNode {
    pub fn is_terminal(&self) -> bool {
        self.word.is_some()
    }

    pub fn word(&self) -> Option<&str> {
        self.word.as_deref()
    }

    /// 子边（标签, 子节点），按插入顺序。
    pub fn children(&self) -> impl Iterator<Item = (&str, &TrieNode)> {
        self.edges.iter().map(|e| (e.label.as_str(), &e.node))
    }

    /// 深度优先收集终止节点的词；凑够 `limit` 条立即停止。
    fn collect(&self, limit: usize, out: &mut Vec<String>) {
        if out.len() >= limit {
            return;
        }
        if let Some(word) = &self.word {
            out.push(word.clone());
        }
        for edge in &self.edges {
            if out.len() >= limit {
                return;
            }
            edge.node.collect(limit, out);
        }
    }

    fn count_nodes(&self) -> usize {
        1 + self.edges.iter().map(|e| e.node.count_nodes()).sum::<usize>()
    }
}

/// 压缩前缀树。
#[derive(Debug, Clone, Default)]
pub struct RadixTrie {
    root: TrieNode,
    /// 终止节点数量
    len: usize,
}

impl RadixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一个词：路径按折叠后的形式匹配，终止节点保存 `word` 原样。
    ///
    /// 重复插入同一个词（不区分大小写）只会覆盖保存的大小写。
    pub fn insert(&mut self, word: &str) -> Result<(), TrieError> {
        let folded = fold(word);
        if folded.is_empty() {
            return Err(TrieError::EmptyWord);
        }

        let mut node = &mut self.root;
        let mut remaining: &str = &folded;
        loop {
            let found = node
                .edges
                .iter()
                .position(|e| common_prefix_len(&e.label, remaining) > 0);
            let Some(index) = found else {
                // 没有可复用的分支：整段剩余串作为新边
                node.edges.push(Edge {
                    label: remaining.to_owned(),
                    node: TrieNode {
                        edges: Vec::new(),
                        word: Some(word.to_owned()),
                    },
                });
                self.len += 1;
                return Ok(());
            };

            let edge = &mut node.edges[index];
            let common = common_prefix_len(&edge.label, remaining);
            if common < edge.label.len() {
                // 在公共前缀处切开：中间节点接管原子节点，挂在剩余后缀下
                let suffix = edge.label.split_off(common);
                let child = std::mem::take(&mut edge.node);
                edge.node.edges.push(Edge {
                    label: suffix,
                    node: child,
                });
            }
            remaining = &remaining[common..];
            node = &mut edge.node;

            if remaining.is_empty() {
                if node.word.is_none() {
                    self.len += 1;
                }
                node.word = Some(word.to_owned());
                return Ok(());
            }
        }
    }

    /// 前缀补全：返回至多 `limit` 个折叠后以折叠 `prefix` 开头的词。
    ///
    /// 结果顺序是树的遍历顺序，不做任何相关性排序。
    pub fn suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let mut out = Vec::new();
        if limit == 0 || prefix.is_empty() {
            return out;
        }
        if let Some(node) = self.locate(&fold(prefix)) {
            node.collect(limit, &mut out);
        }
        out
    }

    /// 找到“前缀被完全消耗”时所在子树的根。
    fn locate(&self, prefix: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        let mut remaining = prefix;
        loop {
            let (edge, common) = node.edges.iter().find_map(|e| {
                let common = common_prefix_len(&e.label, remaining);
                (common > 0).then_some((e, common))
            })?;
            if common == remaining.len() {
                // 前缀在这条边上（或恰好在边尾）结束
                return Some(&edge.node);
            }
            if common < edge.label.len() {
                // 在边的中间分叉：这条分支不可能有补全
                return None;
            }
            remaining = &remaining[common..];
            node = &edge.node;
        }
    }

    /// 是否包含某个词（不区分大小写的精确匹配）。
    pub fn contains(&self, word: &str) -> bool {
        let folded = fold(word);
        if folded.is_empty() {
            return false;
        }
        let mut node = &self.root;
        let mut remaining: &str = &folded;
        while !remaining.is_empty() {
            let Some(edge) = node
                .edges
                .iter()
                .find(|e| remaining.starts_with(e.label.as_str()))
            else {
                return false;
            };
            remaining = &remaining[edge.label.len()..];
            node = &edge.node;
        }
        node.is_terminal()
    }

    /// 已保存的词数量（终止节点数）。
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 节点总数（含根节点）。
    pub fn node_count(&self) -> usize {
        self.root.count_nodes()
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }
}

impl<S: AsRef<str>> FromIterator<S> for RadixTrie {
    /// 空串会被跳过。
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut trie = Self::new();
        for word in iter {
            let _ = trie.insert(word.as_ref());
        }
        trie
    }
}

/// 两个串的公共前缀长度（字节数，总落在字符边界上）。
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map_or_else(|| a.len().min(b.len()), |((i, _), _)| i)
}
