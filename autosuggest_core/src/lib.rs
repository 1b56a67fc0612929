//! `autosuggest_core`：搜索框自动补全的纯逻辑层，不做任何 I/O。
//!
//! 设计目标：
//! - **前缀树 + 模糊召回**：压缩前缀树负责快速的精确前缀补全，模糊索引负责错字/非前缀召回
//! - **分层清晰**：builder（建索引） -> snapshot（只读索引对） -> service（查询） -> merger（去重/截断）
//! - **读无锁**：快照整体原子替换，查询永远看到完整的旧快照或新快照
pub mod builder;
pub mod catalog;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod history;
pub mod merge;
pub mod model;
pub mod service;
pub mod snapshot;
pub mod trie;
