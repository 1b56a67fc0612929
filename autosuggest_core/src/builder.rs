//! `builder`：从目录快照构建（前缀树, 模糊索引）并原子发布。
//!
//! 约定：
//! - 每次构建都产生全新的 `RadixTrie` 和 `FuzzyIndex`，不修改正在服务的快照
//! - 名称去掉空白后为空的条目会被跳过（两个索引都不收录）
//! - 构建失败时旧快照继续服务；错误只返回给触发构建的调用方
use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Instant,
};

use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    config::FuzzyOptions,
    error::BuildError,
    fuzzy::FuzzyIndexer,
    merge::Merger,
    model::CatalogEntry,
    service::IndexService,
    snapshot::{BuildReport, IndexSnapshot},
    trie::RadixTrie,
};

/// 索引构建器。
pub struct IndexBuilder<X> {
    /// 模糊索引的构建方
    indexer: X,
    options: FuzzyOptions,
}

impl<X> IndexBuilder<X>
where
    X: FuzzyIndexer,
{
    pub fn new(indexer: X, options: FuzzyOptions) -> Self {
        Self { indexer, options }
    }

    pub fn options(&self) -> &FuzzyOptions {
        &self.options
    }

    /// 纯构建：不碰任何服务状态。
    pub fn build(&self, mut entries: Vec<CatalogEntry>) -> IndexSnapshot {
        let started = Instant::now();
        let total = entries.len();
        entries.retain(|e| !e.name.trim().is_empty());
        let skipped = total - entries.len();
        if skipped > 0 {
            debug!(skipped, "skipping catalog entries with blank names");
        }

        let mut trie = RadixTrie::new();
        for entry in &entries {
            // 非空白名称折叠后一定非空
            if let Err(err) = trie.insert(&entry.name) {
                debug!(name = %entry.name, %err, "entry not added to trie");
            }
        }
        let fuzzy = self.indexer.index(&entries, &self.options);

        let report = BuildReport {
            entries: entries.len(),
            skipped,
            words: trie.len(),
            elapsed: started.elapsed(),
        };
        IndexSnapshot::new(trie, fuzzy, report)
    }

    /// 拉取目录快照、构建并发布到 `service`。
    ///
    /// 状态机：进入 `Building`，成功后 `Ready`，失败回到构建前的状态。
    pub fn rebuild<C, M>(&self, catalog: &C, service: &IndexService<M>) -> Result<BuildReport, BuildError>
    where
        C: Catalog + ?Sized,
        M: Merger,
    {
        let ticket = service.begin_build()?;
        info!("building suggestion index");

        let entries = catalog.snapshot().map_err(|err| {
            warn!(error = %err, "index build failed; previous snapshot stays in service");
            BuildError::from(err)
        })?;

        let snapshot = self.build(entries);
        let report = snapshot.report();
        ticket.publish(snapshot);
        info!(
            entries = report.entries,
            skipped = report.skipped,
            words = report.words,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "published suggestion index"
        );
        Ok(report)
    }
}

impl<X> IndexBuilder<X>
where
    X: FuzzyIndexer + 'static,
{
    /// 在后台线程执行 `rebuild`；查询不会等待构建。
    pub fn spawn<C, M>(
        self: Arc<Self>,
        catalog: Arc<C>,
        service: Arc<IndexService<M>>,
    ) -> io::Result<JoinHandle<Result<BuildReport, BuildError>>>
    where
        C: Catalog + ?Sized + 'static,
        M: Merger + 'static,
    {
        thread::Builder::new()
            .name("suggest-index-build".to_owned())
            .spawn(move || self.rebuild(catalog.as_ref(), service.as_ref()))
    }
}
