use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use autosuggest_catalog::FileCatalog;
use autosuggest_core::{
    builder::IndexBuilder,
    config::SuggestConfig,
    history::SearchHistory,
    model::SuggestionList,
    service::IndexService,
};
use autosuggest_fuzzy::ThresholdIndexer;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// 搜索框自动补全 demo：逐行输入前缀，输出建议。
#[derive(Parser)]
#[command(name = "autosuggest")]
#[command(version)]
struct Cli {
    /// 商品目录文件（.tsv 或 .json）
    #[arg(long, default_value_os_t = default_catalog_path())]
    catalog: PathBuf,

    /// TOML 配置文件
    #[arg(long)]
    config: Option<PathBuf>,

    /// 每次返回的建议数量（默认取配置里的 default_limit）
    #[arg(short, long)]
    limit: Option<usize>,

    /// 搜索历史记在哪个用户名下
    #[arg(long, default_value = "local")]
    user: String,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SuggestConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SuggestConfig::default(),
    };
    let limit = cli.limit.unwrap_or(config.default_limit);
    tracing::info!(catalog = %cli.catalog.display(), limit, "starting autosuggest");
    let history = SearchHistory::new(config.history_capacity);
    let builder = Arc::new(IndexBuilder::new(ThresholdIndexer, config.fuzzy.clone()));
    let service = Arc::new(IndexService::new(config));
    let catalog = Arc::new(FileCatalog::new(&cli.catalog));

    // 首次构建放到后台：构建完成前的查询得到空列表
    Arc::clone(&builder)
        .spawn(Arc::clone(&catalog), Arc::clone(&service))
        .context("spawning index build thread")?;

    let mut repl = Repl {
        service,
        builder,
        catalog,
        history,
        user: cli.user,
        limit,
        last: SuggestionList::empty(),
    };
    repl.run()
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,autosuggest_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("asset")
        .join("catalog.tsv")
}

struct Repl {
    service: Arc<IndexService>,
    builder: Arc<IndexBuilder<ThresholdIndexer>>,
    catalog: Arc<FileCatalog>,
    history: SearchHistory,
    user: String,
    limit: usize,
    /// 上一次输出的建议（给 `:pick` 用）
    last: SuggestionList,
}

impl Repl {
    fn run(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let mut out = io::stdout();
        let mut line = String::new();
        writeln!(
            out,
            "autosuggest demo | catalog: {}",
            self.catalog.path().display()
        )?;
        writeln!(out, "输入前缀后回车。:pick <n> 记录搜索，:history 查看历史，:state 查看索引，:rebuild 重建，:q 退出。")?;

        loop {
            line.clear();
            write!(out, "query> ")?;
            out.flush()?;
            if stdin.lock().read_line(&mut line)? == 0 {
                break;
            }
            // 只去掉换行：前缀末尾的空格有意义（"apple " 只匹配 apple 开头的多词名称）
            let input = line.trim_end_matches(['\r', '\n']);
            if input.trim().is_empty() {
                continue;
            }

            match input.trim() {
                ":q" | ":quit" | ":exit" => break,
                ":state" => self.print_state(&mut out)?,
                ":history" => self.print_history(&mut out)?,
                ":rebuild" => self.rebuild(&mut out)?,
                cmd if cmd.starts_with(":pick") => {
                    let arg = cmd.trim_start_matches(":pick").trim();
                    self.pick(&mut out, arg)?;
                }
                _ => self.suggest(&mut out, input)?,
            }
        }
        Ok(())
    }

    fn suggest(&mut self, out: &mut impl Write, prefix: &str) -> io::Result<()> {
        self.last = self.service.suggest(prefix, self.limit);
        if self.last.is_empty() {
            return writeln!(out, "(无建议)");
        }
        for (i, s) in self.last.iter().enumerate() {
            writeln!(out, "{}. {s}", i + 1)?;
        }
        Ok(())
    }

    fn pick(&mut self, out: &mut impl Write, arg: &str) -> io::Result<()> {
        let picked = arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.last.get(i));
        let Some(query) = picked else {
            return writeln!(out, "无效选择，请输入 1-{}", self.last.len().max(1));
        };
        self.history.record(&self.user, query);
        writeln!(out, "search: {query}")
    }

    fn print_history(&self, out: &mut impl Write) -> io::Result<()> {
        let recent = self.history.recent(&self.user);
        if recent.is_empty() {
            return writeln!(out, "(没有搜索历史)");
        }
        for q in recent {
            writeln!(out, "  {q}")?;
        }
        Ok(())
    }

    fn print_state(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "state: {:?}", self.service.state())?;
        if let Some(snapshot) = self.service.snapshot() {
            let report = snapshot.report();
            writeln!(
                out,
                "entries: {} (skipped {}) | words: {} | built in {:?}",
                report.entries, report.skipped, report.words, report.elapsed
            )?;
        }
        Ok(())
    }

    fn rebuild(&self, out: &mut impl Write) -> io::Result<()> {
        match self.builder.rebuild(self.catalog.as_ref(), self.service.as_ref()) {
            Ok(report) => writeln!(
                out,
                "rebuilt: {} entries, {} words in {:?}",
                report.entries, report.words, report.elapsed
            ),
            Err(err) => writeln!(out, "重建失败（继续使用旧索引）: {err}"),
        }
    }
}
