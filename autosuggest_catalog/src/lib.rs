use std::{
    fs,
    path::{Path, PathBuf},
};

use autosuggest_core::{catalog::Catalog, error::CatalogError, model::CatalogEntry};
use tracing::debug;

/// 目录文件格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// `name<TAB>description`
    Tsv,
    /// `[{ "name": "...", "description": "..." }]`
    Json,
}

impl CatalogFormat {
    /// 按扩展名推断：`.json` 为 JSON，其它一律按 TSV。
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Tsv,
        }
    }
}

/// 文件目录：每次 `snapshot` 都重新读文件，重建时能看到文件的最新内容。
///
/// TSV 格式（简化版）：
///
/// - `name<TAB>description`
/// - description 可省略，默认空串
/// - 允许 `#` 开头注释行和空行
///
/// JSON 格式：对象数组，名称字段也接受 `productName`。
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    format: CatalogFormat,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = CatalogFormat::from_path(&path);
        Self { path, format }
    }

    pub fn with_format(path: impl Into<PathBuf>, format: CatalogFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> CatalogFormat {
        self.format
    }
}

impl Catalog for FileCatalog {
    fn snapshot(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let s = fs::read_to_string(&self.path).map_err(|err| {
            CatalogError::Unavailable(format!("{}: {err}", self.path.display()))
        })?;
        let entries = match self.format {
            CatalogFormat::Tsv => parse_tsv(&s)?,
            CatalogFormat::Json => parse_json(&s)?,
        };
        debug!(path = %self.path.display(), entries = entries.len(), "catalog loaded");
        Ok(entries)
    }
}

pub fn parse_tsv(s: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let mut entries = Vec::new();
    for (idx, line) in s.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let mut it = line.splitn(2, '\t');
        let name = it.next().unwrap_or("").trim();
        if name.is_empty() {
            return Err(CatalogError::Malformed {
                location: format!("line {}", idx + 1),
                reason: "missing product name".to_owned(),
            });
        }
        let description = it.next().map(str::trim).unwrap_or("");
        entries.push(CatalogEntry::new(name, description));
    }
    Ok(entries)
}

pub fn parse_json(s: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    serde_json::from_str(s).map_err(|err| CatalogError::Malformed {
        location: format!("line {} column {}", err.line(), err.column()),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    fn test_parse_tsv() {
        let entries = parse_tsv(
            "# name\tdescription\n\
             Apple iPhone 13\tiOS smartphone\n\
             \n\
             Sony Xperia 1\r\n\
             Kindle Paperwhite\tE-reader\twaterproof\n",
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![
                CatalogEntry::new("Apple iPhone 13", "iOS smartphone"),
                CatalogEntry::named("Sony Xperia 1"),
                CatalogEntry::new("Kindle Paperwhite", "E-reader\twaterproof"),
            ]
        );
    }

    #[rstest]
    fn test_tsv_missing_name_reports_line() {
        let err = parse_tsv("Apple iPhone 13\n\tno name here\n").unwrap_err();
        match err {
            CatalogError::Malformed { location, .. } => assert_eq!(location, "line 2"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    fn test_parse_json_accepts_product_name_alias() {
        let entries = parse_json(
            r#"[
                { "name": "Samsung Galaxy S23", "description": "Android smartphone" },
                { "productName": "Sony Xperia 1" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            entries,
            vec![
                CatalogEntry::new("Samsung Galaxy S23", "Android smartphone"),
                CatalogEntry::named("Sony Xperia 1"),
            ]
        );
    }

    #[rstest]
    #[case("{}")]
    #[case("[{ \"description\": \"nameless\" }]")]
    #[case("[")]
    fn test_parse_json_rejects_malformed(#[case] doc: &str) {
        assert!(matches!(parse_json(doc), Err(CatalogError::Malformed { .. })));
    }

    #[rstest]
    #[case("catalog.json", CatalogFormat::Json)]
    #[case("catalog.JSON", CatalogFormat::Json)]
    #[case("catalog.tsv", CatalogFormat::Tsv)]
    #[case("catalog", CatalogFormat::Tsv)]
    fn test_format_from_extension(#[case] path: &str, #[case] expected: CatalogFormat) {
        assert_eq!(FileCatalog::new(path).format(), expected);
    }

    #[rstest]
    fn test_snapshot_rereads_file() {
        let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
        writeln!(file, "Echo Dot\tsmart speaker").unwrap();
        let catalog = FileCatalog::new(file.path());
        assert_eq!(catalog.snapshot().unwrap().len(), 1);

        writeln!(file, "Echo Show\tsmart display").unwrap();
        assert_eq!(catalog.snapshot().unwrap().len(), 2);
    }

    #[rstest]
    fn test_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileCatalog::new(dir.path().join("missing.json"));
        assert!(matches!(catalog.snapshot(), Err(CatalogError::Unavailable(_))));
    }
}
