use serde::Deserialize;

/// 商品目录条目（由 catalog 协作方提供，只作为建索引的原始输入）。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    /// 展示名称（建前缀树用，大小写原样保留）
    #[serde(alias = "productName")]
    pub name: String,
    /// 描述（只参与模糊匹配）
    #[serde(default)]
    pub description: String,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// 只有名称、没有描述的条目。
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }
}

/// 大小写折叠：所有“不区分大小写”的比较都走这里。
///
/// 逐字符折叠，不看上下文：任意前缀折叠后仍是整串折叠结果的前缀
/// （`str::to_lowercase` 会把词尾的 Σ 变成 ς，不满足这一点）。
pub fn fold(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// 给调用方的建议列表。
///
/// 保证：
/// - 按 `fold` 后的值唯一
/// - 长度不超过调用方给的 limit
/// - 每条保留最先产出它的来源（前缀树或模糊索引）的大小写
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionList {
    items: Vec<String>,
}

impl SuggestionList {
    pub fn empty() -> Self {
        Self::default()
    }

    /// 由 `Merger` 调用：`items` 须已按 `fold` 去重并截断。
    pub fn from_unique(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

impl IntoIterator for SuggestionList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a SuggestionList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
