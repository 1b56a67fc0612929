//! 近似子串匹配：在 `text` 的任意位置找与 `pattern` 编辑距离最小的子串。
//!
//! 标准 DP（Sellers）：第 0 行全为 0，表示匹配可以从 text 的任意位置开始。

/// 一次匹配的结果。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// 编辑距离（插入/删除/替换各记 1）
    pub errors: usize,
    /// 匹配子串在 text 中的结束位置（字符下标，不含）
    pub end: usize,
}

/// 对每个结束位置计算最小编辑距离，返回 `score` 最小的那个。
///
/// `score = errors / pattern.len() + start / distance`，其中 start 由结束位置估算。
/// pattern 为空时返回 None。
pub fn best_match(pattern: &[char], text: &[char], distance: usize) -> Option<(Match, f64)> {
    if pattern.is_empty() {
        return None;
    }
    let m = pattern.len();
    let distance = distance.max(1) as f64;

    // prev/curr 以 text 位置为列，按 pattern 逐行推进
    let mut prev: Vec<usize> = vec![0; text.len() + 1];
    let mut curr: Vec<usize> = vec![0; text.len() + 1];
    for (i, &pc) in pattern.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &tc) in text.iter().enumerate() {
            let cost = usize::from(pc != tc);
            curr[j + 1] = (prev[j] + cost).min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    let mut best: Option<(Match, f64)> = None;
    for (end, &errors) in prev.iter().enumerate() {
        let start = end.saturating_sub(m);
        let score = errors as f64 / m as f64 + start as f64 / distance;
        if best.is_none_or(|(_, s)| score < s) {
            best = Some((Match { errors, end }, score));
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn errors(pattern: &str, text: &str) -> usize {
        best_match(&chars(pattern), &chars(text), usize::MAX)
            .map(|(m, _)| m.errors)
            .unwrap()
    }

    #[rstest]
    #[case("sam", "samsung galaxy", 0)]
    #[case("buds", "galaxy buds", 0)]
    #[case("samsnug", "samsung", 2)]
    #[case("iphnoe", "apple iphone", 2)]
    #[case("ipone", "apple iphone", 1)]
    #[case("xperia", "sony xperia", 0)]
    #[case("abc", "", 3)]
    fn test_min_errors(#[case] pattern: &str, #[case] text: &str, #[case] expected: usize) {
        assert_eq!(errors(pattern, text), expected);
    }

    #[rstest]
    fn test_empty_pattern() {
        assert!(best_match(&[], &chars("anything"), 100).is_none());
    }

    #[rstest]
    fn test_earlier_match_scores_better() {
        let (_, near) = best_match(&chars("note"), &chars("note 20"), 100).unwrap();
        let (_, far) = best_match(&chars("note"), &chars("samsung galaxy note"), 100).unwrap();
        assert_eq!(near, 0.0);
        assert!(far > near);
    }

    #[rstest]
    fn test_match_end_position() {
        let (m, _) = best_match(&chars("tab"), &chars("galaxy tab s9"), 100).unwrap();
        assert_eq!(m, Match { errors: 0, end: 10 });
    }
}
