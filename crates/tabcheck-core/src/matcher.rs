//! Glob pattern resolution.
//!
//! Patterns support `*` (any run of characters, including none) and `?` (exactly one
//! character). Everything else matches literally and case-sensitively.

use std::path::Path;

/// True when `text` matches `pattern` in full.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    // Position of the last `*` seen and the text position it currently absorbs up to.
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, absorbed)) => {
                    p = star + 1;
                    t = absorbed + 1;
                    backtrack = Some((star, absorbed + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|&c| c == '*')
}

/// Number of characters before the first wildcard.
pub fn literal_prefix_len(pattern: &str) -> usize {
    pattern.chars().take_while(|&c| c != '*' && c != '?').count()
}

/// Picks the most specific pattern for a file name.
#[derive(Debug, Clone, Default)]
pub struct PatternMatcher {
    patterns: Vec<String>,
}

impl PatternMatcher {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Index of the winning pattern for `name`.
    ///
    /// Among matching patterns the longest literal prefix wins; on a tie the pattern
    /// declared first wins.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        for (idx, pattern) in self.patterns.iter().enumerate() {
            if !glob_match(pattern, name) {
                continue;
            }
            let prefix = literal_prefix_len(pattern);
            if best.is_none_or(|(_, best_prefix)| prefix > best_prefix) {
                best = Some((idx, prefix));
            }
        }
        best.map(|(idx, _)| idx)
    }

    /// Like [`resolve`](Self::resolve), using the path's base name.
    pub fn resolve_path(&self, path: &Path) -> Option<usize> {
        let name = path.file_name()?.to_string_lossy();
        self.resolve(&name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards() {
        assert!(glob_match("sales_*.csv", "sales_2024.csv"));
        assert!(glob_match("sales_*.csv", "sales_.csv"));
        assert!(!glob_match("sales_*.csv", "sales_2024.parquet"));
        assert!(glob_match("data_?.csv", "data_1.csv"));
        assert!(!glob_match("data_?.csv", "data_12.csv"));
        assert!(glob_match("*", ""));
        assert!(glob_match("*a*b", "xxaxxb"));
        assert!(!glob_match("*a*b", "xxaxxbx"));
    }

    #[test]
    fn case_sensitive() {
        assert!(!glob_match("Sales_*.csv", "sales_1.csv"));
    }

    #[test]
    fn brackets_are_literal() {
        assert!(glob_match("[a].csv", "[a].csv"));
        assert!(!glob_match("[a].csv", "a.csv"));
    }

    #[test]
    fn prefix_length() {
        assert_eq!(literal_prefix_len("sales_*.csv"), 6);
        assert_eq!(literal_prefix_len("*.csv"), 0);
        assert_eq!(literal_prefix_len("data_?.csv"), 5);
        assert_eq!(literal_prefix_len("exact.csv"), 9);
    }

    #[test]
    fn most_specific_wins() {
        let matcher = PatternMatcher::new(["*.csv", "sales_*.csv", "sales_2024_*.csv"]);
        assert_eq!(matcher.resolve("sales_2024_q1.csv"), Some(2));
        assert_eq!(matcher.resolve("sales_2023.csv"), Some(1));
        assert_eq!(matcher.resolve("stock.csv"), Some(0));
        assert_eq!(matcher.resolve("stock.parquet"), None);
    }

    #[test]
    fn ties_go_to_declaration_order() {
        let matcher = PatternMatcher::new(["sales*.csv", "sales?2024.csv"]);
        assert_eq!(matcher.resolve("sales_2024.csv"), Some(0));
        let reversed = PatternMatcher::new(["sales?2024.csv", "sales*.csv"]);
        assert_eq!(reversed.resolve("sales_2024.csv"), Some(0));
    }

    #[test]
    fn longer_prefix_beats_earlier_declaration() {
        let matcher = PatternMatcher::new(["sales*.csv", "sales?2024.csv", "sales_*"]);
        assert_eq!(matcher.resolve("sales_2024.csv"), Some(2));
    }

    #[test]
    fn uses_base_name() {
        let matcher = PatternMatcher::new(["sales_*.csv"]);
        assert_eq!(
            matcher.resolve_path(Path::new("/data/sales_dir/sales_1.csv")),
            Some(0)
        );
        assert_eq!(matcher.resolve_path(Path::new("sales_dir/other.csv")), None);
    }
}
