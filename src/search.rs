use regex::Regex;

use crate::error::SearchError;

/// The search overlay configuration (spec §3). Mutually exclusive by
/// construction: setting one variant replaces whichever was active.
#[derive(Debug, Clone)]
pub enum SearchConfig {
    None,
    Literal(String),
    Regex(Regex),
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig::None
    }
}

impl SearchConfig {
    pub fn literal(s: impl Into<String>) -> Self {
        SearchConfig::Literal(s.into())
    }

    pub fn regex(pattern: &str) -> Result<Self, SearchError> {
        let re = Regex::new(pattern).inspect_err(|e| {
            log::warn!("rejected search pattern {pattern:?}: {e}");
        })?;
        log::debug!("compiled search regex {pattern:?}");
        Ok(SearchConfig::Regex(re))
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, SearchConfig::None)
    }

    /// Non-overlapping match byte-ranges within `text`, left-to-right.
    ///
    /// Literal search is byte-exact and case-sensitive, advancing past each
    /// match by its length. Regex search uses the engine's leftmost-longest
    /// iteration (`find_iter`), which already guards against empty-match
    /// infinite loops by advancing at least one byte on a zero-width match.
    pub fn matches(&self, text: &str) -> Vec<(usize, usize)> {
        match self {
            SearchConfig::None => Vec::new(),
            SearchConfig::Literal(needle) => {
                if needle.is_empty() {
                    return Vec::new();
                }
                let mut out = Vec::new();
                let mut start = 0;
                while let Some(pos) = text[start..].find(needle.as_str()) {
                    let begin = start + pos;
                    let end = begin + needle.len();
                    out.push((begin, end));
                    start = end;
                }
                out
            }
            SearchConfig::Regex(re) => re.find_iter(text).map(|m| (m.start(), m.end())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches_are_non_overlapping_and_left_to_right() {
        let cfg = SearchConfig::literal("aa");
        assert_eq!(cfg.matches("aaaa"), vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn literal_search_is_case_sensitive() {
        let cfg = SearchConfig::literal("Error");
        assert_eq!(cfg.matches("error Error"), vec![(6, 11)]);
    }

    #[test]
    fn regex_search_does_not_loop_on_empty_matches() {
        let cfg = SearchConfig::regex(r"x*").unwrap();
        let matches = cfg.matches("abc");
        assert!(matches.len() <= 4);
    }

    #[test]
    fn invalid_regex_is_rejected() {
        assert!(SearchConfig::regex("(unclosed").is_err());
    }
}
