//! Query matching using nucleo-matcher.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use serde::Deserialize;

/// How a query is compared against cell text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring.
    #[default]
    Exact,
    /// Case-insensitive subsequence: every query character must appear in
    /// order, not necessarily adjacent. Whitespace separates words that must
    /// each match.
    Fuzzy,
}

/// A compiled query, reused across all cells of one filter pass.
///
/// # Example
///
/// ```
/// use tabex_lib::search::{QueryMatcher, SearchMode};
///
/// let mut exact = QueryMatcher::new("lee", SearchMode::Exact);
/// assert!(exact.matches("Bruce Lee"));
/// assert!(!exact.matches("Lorem"));
///
/// let mut fuzzy = QueryMatcher::new("pkch", SearchMode::Fuzzy);
/// assert!(fuzzy.matches("Pikachu"));
/// ```
pub struct QueryMatcher {
    inner: Inner,
}

enum Inner {
    Exact(String),
    Fuzzy {
        pattern: Pattern,
        matcher: Box<Matcher>,
        buf: Vec<char>,
    },
}

impl QueryMatcher {
    /// Compiles `query` for the given mode.
    pub fn new(query: &str, mode: SearchMode) -> Self {
        let inner = match mode {
            SearchMode::Exact => Inner::Exact(query.to_lowercase()),
            SearchMode::Fuzzy => Inner::Fuzzy {
                pattern: Pattern::new(
                    query,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                ),
                matcher: Box::new(Matcher::new(Config::DEFAULT)),
                buf: Vec::new(),
            },
        };
        Self { inner }
    }

    /// Returns `true` if `text` satisfies the query.
    pub fn matches(&mut self, text: &str) -> bool {
        match &mut self.inner {
            Inner::Exact(needle) => text.to_lowercase().contains(needle.as_str()),
            Inner::Fuzzy {
                pattern,
                matcher,
                buf,
            } => {
                let haystack = Utf32Str::new(text, buf);
                pattern.score(haystack, matcher).is_some()
            }
        }
    }
}

impl std::fmt::Debug for QueryMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.inner {
            Inner::Exact(needle) => f.debug_tuple("Exact").field(needle).finish(),
            Inner::Fuzzy { .. } => f.write_str("Fuzzy"),
        }
    }
}
