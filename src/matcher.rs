//! Filter predicates handed to [`Tree::filter`](crate::xray::Tree::filter).

use crate::diagnostics;
use regex::RegexBuilder;
use serde::Deserialize;

/// How a filter query is matched against a leaf lineage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Matcher {
    /// Case-insensitive substring.
    #[default]
    Substring,
    /// Case-insensitive regular expression. Invalid patterns match nothing.
    Regex,
    /// Case-insensitive ordered subsequence, e.g. `fo2` matches `foo-2`.
    Fuzzy,
}

impl Matcher {
    pub fn matches(self, query: &str, haystack: &str) -> bool {
        match self {
            Matcher::Substring => haystack.to_lowercase().contains(&query.to_lowercase()),
            Matcher::Regex => match RegexBuilder::new(query).case_insensitive(true).build() {
                Ok(re) => re.is_match(haystack),
                Err(err) => {
                    diagnostics::warn(format!("invalid filter regex {:?}: {}", query, err));
                    false
                }
            },
            Matcher::Fuzzy => fuzzy_match(query, haystack),
        }
    }
}

fn fuzzy_match(query: &str, haystack: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|q| hay.any(|h| h == q))
}
