use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::dataset::Split;
use crate::error::{AppError, Result};

/// A single search term, also used verbatim as the class directory name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for SearchTerm {
    type Err = AppError;

    fn from_str(raw: &str) -> Result<Self> {
        let term = raw.trim();
        let invalid = term.is_empty()
            || term == "."
            || term == ".."
            || term.chars().any(|c| c == '/' || std::path::is_separator(c))
            || Split::is_split_name(term);

        if invalid {
            return Err(AppError::InvalidSearchTerm(raw.to_string()));
        }
        Ok(Self(term.to_string()))
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for SearchTerm {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Split a comma-separated list such as `"cats, dogs ,birds"` into trimmed terms.
///
/// Duplicates are kept as given.
///
/// # Errors
///
/// Returns `AppError::InvalidSearchTerm` if any term is empty after trimming, contains a
/// path separator, or is one of the split directory names.
pub fn parse_search_terms(list: &str) -> Result<Vec<SearchTerm>> {
    list.split(',').map(SearchTerm::from_str).collect()
}

/// Deserialize search terms from either `"cats,dogs"` or `["cats", "dogs"]`.
pub fn deserialize_search_terms<'de, D>(deserializer: D) -> Result<Vec<SearchTerm>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrVec {
        List(String),
        Vec(Vec<String>),
    }

    let terms = match ListOrVec::deserialize(deserializer)? {
        ListOrVec::List(list) => parse_search_terms(&list),
        ListOrVec::Vec(items) => items.iter().map(|s| s.parse()).collect(),
    };
    terms.map_err(serde::de::Error::custom)
}
