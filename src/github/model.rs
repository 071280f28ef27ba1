// src/github/model.rs
// =============================================================================
// Domain types shared by the search client and the session.
//
// - LanguageCode: the language a search is restricted to
// - RepositoryRecord: one repository out of a search result
//
// The raw JSON shape of the search API lives in search.rs. These types are
// what the rest of the application sees once a response has been parsed.
// =============================================================================

use serde::Serialize;
use std::fmt;

/// A language code such as "python" or "c++".
///
/// Compared by exact string match. Never empty: `new` refuses blank input,
/// which is how "no language selected" stays distinct from a real selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One repository from a search result. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub open_issues: u64,
    /// Link to the repository page, when the service provides one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}
