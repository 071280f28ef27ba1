// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub repository search API.
//
// Currently implements:
// - Building the "language:{code}, most stars first" query
// - Parsing the first page of results into RepositoryRecord values
// - Mapping failures to NetworkError / HttpError / ParseError
//
// Rust concepts:
// - Modules: Organizing related functionality
// - Public API: What other parts of the app can use
// =============================================================================

mod model;
mod search;

// Re-export so callers write `github::RepositoryRecord`
pub use model::{LanguageCode, RepositoryRecord};
pub use search::{
    ClientConfig, GithubSearchClient, RepositorySearch, SearchError, DEFAULT_API_URL,
};
