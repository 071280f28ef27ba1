// src/session/state.rs
// =============================================================================
// The data a session owns, and the values passed in and out of it.
//
// - Generation: counter that tags every fetch
// - Status: what the UI should show (Idle, Loading, Success, Empty, Error)
// - SessionState: the one record the state machine mutates
// - Intent / FetchRequest: what goes into and comes out of a transition
//
// The chosen repository and the error detail live INSIDE the Status enum.
// That makes "Success <=> repo is set" and "Error <=> error is set" true by
// construction instead of something we have to keep in sync by hand.
// =============================================================================

use serde::Serialize;
use std::fmt;

use crate::github::{LanguageCode, RepositoryRecord, SearchError};

/// Monotonically increasing fetch counter, used to spot stale responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the session is
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Status {
    /// Nothing selected
    Idle,
    /// A fetch for the current generation is outstanding
    Loading,
    /// A repository was picked from a non-empty result
    Success(RepositoryRecord),
    /// The search worked but returned no repositories
    Empty,
    /// The search failed
    Error(SearchError),
}

/// Everything one session knows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub selected_language: Option<LanguageCode>,
    #[serde(flatten)]
    pub status: Status,
    pub generation: Generation,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            selected_language: None,
            status: Status::Idle,
            generation: Generation::default(),
        }
    }

    pub fn current_repo(&self) -> Option<&RepositoryRecord> {
        match &self.status {
            Status::Success(repo) => Some(repo),
            _ => None,
        }
    }

    pub fn error_detail(&self) -> Option<&SearchError> {
        match &self.status {
            Status::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, Status::Loading)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// What the user can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Pick a language, or clear the selection with `None`
    SelectLanguage(Option<LanguageCode>),
    /// Fetch again for the selected language (also how errors are retried)
    Refresh,
}

/// A search the machine wants issued, tagged with the generation it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: Generation,
    pub language: LanguageCode,
}

/// Result of feeding a fetch outcome back into the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The response was for an older generation (or nothing was loading)
    Discarded,
}
