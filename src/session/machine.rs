// src/session/machine.rs
// =============================================================================
// The session state machine.
//
// Transitions:
//   SelectLanguage(None)   any      -> Idle     (clears everything)
//   SelectLanguage(code)   any      -> Loading  (new generation, new fetch)
//   Refresh                selected -> Loading  (new generation, same language)
//   fetch g ok, non-empty  Loading  -> Success  (random pick)
//   fetch g ok, empty      Loading  -> Empty
//   fetch g failed         Loading  -> Error
//   fetch g stale                   -> unchanged
//
// The machine does no I/O. A transition that needs a search RETURNS a
// FetchRequest; whoever runs the machine performs the search and later calls
// `resolve` with the outcome and the generation it was tagged with.
// =============================================================================

use tracing::{debug, info, warn};

use super::select::RandomSelector;
use super::state::{FetchRequest, Intent, Resolution, SessionState, Status};
use crate::github::{LanguageCode, RepositoryRecord, SearchError};

#[derive(Debug)]
pub struct SessionMachine {
    state: SessionState,
    selector: RandomSelector,
}

impl SessionMachine {
    pub fn new(selector: RandomSelector) -> Self {
        Self {
            state: SessionState::new(),
            selector,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    /// Applies a user intent, returning the search to issue (if any)
    pub fn apply(&mut self, intent: Intent) -> Option<FetchRequest> {
        match intent {
            Intent::SelectLanguage(code) => self.select_language(code),
            Intent::Refresh => self.refresh(),
        }
    }

    pub fn select_language(&mut self, code: Option<LanguageCode>) -> Option<FetchRequest> {
        match code {
            None => {
                debug!("selection cleared");
                self.state.selected_language = None;
                self.state.status = Status::Idle;
                None
            }
            Some(code) => {
                self.state.selected_language = Some(code.clone());
                Some(self.start_fetch(code))
            }
        }
    }

    // Same as re-selecting the current language. Ignored when nothing is
    // selected, which can only happen while Idle.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        match self.state.selected_language.clone() {
            Some(code) => Some(self.start_fetch(code)),
            None => {
                debug!("refresh ignored: no language selected");
                None
            }
        }
    }

    /// Feeds back the outcome of the fetch tagged `request`.
    ///
    /// Only the fetch for the current generation may change state, and only
    /// while Loading. Anything else is dropped untouched.
    pub fn resolve(
        &mut self,
        request: &FetchRequest,
        outcome: Result<Vec<RepositoryRecord>, SearchError>,
    ) -> Resolution {
        if request.generation != self.state.generation || !self.state.is_loading() {
            debug!(
                stale = %request.generation,
                current = %self.state.generation,
                language = %request.language,
                "discarding stale search result"
            );
            return Resolution::Discarded;
        }

        self.state.status = match outcome {
            Ok(records) if records.is_empty() => {
                debug!(language = %request.language, "search returned no repositories");
                Status::Empty
            }
            Ok(records) => {
                let pick = self.selector.pick(&records).clone();
                debug!(
                    language = %request.language,
                    results = records.len(),
                    repo = %pick.name,
                    "picked repository"
                );
                Status::Success(pick)
            }
            Err(err) => {
                warn!(language = %request.language, error = %err, "search failed");
                Status::Error(err)
            }
        };

        Resolution::Applied
    }

    // Entering Loading drops whatever was shown before, so an old repo or
    // error never sits next to a loading indicator.
    fn start_fetch(&mut self, language: LanguageCode) -> FetchRequest {
        self.state.generation = self.state.generation.next();
        self.state.status = Status::Loading;

        info!(language = %language, generation = self.state.generation.value(), "searching");

        FetchRequest {
            generation: self.state.generation,
            language,
        }
    }
}
