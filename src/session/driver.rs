// src/session/driver.rs
// =============================================================================
// Runs a SessionMachine against a real (or scripted) search client.
//
// How it works:
// 1. Intents arrive on an mpsc channel, one at a time
// 2. A transition that returns a FetchRequest starts a search; the search
//    future goes into a FuturesUnordered so several can be in flight
// 3. Each finished search is fed back into the machine with the generation
//    it was started with; stale ones are dropped by the machine
// 4. Every state change is published on a watch channel for the UI
//
// Superseded searches are NOT cancelled on the network. They finish, and
// their result is thrown away.
//
// When the intent channel closes, the driver finishes the searches still in
// flight and returns the final state.
//
// Rust concepts:
// - tokio::select!: Wait on several async sources at once
// - FuturesUnordered: A set of futures polled together, yielding in
//   completion order
// - Arc: Shared ownership of the client across search futures
// =============================================================================

use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

use super::machine::SessionMachine;
use super::select::RandomSelector;
use super::state::{FetchRequest, Intent, Resolution, SessionState};
use crate::github::{RepositoryRecord, RepositorySearch, SearchError};

type Completion = (FetchRequest, Result<Vec<RepositoryRecord>, SearchError>);

pub struct SessionDriver<C> {
    client: Arc<C>,
    machine: SessionMachine,
    updates: watch::Sender<SessionState>,
}

impl<C> SessionDriver<C>
where
    C: RepositorySearch + 'static,
{
    pub fn new(client: Arc<C>, selector: RandomSelector) -> Self {
        let machine = SessionMachine::new(selector);
        let (updates, _) = watch::channel(machine.state().clone());
        Self {
            client,
            machine,
            updates,
        }
    }

    /// A receiver that sees every state the session goes through
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.updates.subscribe()
    }

    pub async fn run(mut self, mut intents: mpsc::Receiver<Intent>) -> SessionState {
        let mut in_flight: FuturesUnordered<BoxFuture<'static, Completion>> =
            FuturesUnordered::new();
        let mut accepting = true;

        while accepting || !in_flight.is_empty() {
            tokio::select! {
                // Finished searches go first, so a result that is already
                // available is reconciled before the next intent
                biased;

                Some((request, outcome)) = in_flight.next(), if !in_flight.is_empty() => {
                    if self.machine.resolve(&request, outcome) == Resolution::Applied {
                        self.publish();
                    }
                }

                intent = intents.recv(), if accepting => match intent {
                    Some(intent) => {
                        if let Some(request) = self.machine.apply(intent) {
                            in_flight.push(self.fetch(request));
                        }
                        self.publish();
                    }
                    None => {
                        tracing::debug!(pending = in_flight.len(), "intent channel closed");
                        accepting = false;
                    }
                },
            }
        }

        self.machine.into_state()
    }

    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Completion> {
        let client = Arc::clone(&self.client);
        Box::pin(async move {
            let outcome = client.search(&request.language).await;
            (request, outcome)
        })
    }

    // Wakes subscribers only when the state differs from the last one sent
    fn publish(&self) -> bool {
        let state = self.machine.state();
        self.updates.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        })
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why FuturesUnordered instead of tokio::spawn per search?
//    - The futures stay inside this task, so their results come straight
//      back to the one place that owns the state machine
//    - Nothing else ever touches SessionState; no locks needed
//
// 2. What does `biased;` do in select!?
//    - Branches are polled top to bottom instead of in random order
//    - A finished search is handled before the next queued intent
//
// 3. Why a watch channel for updates?
//    - Receivers only care about the LATEST state, not every step
//    - borrow_and_update() reads it and marks it as seen
// -----------------------------------------------------------------------------
