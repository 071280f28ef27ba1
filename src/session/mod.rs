// src/session/mod.rs
// =============================================================================
// This module holds everything about one user session.
//
// Submodules:
// - state: SessionState, Status, Generation, Intent
// - select: RandomSelector (uniform pick with an injectable random source)
// - machine: The transition function (no I/O)
// - driver: Async loop that runs searches and feeds results back
// =============================================================================

mod driver;
mod machine;
mod select;
mod state;

pub use driver::SessionDriver;
pub use select::RandomSelector;
pub use state::{Intent, SessionState, Status};
