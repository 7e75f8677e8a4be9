//! Request lifecycle of the search page: debounce, de-duplication and cancellation.
//!
//! The controller runs as an actor. [`SearchController`] is the handle views
//! talk to; the actor task owns the pending request, the cancellation token
//! of the running fetch and the key of the last completed search.

mod handle;
mod messages;
mod runner;
mod state;

pub use handle::{DEFAULT_DEBOUNCE, SearchController};
pub use state::{SearchPhase, SearchSnapshot, Settlement};
