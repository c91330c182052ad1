// Finite state machine
//
// Named states with lifecycle hooks, a machine that switches between them,
// and a data-driven guard that restricts which moves are legal.

mod guard;
mod machine;
mod state;

pub use guard::TransitionGuard;
pub use machine::{ChangeOutcome, StateChangeCallback, StateId, StateMachine};
pub use state::State;

/// State machine errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FsmError {
    #[error("State already registered: {0}")]
    DuplicateState(String),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("No state registered for handle {0}")]
    InvalidHandle(usize),

    #[error("Cannot transition from {from} to {to}")]
    TransitionRejected { from: String, to: String },
}
