// Transition guard table
//
// Restricted states are reachable only from the default state, and can
// only be left by going back to it. Everything else is unrestricted.

use super::FsmError;
use std::collections::HashSet;

/// Policy deciding which moves between named states are legal
#[derive(Debug, Clone)]
pub struct TransitionGuard {
    default_state: String,
    restricted: HashSet<String>,
}

impl TransitionGuard {
    /// Create a guard with no restricted states
    pub fn new(default_state: impl Into<String>) -> Self {
        Self {
            default_state: default_state.into(),
            restricted: HashSet::new(),
        }
    }

    /// Restrict a state to the default state
    pub fn with_restricted(mut self, name: impl Into<String>) -> Self {
        self.restrict(name);
        self
    }

    pub fn restrict(&mut self, name: impl Into<String>) {
        self.restricted.insert(name.into());
    }

    pub fn default_state(&self) -> &str {
        &self.default_state
    }

    pub fn is_restricted(&self, name: &str) -> bool {
        self.restricted.contains(name)
    }

    /// Check a move from `from` (none before the first transition) to `to`
    pub fn check(&self, from: Option<&str>, to: &str) -> Result<(), FsmError> {
        let from_default = from == Some(self.default_state.as_str());

        let entering_restricted = self.is_restricted(to) && !from_default;
        let leaving_restricted =
            from.is_some_and(|name| self.is_restricted(name)) && to != self.default_state;

        if entering_restricted || leaving_restricted {
            return Err(FsmError::TransitionRejected {
                from: from.unwrap_or("None").to_string(),
                to: to.to_string(),
            });
        }

        Ok(())
    }

    /// Check whether a move is legal without building an error
    pub fn allows(&self, from: Option<&str>, to: &str) -> bool {
        self.check(from, to).is_ok()
    }
}
