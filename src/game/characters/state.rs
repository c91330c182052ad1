// Character states

use crate::engine::fsm::{State, TransitionGuard};
use std::fmt;
use std::str::FromStr;

/// The poses a character can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterState {
    /// Standing still, the default state
    Idle,
    /// Moving at walking pace
    Walking,
    /// Moving fast
    Running,
    /// Looking up, only reachable from Idle
    LookUp,
    /// Crouching, only reachable from Idle
    Ducking,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::Idle
    }
}

impl CharacterState {
    /// Every state in registration order, the first one is the default
    pub const ALL: [Self; 5] = [
        Self::Idle,
        Self::Walking,
        Self::Running,
        Self::LookUp,
        Self::Ducking,
    ];

    /// Name used to register and look up the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Walking => "Walking",
            Self::Running => "Running",
            Self::LookUp => "LookUp",
            Self::Ducking => "Ducking",
        }
    }

    /// Human readable name for log output
    pub fn label(&self) -> &'static str {
        match self {
            Self::LookUp => "Look Up",
            other => other.as_str(),
        }
    }

    /// Check if the state may only be entered from and left to Idle
    pub fn is_restricted(&self) -> bool {
        matches!(self, Self::LookUp | Self::Ducking)
    }

    /// Build the guard matching `is_restricted`
    pub fn transition_guard() -> TransitionGuard {
        Self::ALL
            .iter()
            .filter(|state| state.is_restricted())
            .fold(TransitionGuard::new(Self::default().as_str()), |guard, state| {
                guard.with_restricted(state.as_str())
            })
    }
}

impl State for CharacterState {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn on_enter(&mut self) {
        log::info!("Entered {} State", self.label());
    }

    fn on_exit(&mut self) {
        log::info!("Exited {} State", self.label());
    }

    fn update(&mut self) {
        log::debug!("Update() called on state: {}", self.as_str());
    }
}

impl fmt::Display for CharacterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| format!("unknown state '{}'", s))
    }
}
