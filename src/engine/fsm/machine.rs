// State registry and transitions

use super::{FsmError, State};
use std::fmt;

/// Handle to a registered state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(usize);

impl StateId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Result of a successful `change_state` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The machine moved to a new state
    Changed { from: Option<String>, to: String },
    /// The requested state was already active, nothing ran
    Unchanged,
}

/// Listener called with the newly active state after `on_enter` completes
pub type StateChangeCallback<S> = Box<dyn FnMut(Option<&S>)>;

/// Owns a set of named states and tracks which one is active
pub struct StateMachine<S: State> {
    /// Registered states in insertion order
    states: Vec<S>,
    current: Option<usize>,
    previous: Option<usize>,
    on_state_change: Option<StateChangeCallback<S>>,
}

impl<S: State> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateMachine<S> {
    pub fn new() -> Self {
        Self {
            states: Vec::new(),
            current: None,
            previous: None,
            on_state_change: None,
        }
    }

    /// Register the change listener, replacing any previous one
    pub fn set_on_state_change(&mut self, callback: StateChangeCallback<S>) {
        self.on_state_change = Some(callback);
    }

    /// Register a single state
    pub fn add_state(&mut self, state: S) -> Result<StateId, FsmError> {
        let mut ids = self.add_states([state])?;
        ids.pop().ok_or_else(|| FsmError::InvalidHandle(self.states.len()))
    }

    /// Register several states at once
    ///
    /// Names are checked before anything is inserted: a collision with a
    /// registered state or inside the batch rejects the whole batch.
    pub fn add_states<I>(&mut self, states: I) -> Result<Vec<StateId>, FsmError>
    where
        I: IntoIterator<Item = S>,
    {
        let batch: Vec<S> = states.into_iter().collect();

        for (i, state) in batch.iter().enumerate() {
            let name = state.name();
            let repeated = batch[..i].iter().any(|other| other.name() == name);
            if repeated || self.contains(name) {
                log::warn!("Refusing to register duplicate state {}", name);
                return Err(FsmError::DuplicateState(name.to_string()));
            }
        }

        let start = self.states.len();
        self.states.extend(batch);
        Ok((start..self.states.len()).map(StateId).collect())
    }

    /// Change to the state registered under `name`
    pub fn change_state(&mut self, name: &str) -> Result<ChangeOutcome, FsmError> {
        let id = self
            .find(name)
            .ok_or_else(|| FsmError::UnknownState(name.to_string()))?;
        self.transition(id.0)
    }

    /// Change to the state behind a handle
    pub fn change_state_to(&mut self, id: StateId) -> Result<ChangeOutcome, FsmError> {
        if id.0 >= self.states.len() {
            return Err(FsmError::InvalidHandle(id.0));
        }
        self.transition(id.0)
    }

    /// Activate the first registered state
    pub fn initialize(&mut self) -> Result<ChangeOutcome, FsmError> {
        match self.default_state() {
            Some(id) => self.change_state_to(id),
            None => Ok(ChangeOutcome::Unchanged),
        }
    }

    /// Run `update` on the active state
    pub fn update_active_state(&mut self) {
        if let Some(index) = self.current {
            self.states[index].update();
        }
    }

    /// Run `fixed_update` on the active state
    pub fn fixed_update_active_state(&mut self) {
        if let Some(index) = self.current {
            self.states[index].fixed_update();
        }
    }

    fn transition(&mut self, next: usize) -> Result<ChangeOutcome, FsmError> {
        if self.current == Some(next) {
            log::debug!("Already in state {}", self.states[next].name());
            return Ok(ChangeOutcome::Unchanged);
        }

        let from = self.current.map(|index| self.states[index].name().to_string());
        if let Some(index) = self.current {
            self.states[index].on_exit();
        }

        self.previous = self.current;
        self.current = Some(next);
        self.states[next].on_enter();

        if let Some(callback) = self.on_state_change.as_mut() {
            callback(self.states.get(next));
        }

        let to = self.states[next].name().to_string();
        log::info!(
            "State changed: {} -> {}",
            from.as_deref().unwrap_or("None"),
            to
        );

        Ok(ChangeOutcome::Changed { from, to })
    }

    /// Look up a state handle by name
    pub fn find(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|state| state.name() == name)
            .map(StateId)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn get(&self, id: StateId) -> Option<&S> {
        self.states.get(id.0)
    }

    /// The first registered state, used for initialization
    pub fn default_state(&self) -> Option<StateId> {
        (!self.states.is_empty()).then_some(StateId(0))
    }

    pub fn current(&self) -> Option<&S> {
        self.current.map(|index| &self.states[index])
    }

    pub fn current_id(&self) -> Option<StateId> {
        self.current.map(StateId)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current().map(|state| state.name())
    }

    pub fn previous_name(&self) -> Option<&str> {
        self.previous.map(|index| self.states[index].name())
    }

    /// Registered states in insertion order
    pub fn states(&self) -> &[S] {
        &self.states
    }

    pub fn state_names(&self) -> Vec<&str> {
        self.states.iter().map(|state| state.name()).collect()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}

impl<S: State> fmt::Debug for StateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.state_names())
            .field("current", &self.current_name())
            .field("previous", &self.previous_name())
            .finish()
    }
}
