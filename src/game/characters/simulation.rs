// Automatic state changes for demos

use crate::engine::fsm::TransitionGuard;
use crate::engine::timer::IntervalTimer;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::time::Duration;

/// Time between two automatic state changes
pub const ACTIVITY_INTERVAL: Duration = Duration::from_secs(3);

/// Picks random legal state changes on a fixed interval
#[derive(Debug)]
pub struct ActivitySimulator {
    rng: StdRng,
    timer: IntervalTimer,
}

impl Default for ActivitySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySimulator {
    /// Create a stopped simulator seeded from the OS
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    /// Create a stopped simulator with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            timer: IntervalTimer::new(ACTIVITY_INTERVAL),
        }
    }

    pub fn start(&mut self) {
        self.timer.start(ACTIVITY_INTERVAL);
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    /// Advance the interval timer, returns how many changes are due
    pub fn update(&mut self, dt: Duration) -> u32 {
        self.timer.advance(dt)
    }

    /// Pick the next state among `states` that the guard lets `current` move to
    ///
    /// Restricted states always go back to the default state. The default
    /// state may go anywhere else; other states pick among the unrestricted
    /// states other than themselves.
    pub fn pick_next<'a>(
        &mut self,
        guard: &TransitionGuard,
        states: &[&'a str],
        current: Option<&str>,
    ) -> Option<&'a str> {
        let default = guard.default_state();
        let find = |name: &str| states.iter().copied().find(|state| *state == name);

        let current = match current {
            Some(current) if !guard.is_restricted(current) => current,
            _ => return find(default),
        };

        let candidates: Vec<&'a str> = states
            .iter()
            .copied()
            .filter(|state| *state != current)
            .filter(|state| current == default || !guard.is_restricted(state))
            .collect();

        candidates.choose(&mut self.rng).copied()
    }
}
