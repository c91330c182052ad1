// Character controller
//
// Ties the state machine to the sprite animator. Every accepted state
// change reloads the animator with the frame table of the new state for
// the current character.

use super::animation::{Character, CharacterAnimations};
use super::simulation::ActivitySimulator;
use super::state::CharacterState;
use crate::engine::animation::{FrameChangedCallback, SpriteAnimator};
use crate::engine::assets::{AssetError, AssetLoader};
use crate::engine::fsm::{
    ChangeOutcome, FsmError, StateChangeCallback, StateMachine, TransitionGuard,
};
use crate::engine::timer::IntervalTimer;
use log::{debug, info, warn};
use std::fmt;
use std::time::Duration;

/// Interval of the periodic `update` call on the active state
pub const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Drives one animated character
pub struct CharacterController {
    machine: StateMachine<CharacterState>,
    guard: TransitionGuard,
    /// Missing when the sprite sheet could not be loaded
    animator: Option<SpriteAnimator>,
    /// Frame listener waiting for an animator to exist
    pending_frame_listener: Option<FrameChangedCallback>,
    loader: AssetLoader,
    character: Character,
    animations: CharacterAnimations,
    refresh_timer: IntervalTimer,
    simulator: ActivitySimulator,
    time_in_state: Duration,
}

impl CharacterController {
    /// Create a controller, loading the character's sprite sheet through `loader`
    ///
    /// A sheet that fails to load is logged and the controller runs without
    /// a sprite.
    pub fn new(character: Character, loader: AssetLoader) -> Self {
        let animations = character.animations();
        let animator = match loader.load_spritesheet(animations.spritesheet()) {
            Ok(sheet) => Some(SpriteAnimator::from_sheet(sheet)),
            Err(err) => {
                warn!("Failed to initialize sprite animator: {}", err);
                None
            }
        };

        Self::with_animator(character, loader, animator)
    }

    /// Create a controller around an existing animator (or none)
    pub fn with_animator(
        character: Character,
        loader: AssetLoader,
        animator: Option<SpriteAnimator>,
    ) -> Self {
        let mut machine = StateMachine::new();
        if let Err(err) = machine.add_states(CharacterState::ALL) {
            warn!("Failed to register character states: {}", err);
        }

        let mut refresh_timer = IntervalTimer::new(REFRESH_INTERVAL);
        refresh_timer.start(REFRESH_INTERVAL);

        let mut controller = Self {
            machine,
            guard: CharacterState::transition_guard(),
            animator,
            pending_frame_listener: None,
            loader,
            character,
            animations: character.animations(),
            refresh_timer,
            simulator: ActivitySimulator::new(),
            time_in_state: Duration::ZERO,
        };

        match controller.machine.initialize() {
            Ok(_) => controller.apply_animation(),
            Err(err) => warn!("Failed to enter the initial state: {}", err),
        }

        controller
    }

    /// Register the state change listener
    ///
    /// It runs after the new state's `on_enter` and before the animator is
    /// reconfigured.
    pub fn set_state_listener(&mut self, callback: StateChangeCallback<CharacterState>) {
        self.machine.set_on_state_change(callback);
    }

    /// Register the frame listener
    ///
    /// Without an animator the listener is kept until a character switch
    /// creates one.
    pub fn set_frame_listener(&mut self, callback: FrameChangedCallback) {
        match self.animator.as_mut() {
            Some(animator) => animator.set_on_frame_changed(callback),
            None => self.pending_frame_listener = Some(callback),
        }
    }

    /// Request a state change by name
    ///
    /// The guard runs first; a rejected or unknown state leaves everything
    /// as it was.
    pub fn change_state(&mut self, name: &str) -> Result<ChangeOutcome, FsmError> {
        let from = self.machine.current_name();
        if let Err(err) = self.guard.check(from, name) {
            warn!(
                "{}: restricted states only move to and from {}",
                err,
                self.guard.default_state()
            );
            return Err(err);
        }

        let outcome = self.machine.change_state(name).inspect_err(|err| {
            warn!("{}", err);
        })?;

        if let ChangeOutcome::Changed { .. } = &outcome {
            self.time_in_state = Duration::ZERO;
            self.apply_animation();
        }

        Ok(outcome)
    }

    /// Swap sprite sheet and frame tables for another character
    ///
    /// On failure the previous character keeps playing.
    pub fn switch_character(&mut self, character: Character) -> Result<(), AssetError> {
        let animations = character.animations();
        let sheet = self
            .loader
            .load_spritesheet(animations.spritesheet())
            .inspect_err(|err| warn!("Failed to switch sprite: {}", err))?;

        match self.animator.as_mut() {
            Some(animator) => animator.set_spritesheet(sheet),
            None => {
                let mut animator = SpriteAnimator::from_sheet(sheet);
                if let Some(callback) = self.pending_frame_listener.take() {
                    animator.set_on_frame_changed(callback);
                }
                self.animator = Some(animator);
            }
        }

        self.character = character;
        self.animations = animations;
        self.apply_animation();

        info!("Switched to {} sprite", character);
        Ok(())
    }

    /// Advance every timer by `dt`
    pub fn update(&mut self, dt: Duration) {
        if let Some(animator) = self.animator.as_mut() {
            animator.update(dt);
        }

        self.time_in_state += dt;

        for _ in 0..self.refresh_timer.advance(dt) {
            self.machine.update_active_state();
        }

        for _ in 0..self.simulator.update(dt) {
            self.simulate_step();
        }
    }

    /// Run `update` on the active state right away
    pub fn update_active_state(&mut self) {
        self.machine.update_active_state();
        debug!("Update() called on state: {}", self.current_state_name());
    }

    /// Run `fixed_update` on the active state
    pub fn fixed_update(&mut self) {
        self.machine.fixed_update_active_state();
    }

    /// Replace the simulator's random source with a seeded one
    pub fn seed_simulation(&mut self, seed: u64) {
        let running = self.simulator.is_running();
        self.simulator = ActivitySimulator::with_seed(seed);
        if running {
            self.simulator.start();
        }
    }

    pub fn set_simulating(&mut self, enabled: bool) {
        if enabled == self.simulator.is_running() {
            return;
        }

        if enabled {
            info!("Started automatic state simulation");
            self.simulator.start();
        } else {
            info!("Stopped automatic state simulation");
            self.simulator.stop();
        }
    }

    /// Toggle the simulation, returns whether it is now running
    pub fn toggle_simulation(&mut self) -> bool {
        self.set_simulating(!self.simulator.is_running());
        self.simulator.is_running()
    }

    pub fn is_simulating(&self) -> bool {
        self.simulator.is_running()
    }

    fn simulate_step(&mut self) {
        let names = self.machine.state_names();
        let next = self
            .simulator
            .pick_next(&self.guard, &names, self.machine.current_name())
            .map(str::to_string);

        if let Some(next) = next {
            info!("Automatic transition to {}", next);
            // Failures are already logged by change_state
            let _ = self.change_state(&next);
        }
    }

    /// Reload the animator with the current state's animation
    fn apply_animation(&mut self) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };

        animator.stop();
        animator.clear_frames();

        let state = self
            .machine
            .current_name()
            .unwrap_or(self.guard.default_state());

        match self.animations.animation_for(state) {
            Some(animation) => {
                animator.add_frames(animation.frames.iter().copied());
                animator.set_frame_delay(animation.frame_delay);
            }
            None => warn!("No animation for {} on {}", state, self.character),
        }

        animator.play();
    }

    /// Name of the active state, "None" before the first transition
    pub fn current_state_name(&self) -> &str {
        self.machine.current_name().unwrap_or("None")
    }

    pub fn previous_state_name(&self) -> &str {
        self.machine.previous_name().unwrap_or("None")
    }

    pub fn current_state(&self) -> Option<CharacterState> {
        self.machine.current().copied()
    }

    pub fn time_in_state(&self) -> Duration {
        self.time_in_state
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn animator(&self) -> Option<&SpriteAnimator> {
        self.animator.as_ref()
    }

    pub fn guard(&self) -> &TransitionGuard {
        &self.guard
    }

    /// Registered state names in registration order
    pub fn available_states(&self) -> Vec<&str> {
        self.machine.state_names()
    }

    pub fn state_count(&self) -> usize {
        self.machine.state_count()
    }
}

impl fmt::Debug for CharacterController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterController")
            .field("character", &self.character)
            .field("machine", &self.machine)
            .field("animator", &self.animator)
            .field("time_in_state", &self.time_in_state)
            .field("simulating", &self.is_simulating())
            .finish()
    }
}
