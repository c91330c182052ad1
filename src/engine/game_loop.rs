/// Game loop timing and control
///
/// A fixed timestep accumulator with a variable render delta. The fixed
/// steps drive the `fixed_update` hooks of the state machine, the render
/// delta drives every interval timer (sprite frames, UI refresh, activity
/// simulation).
use std::time::{Duration, Instant};

/// Fixed update rate (60 updates per second)
pub const FIXED_TIMESTEP: Duration = Duration::from_micros(16_667);

/// Maximum number of fixed steps per frame to prevent spiral of death
const MAX_FIXED_STEPS: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed steps
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Whether the loop is paused
    paused: bool,

    /// Frames processed so far
    frame_count: u64,

    /// Fixed steps handed out so far
    update_count: u64,

    /// Time covered by the last frame
    render_delta: Duration,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            update_count: 0,
            render_delta: Duration::ZERO,
        }
    }

    /// Begin a new frame using the wall clock, returns the number of fixed steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Begin a new frame covering `frame_time`, returns the number of fixed steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        if self.paused {
            self.render_delta = Duration::ZERO;
            return 0;
        }

        self.render_delta = frame_time;
        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP && steps < MAX_FIXED_STEPS {
            self.accumulator -= FIXED_TIMESTEP;
            steps += 1;
        }

        // Whatever is left after the cap is dropped
        if steps == MAX_FIXED_STEPS && self.accumulator >= FIXED_TIMESTEP {
            log::debug!("Dropping {:?} of fixed update backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.update_count += steps as u64;
        steps
    }

    /// Get the time covered by the last frame (zero while paused)
    pub fn render_delta(&self) -> Duration {
        self.render_delta
    }

    /// Get total number of frames processed
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of fixed steps handed out
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if the loop is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the loop
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game loop paused");
        }
    }

    /// Resume the loop
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            self.last_frame_time = Instant::now();
            log::info!("Game loop resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
