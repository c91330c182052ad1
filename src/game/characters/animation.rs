// Per-character animation tables
//
// Each character has its own sprite sheet and its own frame table per
// state. Switching character swaps both at once.

use super::state::CharacterState;
use crate::engine::animation::Frame;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Frames and timing for one state
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDef {
    /// Frame rectangles in play order
    pub frames: Vec<Frame>,
    /// Time each frame stays visible
    pub frame_delay: Duration,
}

impl AnimationDef {
    /// Create an animation from explicit rectangles
    pub fn new<I>(frames: I, frame_delay_ms: u64) -> Self
    where
        I: IntoIterator<Item = (u32, u32, u32, u32)>,
    {
        Self {
            frames: frames.into_iter().map(Frame::from).collect(),
            frame_delay: Duration::from_millis(frame_delay_ms),
        }
    }

    /// Create a horizontal strip of `count` equally sized frames, `step` pixels apart
    pub fn strip(
        origin: (u32, u32),
        size: (u32, u32),
        step: u32,
        count: u32,
        frame_delay_ms: u64,
    ) -> Self {
        let (x, y) = origin;
        let (width, height) = size;
        Self::new(
            (0..count).map(|i| (x + i * step, y, width, height)),
            frame_delay_ms,
        )
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Duration of one full cycle
    pub fn total_duration(&self) -> Duration {
        self.frame_delay * self.frames.len() as u32
    }
}

/// Sprite sheet and per-state animations of one character
#[derive(Debug, Clone)]
pub struct CharacterAnimations {
    /// File name of the sheet, relative to the sprite directory
    spritesheet: &'static str,
    /// Animation per state name
    animations: HashMap<String, AnimationDef>,
}

/// Frame size shared by both sheets
const FRAME_SIZE: (u32, u32) = (48, 48);

/// Horizontal distance between neighboring frames
const FRAME_STEP: u32 = 52;

/// Row of the standing poses
const POSE_ROW: u32 = 33;

impl CharacterAnimations {
    pub fn new(spritesheet: &'static str) -> Self {
        Self {
            spritesheet,
            animations: HashMap::new(),
        }
    }

    /// Add the animation for a state
    pub fn with_animation(mut self, state: &str, animation: AnimationDef) -> Self {
        self.animations.insert(state.to_string(), animation);
        self
    }

    /// Get the animation registered for exactly this state
    pub fn get(&self, state: &str) -> Option<&AnimationDef> {
        self.animations.get(state)
    }

    /// Get the animation for a state, falling back to the idle animation
    pub fn animation_for(&self, state: &str) -> Option<&AnimationDef> {
        self.get(state)
            .or_else(|| self.get(CharacterState::default().as_str()))
    }

    pub fn spritesheet(&self) -> &'static str {
        self.spritesheet
    }

    /// Idle holds the first pose and blinks on the last of 20 frames
    fn idle_blink(frame_delay_ms: u64) -> AnimationDef {
        let stand = (8, POSE_ROW, FRAME_SIZE.0, FRAME_SIZE.1);
        let blink = (8 + FRAME_STEP, POSE_ROW, FRAME_SIZE.0, FRAME_SIZE.1);
        AnimationDef::new(
            std::iter::repeat(stand).take(19).chain(std::iter::once(blink)),
            frame_delay_ms,
        )
    }

    pub fn mario() -> Self {
        Self::new("Mario2.png")
            .with_animation("Idle", Self::idle_blink(500))
            .with_animation(
                "Walking",
                AnimationDef::strip((164, POSE_ROW), FRAME_SIZE, FRAME_STEP, 3, 150),
            )
            .with_animation(
                "Running",
                AnimationDef::strip((320, POSE_ROW), FRAME_SIZE, FRAME_STEP, 3, 80),
            )
            .with_animation("LookUp", AnimationDef::new([(112, POSE_ROW, 48, 48)], 500))
            .with_animation("Ducking", AnimationDef::new([(476, POSE_ROW, 48, 48)], 500))
    }

    pub fn luigi() -> Self {
        Self::new("Luigi.png")
            .with_animation("Idle", Self::idle_blink(450))
            .with_animation(
                "Walking",
                AnimationDef::strip((164, POSE_ROW), FRAME_SIZE, FRAME_STEP, 3, 130),
            )
            .with_animation(
                "Running",
                AnimationDef::strip((320, POSE_ROW), FRAME_SIZE, FRAME_STEP, 3, 70),
            )
            .with_animation("LookUp", AnimationDef::new([(112, POSE_ROW, 48, 48)], 500))
            .with_animation("Ducking", AnimationDef::new([(476, POSE_ROW, 48, 48)], 500))
    }
}

/// Playable character skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Character {
    #[default]
    Mario,
    Luigi,
}

impl Character {
    pub const ALL: [Self; 2] = [Self::Mario, Self::Luigi];

    /// Build the animation table for this character
    pub fn animations(&self) -> CharacterAnimations {
        match self {
            Self::Mario => CharacterAnimations::mario(),
            Self::Luigi => CharacterAnimations::luigi(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mario => "Mario",
            Self::Luigi => "Luigi",
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Character {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|character| character.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown character '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_state_has_animation() {
        for character in Character::ALL {
            let animations = character.animations();
            for state in CharacterState::ALL {
                let animation = animations.get(state.as_str()).unwrap();
                assert!(animation.frame_count() > 0, "{} {} is empty", character, state);
            }
        }
    }

    #[test]
    fn test_mario_walking_frames() {
        let animations = CharacterAnimations::mario();
        let walking = animations.get("Walking").unwrap();

        assert_eq!(
            walking.frames,
            vec![
                Frame::new(164, 33, 48, 48),
                Frame::new(216, 33, 48, 48),
                Frame::new(268, 33, 48, 48),
            ]
        );
        assert_eq!(walking.frame_delay, Duration::from_millis(150));
        assert_eq!(walking.total_duration(), Duration::from_millis(450));
    }

    #[test]
    fn test_idle_blinks_on_last_frame() {
        let idle = CharacterAnimations::mario().get("Idle").cloned().unwrap();
        assert_eq!(idle.frame_count(), 20);
        assert_eq!(idle.frames[18], Frame::new(8, 33, 48, 48));
        assert_eq!(idle.frames[19], Frame::new(60, 33, 48, 48));
    }

    #[test]
    fn test_unknown_state_falls_back_to_idle() {
        let animations = CharacterAnimations::mario();
        assert!(animations.get("Swimming").is_none());
        assert_eq!(animations.animation_for("Swimming"), animations.get("Idle"));
    }

    #[test]
    fn test_characters_use_own_sheet() {
        assert_eq!(Character::Mario.animations().spritesheet(), "Mario2.png");
        assert_eq!(Character::Luigi.animations().spritesheet(), "Luigi.png");
        assert_ne!(
            Character::Mario.animations().get("Running"),
            Character::Luigi.animations().get("Running")
        );
    }

    #[test]
    fn test_character_parse() {
        assert_eq!("luigi".parse::<Character>(), Ok(Character::Luigi));
        assert_eq!("Mario".parse::<Character>(), Ok(Character::Mario));
        assert!("peach".parse::<Character>().is_err());
    }
}
