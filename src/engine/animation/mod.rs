// Sprite sheet animation: frame rectangles and the animator that cycles them

mod animator;
mod frame;

pub use animator::{FrameChangedCallback, SpriteAnimator, DEFAULT_FRAME_DELAY};
pub use frame::Frame;
