// Character system
//
// This module contains everything related to the animated character:
// - The states the character can be in
// - Per-character sprite sheets and frame tables
// - The controller tying state changes to the animator
// - Automatic state changes for demos

pub mod animation;
pub mod controller;
pub mod simulation;
pub mod state;

// Re-export commonly used types
pub use animation::{AnimationDef, Character, CharacterAnimations};
pub use controller::CharacterController;
pub use simulation::ActivitySimulator;
pub use state::CharacterState;
