// Rusted Sprite FSM
//
// A character animation driver: a guarded state machine whose active state
// picks the frame sequence a sprite sheet animator plays.

pub mod engine;
pub mod game;
