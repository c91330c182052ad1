// Engine modules: assets, animation, state machine, timing

pub mod animation;
pub mod assets;
pub mod fsm;
pub mod game_loop;
pub mod timer;
