use anyhow::{Context, Result};
use clap::Parser;
use log::{info, trace, warn};
use std::collections::VecDeque;
use std::time::Duration;

use rusted_sprite_fsm::engine::assets::AssetLoader;
use rusted_sprite_fsm::engine::game_loop::GameLoop;
use rusted_sprite_fsm::engine::timer::IntervalTimer;
use rusted_sprite_fsm::game::characters::{CharacterController, CharacterState};

mod cli;

use crate::cli::Cli;

/// Time between two requested states given with --state
const COMMAND_INTERVAL: Duration = Duration::from_secs(1);

/// Sleep between frames of the headless loop (~60 FPS)
const FRAME_SLEEP: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger, RUST_LOG wins over the verbosity flags
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    info!("Starting Rusted Sprite FSM...");

    let loader = AssetLoader::new(&cli.assets);
    let mut controller = CharacterController::new(cli.character, loader);

    controller.set_state_listener(Box::new(|state| {
        info!(
            "State changed to: {}",
            state.map(CharacterState::as_str).unwrap_or("None")
        );
    }));
    controller.set_frame_listener(Box::new(|index, frame| {
        trace!("Frame {} ({}x{})", index, frame.width(), frame.height());
    }));

    if let Some(seed) = cli.seed {
        controller.seed_simulation(seed);
    }
    controller.set_simulating(cli.simulate);

    let mut pending: VecDeque<CharacterState> = cli.states.iter().copied().collect();
    let mut command_timer = IntervalTimer::new(COMMAND_INTERVAL);
    if !pending.is_empty() {
        command_timer.start(COMMAND_INTERVAL);
    }

    let mut switch_to = cli.switch_to;
    let run_for = cli
        .run_duration()
        .with_context(|| format!("Invalid run duration {}", cli.duration))?;
    let mut game_loop = GameLoop::new();
    let mut elapsed = Duration::ZERO;

    while elapsed < run_for {
        std::thread::sleep(FRAME_SLEEP);

        let steps = game_loop.begin_frame();
        for _ in 0..steps {
            controller.fixed_update();
        }

        let dt = game_loop.render_delta();
        elapsed += dt;

        for _ in 0..command_timer.advance(dt) {
            let Some(state) = pending.pop_front() else {
                command_timer.stop();
                break;
            };
            // Rejections are logged by the controller
            let _ = controller.change_state(state.as_str());
        }

        if elapsed >= run_for / 2 {
            if let Some(character) = switch_to.take() {
                // Failure is logged and the current character keeps playing
                let _ = controller.switch_character(character);
            }
        }

        controller.update(dt);
    }

    info!(
        "Finished as {} in state {} ({:.1}s), previous state {}",
        controller.character(),
        controller.current_state_name(),
        controller.time_in_state().as_secs_f32(),
        controller.previous_state_name()
    );

    if let Some(path) = &cli.dump_frame {
        match controller.animator().and_then(|animator| animator.current_frame()) {
            Some(frame) => {
                frame
                    .save(path)
                    .with_context(|| format!("Failed to write frame to {}", path.display()))?;
                info!("Wrote current frame to {}", path.display());
            }
            None => warn!("No visible frame to write"),
        }
    }

    Ok(())
}
