//! Command line options

use clap::Parser;
use rusted_sprite_fsm::game::characters::{Character, CharacterState};
use std::path::PathBuf;
use std::time::{Duration, TryFromFloatSecsError};

#[derive(Parser, Debug)]
#[command(name = "rusted-sprite-fsm")]
#[command(about = "Drives an animated character through its state machine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the sprites/ folder
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Character skin to start with (mario or luigi)
    #[arg(long, default_value = "mario")]
    pub character: Character,

    /// Seconds to run before exiting
    #[arg(long, default_value_t = 10.0)]
    pub duration: f32,

    /// Change state randomly every few seconds
    #[arg(long)]
    pub simulate: bool,

    /// Seed for the simulation
    #[arg(long)]
    pub seed: Option<u64>,

    /// State to request, one per second in the given order (repeatable)
    #[arg(long = "state", value_name = "STATE")]
    pub states: Vec<CharacterState>,

    /// Switch to this character halfway through the run
    #[arg(long, value_name = "CHARACTER")]
    pub switch_to: Option<Character>,

    /// Write the visible frame to this PNG before exiting
    #[arg(long, value_name = "PATH")]
    pub dump_frame: Option<PathBuf>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Run length from --duration, negative values run zero seconds
    pub fn run_duration(&self) -> Result<Duration, TryFromFloatSecsError> {
        Duration::try_from_secs_f32(self.duration.max(0.0))
    }

    /// Log level picked from the verbosity flags
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }

        match self.verbose {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["rusted-sprite-fsm"]);
        assert_eq!(cli.assets, PathBuf::from("assets"));
        assert_eq!(cli.character, Character::Mario);
        assert!(!cli.simulate);
        assert!(cli.states.is_empty());
        assert_eq!(cli.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn test_states_and_character() {
        let cli = Cli::parse_from([
            "rusted-sprite-fsm",
            "--character",
            "luigi",
            "--state",
            "LookUp",
            "--state",
            "Idle",
            "-vv",
        ]);
        assert_eq!(cli.character, Character::Luigi);
        assert_eq!(cli.states, vec![CharacterState::LookUp, CharacterState::Idle]);
        assert_eq!(cli.log_level(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_unknown_state_rejected() {
        let result = Cli::try_parse_from(["rusted-sprite-fsm", "--state", "Swimming"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_run_duration() {
        let cli = Cli::parse_from(["rusted-sprite-fsm", "--duration", "2.5"]);
        assert_eq!(cli.run_duration(), Ok(Duration::from_millis(2500)));

        let cli = Cli::parse_from(["rusted-sprite-fsm", "--duration=-3"]);
        assert_eq!(cli.run_duration(), Ok(Duration::ZERO));

        let cli = Cli::parse_from(["rusted-sprite-fsm", "--duration", "inf"]);
        assert!(cli.run_duration().is_err());
    }
}
