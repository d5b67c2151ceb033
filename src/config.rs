use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// 2048 in the terminal.
///
/// Slide with the arrow keys, Esc starts a new game once the board is stuck,
/// q quits.  Log verbosity follows `RUST_LOG`.
#[derive(Parser, Debug, Clone)]
#[command(name = "tui-2048", version, about)]
pub struct Config {
    /// Seed for reproducible games; session `n` uses `seed + n`.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames (input polls) per second.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub fps: u32,

    /// Where to write the log instead of the per-user data directory.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Length of one game-loop tick.
    pub fn tick(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed: None,
            fps: 30,
            log_file: None,
        }
    }
}
