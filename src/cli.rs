//! Command-line arguments for the `connect4` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::eval::Heuristic;

/// Play Connect Four against a minimax engine.
#[derive(Parser, Debug)]
#[command(name = "connect4", version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, short = 'c', default_value = "connect4.toml")]
    pub config: PathBuf,

    /// Search depth in plies (overrides the config file)
    #[arg(long, short = 'd')]
    pub depth: Option<u8>,

    /// Leaf evaluation (overrides the config file)
    #[arg(long, value_enum)]
    pub heuristic: Option<Heuristic>,

    /// Per-move search time limit in milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Let the machine drop the first piece
    #[arg(long)]
    pub machine_first: bool,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

/// Presentation shell
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Desktop window
    #[default]
    Gui,
    /// Line-oriented terminal game
    Text,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(depth) = self.depth {
            config.engine.depth = depth;
        }
        if let Some(heuristic) = self.heuristic {
            config.engine.heuristic = heuristic;
        }
        if let Some(limit) = self.time_limit_ms {
            config.engine.time_limit_ms = Some(limit);
        }
        if self.machine_first {
            config.session.machine_first = true;
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode.unwrap_or_default()
    }
}
