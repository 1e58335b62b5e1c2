//! Command-line options and configuration file loading.

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use danger_noodle_core::{Direction, GameConfig};
use danger_noodle_rendering::Palette;
use serde::Deserialize;

/// Runs a game of Danger Noodle in the terminal.
#[derive(Parser, Debug)]
#[command(
    name = "danger-noodle",
    version,
    about = "Play a scripted game of Danger Noodle in the terminal"
)]
pub(crate) struct CliArgs {
    /// TOML file with `[game]` and `[palette]` sections.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Number of columns on the board.
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Number of rows on the board.
    #[arg(long)]
    pub(crate) height: Option<u32>,
    /// Kill the snake when it leaves the board instead of wrapping around.
    /// Pass `--solid-walls=false` to override a config file that enables them.
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub(crate) solid_walls: Option<bool>,
    /// Interval between ticks in milliseconds.
    #[arg(long, value_name = "MS")]
    pub(crate) tick_ms: Option<u64>,
    /// Number of segments the snake starts with.
    #[arg(long)]
    pub(crate) initial_length: Option<u32>,
    /// Heading at spawn (up, down, left or right).
    #[arg(long)]
    pub(crate) heading: Option<Direction>,
    /// Seed for apple placement and random headings.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Steering letters consumed one per tick: u, d, l, r, or `.` for none.
    #[arg(long, value_name = "LETTERS")]
    pub(crate) script: Option<String>,
    /// Stop the game after this many ticks.
    #[arg(long, default_value_t = 500)]
    pub(crate) max_ticks: u64,
    /// Wait out each tick interval instead of running as fast as possible.
    #[arg(long)]
    pub(crate) realtime: bool,
    /// Print every frame as text.
    #[arg(long)]
    pub(crate) frames: bool,
}

/// Contents of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FileConfig {
    pub(crate) game: GameConfig,
    pub(crate) palette: Palette,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file at {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("invalid config toml")
    }
}

impl CliArgs {
    /// Merges the configuration file with command-line overrides.
    pub(crate) fn resolve(&self) -> Result<FileConfig> {
        let mut file = match &self.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        self.apply_overrides(&mut file.game);
        Ok(file)
    }

    fn apply_overrides(&self, game: &mut GameConfig) {
        if let Some(width) = self.width {
            game.width = width;
        }
        if let Some(height) = self.height {
            game.height = height;
        }
        if let Some(solid_walls) = self.solid_walls {
            game.solid_walls = solid_walls;
        }
        if let Some(tick_ms) = self.tick_ms {
            game.tick_duration_ms = tick_ms;
        }
        if let Some(length) = self.initial_length {
            game.initial_snake_length = length;
        }
        if self.heading.is_some() {
            game.initial_heading = self.heading;
        }
        if self.seed.is_some() {
            game.seed = self.seed;
        }
    }
}
