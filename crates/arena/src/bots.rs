//! Bot presets and the optional TOML bot file.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::Path;
use uct_mcts::UctConfig;

/// Named search configurations selectable on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Plain UCB1 on a 0/0.5/1 scale, most visited move.
    Vanilla,
    /// Turn-aware tactical UCB1 on box differential, best scoring move.
    Modified,
}

impl Preset {
    pub fn config(self) -> UctConfig {
        match self {
            Preset::Vanilla => UctConfig::vanilla(),
            Preset::Modified => UctConfig::modified(),
        }
    }
}

/// Contents of a bot file. Each present table replaces that side's preset;
/// fields missing from a table take their defaults.
///
/// ```toml
/// [red]
/// heuristic = "heuristic_adjusted"
/// budget = { time_seconds = 2.5 }
///
/// [blue]
/// exploration_constant = 1.4
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotsFile {
    pub red: Option<UctConfig>,
    pub blue: Option<UctConfig>,
}

impl BotsFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bot file {:?}", path))?;
        Self::parse(&text).with_context(|| format!("Invalid bot file {:?}", path))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
