//! Configuration settings for the simulation engine

use crate::game_of_life::RuleSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub clock: ClockConfig,
    pub rules: RulesConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Milliseconds between timer-driven generations.
    pub tick_interval_ms: u64,
    /// Start paused instead of advancing immediately.
    pub start_paused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rule string in `B<digits>/S<digits>` form.
    pub rule: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Render cell ages instead of plain alive/dead glyphs.
    pub show_ages: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 50,
                height: 50,
            },
            clock: ClockConfig {
                tick_interval_ms: 500,
                start_paused: false,
            },
            rules: RulesConfig {
                rule: "B3/S23".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_ages: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width,
                self.grid.height
            );
        }

        if self.clock.tick_interval_ms == 0 {
            anyhow::bail!("Tick interval must be positive");
        }

        self.rules
            .rule
            .parse::<RuleSet>()
            .with_context(|| format!("Invalid rule string {:?}", self.rules.rule))?;

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(speed_ms) = cli_overrides.speed_ms {
            self.clock.tick_interval_ms = speed_ms;
        }
        if let Some(ref rule) = cli_overrides.rule {
            self.rules.rule = rule.clone();
        }
        if let Some(start_paused) = cli_overrides.start_paused {
            self.clock.start_paused = start_paused;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed_ms: Option<u64>,
    pub rule: Option<String>,
    pub start_paused: Option<bool>,
    pub format: Option<OutputFormat>,
}
