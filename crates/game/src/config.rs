//! Game configuration (galaxy seed, pacing, storage). Loaded from config.ron at startup.

use anyhow::Context;
use engine_core::Time;
use procgen::GalaxyConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::solar_system::SystemSettings;

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Master seed of the galaxy.
    #[serde(default = "default_galaxy_seed")]
    pub galaxy_seed: u32,
    /// Number of solar systems.
    #[serde(default = "default_system_count")]
    pub system_count: usize,
    /// Simulation ticks per second.
    #[serde(default = "default_tick_rate")]
    pub tick_rate: f64,
    /// Seconds the warp effect plays before the system swap.
    #[serde(default = "default_warp_duration")]
    pub warp_duration: f32,
    /// Seconds between automatic evolution stages.
    #[serde(default = "default_evolution_stage_seconds")]
    pub evolution_stage_seconds: f32,
    /// Seed of the cosmetic stream (belts, comets, moons). `None` uses entropy.
    #[serde(default)]
    pub cosmetic_seed: Option<u64>,
    /// Directory of the file-backed save store.
    #[serde(default = "default_save_dir")]
    pub save_dir: String,
    /// Length of a headless demo run in seconds.
    #[serde(default = "default_demo_seconds")]
    pub demo_seconds: f32,
}

fn default_galaxy_seed() -> u32 {
    42
}
fn default_system_count() -> usize {
    5
}
fn default_tick_rate() -> f64 {
    60.0
}
fn default_warp_duration() -> f32 {
    2.5
}
fn default_evolution_stage_seconds() -> f32 {
    8.0
}
fn default_save_dir() -> String {
    "saves".to_string()
}
fn default_demo_seconds() -> f32 {
    60.0
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            galaxy_seed: default_galaxy_seed(),
            system_count: default_system_count(),
            tick_rate: default_tick_rate(),
            warp_duration: default_warp_duration(),
            evolution_stage_seconds: default_evolution_stage_seconds(),
            cosmetic_seed: None,
            save_dir: default_save_dir(),
            demo_seconds: default_demo_seconds(),
        }
    }
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {:#}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> anyhow::Result<Self> {
        ron::from_str(data).context("parsing game config")
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        if let Ok(s) = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            if let Err(e) = std::fs::write(&path, s) {
                log::warn!("Could not write config to {:?}: {}", path, e);
            }
        }
    }

    pub fn galaxy(&self) -> GalaxyConfig {
        GalaxyConfig {
            system_count: self.system_count,
            seed: self.galaxy_seed,
        }
    }

    /// Evolution interval converted to ticks at the rate the clock actually runs.
    pub fn system_settings(&self) -> SystemSettings {
        let tick_rate = Time::with_tick_rate(self.tick_rate).tick_rate();
        let ticks = (self.evolution_stage_seconds.max(0.0) as f64 * tick_rate).round();
        SystemSettings {
            ticks_per_stage: ticks.clamp(0.0, u32::MAX as f64) as u32,
        }
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}
