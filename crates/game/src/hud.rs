//! Per-frame snapshots for the presentation layer, and transient notifications.

use crate::evolution::EvolutionStage;
use crate::planet::Planet;
use crate::solar_system::SolarSystem;
use crate::state::GameState;

/// Everything the planet info panel shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetInfo {
    pub name: String,
    pub type_label: &'static str,
    pub distance: f32,
    pub size: f32,
    pub atmosphere: &'static str,
    pub status: &'static str,
    pub population: &'static str,
    pub ignited: bool,
    pub habitable: bool,
    pub evolving: bool,
    pub stage: EvolutionStage,
    pub moons: usize,
    pub has_rings: bool,
}

impl PlanetInfo {
    pub fn from_planet(planet: &Planet) -> Self {
        let stage = planet.evolution_stage();
        Self {
            name: planet.name().to_string(),
            type_label: planet.planet_type().label(),
            distance: planet.orbit_distance(),
            size: planet.size(),
            atmosphere: planet.planet_type().atmosphere_label(),
            status: planet.status_label(),
            population: stage.population_label(),
            ignited: planet.is_ignited(),
            habitable: planet.is_habitable(),
            evolving: planet.is_evolving(),
            stage,
            moons: planet.moons().len(),
            has_rings: planet.has_rings(),
        }
    }

    /// Distance line, e.g. `"20.4 AU"`.
    pub fn distance_label(&self) -> String {
        format!("{:.1} AU", self.distance)
    }

    /// Size line, e.g. `"1.25 Earth radii"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} Earth radii", self.size)
    }
}

/// Header describing the current system.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemInfo {
    pub name: String,
    pub star_label: &'static str,
    pub index: usize,
    pub total: usize,
    pub planets: usize,
    pub habitable: usize,
    pub transitioning: bool,
}

impl SystemInfo {
    pub fn new(system: &SolarSystem, index: usize, total: usize, transitioning: bool) -> Self {
        Self {
            name: system.name().to_string(),
            star_label: system.star().star_type.label(),
            index,
            total,
            planets: system.planets().len(),
            habitable: system.habitable_indices().len(),
            transitioning,
        }
    }

    /// `"System 2 / 5"`, one-based for display.
    pub fn position_label(&self) -> String {
        format!("System {} / {}", self.index + 1, self.total)
    }
}

/// Aggregate progress numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsInfo {
    pub ignited: u32,
    pub total_planets: u32,
    pub progress: u32,
    pub score: u64,
    pub playtime: String,
}

impl StatsInfo {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            ignited: state.ignited_count(),
            total_planets: state.total_planets(),
            progress: state.progress(),
            score: state.score(),
            playtime: state.playtime_label(),
        }
    }
}

/// Severity of a notification, which drives its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

impl MessageLevel {
    pub fn color(&self) -> [f32; 4] {
        match self {
            MessageLevel::Info => [1.0, 1.0, 1.0, 1.0],
            MessageLevel::Success => [0.3, 1.0, 0.3, 1.0],
            MessageLevel::Warning => [1.0, 0.9, 0.3, 1.0],
        }
    }
}

/// A transient on-screen notification.
#[derive(Debug, Clone)]
pub struct GameMessage {
    pub text: String,
    pub level: MessageLevel,
    pub time_remaining: f32,
}

/// Notification queue; messages expire after a few seconds.
#[derive(Debug, Clone)]
pub struct GameMessages {
    pub messages: Vec<GameMessage>,
    pub max_visible: usize,
    default_duration: f32,
}

impl Default for GameMessages {
    fn default() -> Self {
        Self::new()
    }
}

impl GameMessages {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            max_visible: 6,
            default_duration: 4.0,
        }
    }

    pub fn push(&mut self, text: impl Into<String>, level: MessageLevel) {
        self.messages.push(GameMessage {
            text: text.into(),
            level,
            time_remaining: self.default_duration,
        });
        if self.messages.len() > 50 {
            self.messages.remove(0);
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, MessageLevel::Info);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, MessageLevel::Success);
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.push(text, MessageLevel::Warning);
    }

    pub fn update(&mut self, dt: f32) {
        for msg in &mut self.messages {
            msg.time_remaining -= dt;
        }
        self.messages.retain(|m| m.time_remaining > 0.0);
    }

    /// Newest messages, up to `max_visible`.
    pub fn visible(&self) -> &[GameMessage] {
        let start = self.messages.len().saturating_sub(self.max_visible);
        &self.messages[start..]
    }

    pub fn latest(&self) -> Option<&GameMessage> {
        self.messages.last()
    }
}
