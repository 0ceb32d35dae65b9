//! Planet entity: generated identity, circular orbit, moons, and the life cycle.

use glam::Vec3;
use procgen::{CircularOrbit, OrbitingBody, PlanetConfig, PlanetType};
use rand::Rng;

use crate::evolution::{EvolutionStage, Lifecycle};

/// A small body circling its planet. Purely cosmetic.
#[derive(Debug, Clone)]
pub struct Moon {
    /// Orbit relative to the parent planet's center.
    pub orbit: CircularOrbit,
    pub size: f32,
    pub color: Vec3,
}

impl Moon {
    fn generate<R: Rng>(parent: &PlanetConfig, index: usize, rng: &mut R) -> Self {
        let distance = parent.size * 2.0 + 1.0 + index as f32 * 1.2 + rng.gen::<f32>() * 0.5;
        let speed = 0.03 + rng.gen::<f32>() * 0.03;
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let tilt = (rng.gen::<f32>() - 0.5) * 0.4;
        let grey = 0.55 + rng.gen::<f32>() * 0.3;
        Self {
            orbit: CircularOrbit::new(distance, speed, angle).with_height(tilt),
            size: (parent.size * (0.15 + rng.gen::<f32>() * 0.15)).max(0.08),
            color: Vec3::splat(grey),
        }
    }
}

/// Maximum moons by type.
fn max_moons(planet_type: PlanetType) -> usize {
    match planet_type {
        PlanetType::GasGiant => 3,
        PlanetType::IceGiant => 2,
        PlanetType::EarthLike | PlanetType::Ocean | PlanetType::Rocky | PlanetType::MarsLike => 1,
        _ => 0,
    }
}

/// A celestial body owned by a solar system.
#[derive(Debug, Clone)]
pub struct Planet {
    config: PlanetConfig,
    orbit: CircularOrbit,
    lifecycle: Lifecycle,
    moons: Vec<Moon>,
    /// Self-rotation angle (radians) and rate per tick.
    rotation: f32,
    rotation_speed: f32,
    /// Ticks spent evolving since the last stage change.
    evolution_ticks: u32,
    /// Ticks between automatic stage advances; 0 disables auto-advance.
    ticks_per_stage: u32,
    visible: bool,
    pub selected: bool,
}

impl Planet {
    /// Build the entity from its generated config. Moons and spin come from the
    /// cosmetic stream.
    pub fn from_config<R: Rng>(config: PlanetConfig, ticks_per_stage: u32, rng: &mut R) -> Self {
        let moon_count = match max_moons(config.planet_type) {
            0 => 0,
            max => rng.gen_range(0..=max),
        };
        let moons = (0..moon_count)
            .map(|i| Moon::generate(&config, i, rng))
            .collect();
        let rotation_speed = 0.005 + rng.gen::<f32>() * 0.02;

        Self {
            orbit: CircularOrbit::new(config.orbit_distance, config.orbit_speed, config.orbit_angle),
            lifecycle: Lifecycle::new(config.is_habitable),
            moons,
            rotation: 0.0,
            rotation_speed,
            evolution_ticks: 0,
            ticks_per_stage,
            visible: false,
            selected: false,
            config,
        }
    }

    /// Advance one tick: orbit, spin, moons, then automatic evolution. Returns the new
    /// stage when this tick advanced it.
    pub fn update(&mut self) -> Option<EvolutionStage> {
        self.orbit.advance();
        self.rotation += self.rotation_speed;
        for moon in &mut self.moons {
            moon.orbit.advance();
        }

        if !self.lifecycle.is_evolving() || self.ticks_per_stage == 0 {
            return None;
        }
        self.evolution_ticks += 1;
        if self.evolution_ticks < self.ticks_per_stage {
            return None;
        }
        self.evolution_ticks = 0;
        self.advance_evolution()
    }

    pub fn config(&self) -> &PlanetConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn planet_type(&self) -> PlanetType {
        self.config.planet_type
    }

    pub fn orbit_distance(&self) -> f32 {
        self.config.orbit_distance
    }

    pub fn size(&self) -> f32 {
        self.config.size
    }

    pub fn base_color(&self) -> Vec3 {
        self.config.base_color
    }

    pub fn has_rings(&self) -> bool {
        self.config.has_rings
    }

    pub fn orbit(&self) -> &CircularOrbit {
        &self.orbit
    }

    pub fn orbit_angle(&self) -> f32 {
        self.orbit.angle
    }

    pub fn position(&self) -> Vec3 {
        self.orbit.position()
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn moons(&self) -> &[Moon] {
        &self.moons
    }

    /// World position of moon `index` (star at the origin).
    pub fn moon_position(&self, index: usize) -> Option<Vec3> {
        self.moons
            .get(index)
            .map(|moon| self.position() + moon.orbit.position())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.selected = false;
        }
    }

    // ── Lifecycle ──────────────────────────────────────────────────────────

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    pub fn is_habitable(&self) -> bool {
        self.lifecycle.is_habitable()
    }

    pub fn is_ignited(&self) -> bool {
        self.lifecycle.is_ignited()
    }

    pub fn is_evolving(&self) -> bool {
        self.lifecycle.is_evolving()
    }

    pub fn evolution_stage(&self) -> EvolutionStage {
        self.lifecycle.stage()
    }

    pub fn can_evolve(&self) -> bool {
        self.lifecycle.can_evolve()
    }

    pub fn start_evolution(&mut self) -> bool {
        let started = self.lifecycle.start();
        if started {
            self.evolution_ticks = 0;
            log::info!("Life seeded on {}", self.config.name);
        }
        started
    }

    pub fn advance_evolution(&mut self) -> Option<EvolutionStage> {
        let stage = self.lifecycle.advance()?;
        log::info!("{} evolved to {}", self.config.name, stage.label());
        Some(stage)
    }

    pub fn pause_evolution(&mut self) -> bool {
        self.lifecycle.pause()
    }

    pub fn resume_evolution(&mut self) -> bool {
        self.lifecycle.resume()
    }

    /// Fraction of the way to the next automatic stage advance, in `[0, 1]`.
    pub fn stage_progress(&self) -> f32 {
        if self.ticks_per_stage == 0 || self.evolution_stage().is_terminal() {
            return 0.0;
        }
        (self.evolution_ticks as f32 / self.ticks_per_stage as f32).clamp(0.0, 1.0)
    }

    /// Status line for the info panel.
    pub fn status_label(&self) -> &'static str {
        if !self.is_habitable() {
            return "Uninhabitable";
        }
        match self.evolution_stage() {
            EvolutionStage::Dormant => "Awaiting spark",
            EvolutionStage::Microbial => "Microbial mats",
            EvolutionStage::PlantLife => "Greening continents",
            EvolutionStage::AnimalLife => "Teeming with fauna",
            EvolutionStage::Intelligent => "Civilization",
        }
    }
}
