//! A solar system: one star, its planets, an optional asteroid belt, and comets,
//! updated and shown as one unit.
//!
//! Inactive systems are frozen, never disposed: planets keep their orbit angle and
//! evolution stage until the player returns.

use glam::Vec3;
use procgen::{generate_planets, SolarSystemConfig, StarConfig};
use rand::Rng;

use crate::asteroid::AsteroidBelt;
use crate::comet::Comet;
use crate::evolution::EvolutionStage;
use crate::planet::Planet;

/// Segments in each orbit guide polyline.
pub const ORBIT_GUIDE_SEGMENTS: usize = 64;

/// Per-system tuning that does not come from the seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemSettings {
    /// Ticks between automatic evolution stage advances (0 disables).
    pub ticks_per_stage: u32,
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self {
            ticks_per_stage: 480,
        }
    }
}

/// A planet advanced to a new evolution stage during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvolutionEvent {
    pub planet: usize,
    pub stage: EvolutionStage,
}

/// Kinds of bodies a system moves each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyGroup {
    Planets,
    Belt,
    Comets,
}

impl BodyGroup {
    pub const UPDATE_ORDER: [BodyGroup; 3] = [BodyGroup::Planets, BodyGroup::Belt, BodyGroup::Comets];
}

/// Closed polyline tracing a planet's orbit.
#[derive(Debug, Clone)]
pub struct OrbitGuide {
    pub radius: f32,
    pub points: Vec<Vec3>,
}

impl OrbitGuide {
    pub fn circle(radius: f32) -> Self {
        let points = (0..=ORBIT_GUIDE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / ORBIT_GUIDE_SEGMENTS as f32 * std::f32::consts::TAU;
                Vec3::new(t.cos() * radius, 0.0, t.sin() * radius)
            })
            .collect();
        Self { radius, points }
    }
}

pub struct SolarSystem {
    config: SolarSystemConfig,
    planets: Vec<Planet>,
    belt: Option<AsteroidBelt>,
    comets: Vec<Comet>,
    orbit_guides: Vec<OrbitGuide>,
    star_rotation: f32,
    active: bool,
}

impl SolarSystem {
    /// Build the system: planets from the seeded streams, then belt and comets from
    /// the cosmetic stream, then orbit guides from the final planet distances.
    pub fn create<R: Rng>(config: SolarSystemConfig, settings: SystemSettings, rng: &mut R) -> Self {
        let planets: Vec<Planet> = generate_planets(&config.id, &config.star, config.planet_count)
            .into_iter()
            .map(|planet| Planet::from_config(planet, settings.ticks_per_stage, rng))
            .collect();

        let belt = if planets.len() >= 3 && rng.gen_bool(0.5) {
            Some(AsteroidBelt::generate(
                planets[1].orbit_distance(),
                planets[2].orbit_distance(),
                rng,
            ))
        } else {
            None
        };

        let outer_orbit = planets
            .last()
            .map(|p| p.orbit_distance())
            .unwrap_or_else(|| config.star.first_orbit_distance());
        let comet_count = rng.gen_range(1..=3);
        let comets = (0..comet_count)
            .map(|_| Comet::generate(outer_orbit, rng))
            .collect();

        let orbit_guides = planets
            .iter()
            .map(|p| OrbitGuide::circle(p.orbit_distance()))
            .collect();

        log::debug!(
            "Created {} ({}): {} planets, belt: {}, comets: {}",
            config.name,
            config.star.star_type.label(),
            planets.len(),
            belt.is_some(),
            comet_count
        );

        Self {
            config,
            planets,
            belt,
            comets,
            orbit_guides,
            star_rotation: 0.0,
            active: false,
        }
    }

    /// Advance one tick: planets, then belt, then comets. No-op while inactive.
    pub fn update(&mut self) -> Vec<EvolutionEvent> {
        self.update_with(|_| {})
    }

    /// Like [`update`](Self::update), calling `on_group` after each body group moves.
    /// Groups with no bodies (no belt) are skipped.
    pub fn update_with(&mut self, mut on_group: impl FnMut(BodyGroup)) -> Vec<EvolutionEvent> {
        let mut events = Vec::new();
        if !self.active {
            return events;
        }

        self.star_rotation += 0.002;
        for group in BodyGroup::UPDATE_ORDER {
            match group {
                BodyGroup::Planets => {
                    for (index, planet) in self.planets.iter_mut().enumerate() {
                        if let Some(stage) = planet.update() {
                            events.push(EvolutionEvent { planet: index, stage });
                        }
                    }
                }
                BodyGroup::Belt => {
                    let Some(belt) = &mut self.belt else {
                        continue;
                    };
                    belt.update();
                }
                BodyGroup::Comets => {
                    for comet in &mut self.comets {
                        comet.update();
                    }
                }
            }
            on_group(group);
        }
        events
    }

    /// Show or hide every owned body. State is kept either way.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        for planet in &mut self.planets {
            planet.set_visible(active);
        }
        if let Some(belt) = &mut self.belt {
            belt.set_visible(active);
        }
        for comet in &mut self.comets {
            comet.set_visible(active);
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn config(&self) -> &SolarSystemConfig {
        &self.config
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn star(&self) -> &StarConfig {
        &self.config.star
    }

    pub fn star_rotation(&self) -> f32 {
        self.star_rotation
    }

    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn planet(&self, index: usize) -> Option<&Planet> {
        self.planets.get(index)
    }

    pub fn planet_mut(&mut self, index: usize) -> Option<&mut Planet> {
        self.planets.get_mut(index)
    }

    pub fn habitable_planets(&self) -> Vec<&Planet> {
        self.planets.iter().filter(|p| p.is_habitable()).collect()
    }

    pub fn evolvable_planets(&self) -> Vec<&Planet> {
        self.planets.iter().filter(|p| p.can_evolve()).collect()
    }

    /// Indices of habitable planets, innermost first.
    pub fn habitable_indices(&self) -> Vec<usize> {
        self.planets
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_habitable())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn asteroid_belt(&self) -> Option<&AsteroidBelt> {
        self.belt.as_ref()
    }

    pub fn comets(&self) -> &[Comet] {
        &self.comets
    }

    pub fn orbit_guides(&self) -> &[OrbitGuide] {
        &self.orbit_guides
    }
}
