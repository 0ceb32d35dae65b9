//! Galaxy layout: one lightweight config per star system, derived from a master seed.

use glam::Vec3;

use crate::random::{mix_system_seed, SeededRandom};
use crate::star::{StarConfig, StarType};

/// Parameters of a galaxy. Immutable once the galaxy exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GalaxyConfig {
    pub system_count: usize,
    pub seed: u32,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            system_count: 5,
            seed: 42,
        }
    }
}

/// Everything needed to build one solar system. Created once, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystemConfig {
    /// Stable id (`system_<index>`); also the root of every per-planet seed key.
    pub id: String,
    pub index: usize,
    pub seed: u32,
    pub name: String,
    /// Galaxy-map position. Cosmetic only.
    pub position: Vec3,
    pub star: StarConfig,
    pub planet_count: usize,
}

impl SolarSystemConfig {
    /// Derive the config for system `index` of a galaxy seeded with `base_seed`.
    ///
    /// Draw order on the system stream: star type, planet bonus, name, position.
    pub fn generate(base_seed: u32, index: usize) -> Self {
        let seed = mix_system_seed(base_seed, index);
        let mut rng = SeededRandom::new(seed);

        let star_type = StarType::roll(&mut rng);
        let bonus = rng.index(3);
        let planet_count = star_type.base_planet_count() + bonus;
        let name = generate_system_name(&mut rng);

        // Place systems in a thin disc.
        let angle = rng.next() * std::f32::consts::TAU;
        let radius = 200.0 + rng.next() * 800.0;
        let position = Vec3::new(
            angle.cos() * radius,
            (rng.next() - 0.5) * 60.0,
            angle.sin() * radius,
        );

        Self {
            id: format!("system_{}", index),
            index,
            seed,
            name,
            position,
            star: star_type.config(),
            planet_count,
        }
    }
}

/// Generate the configs of every system in the galaxy, in index order.
pub fn generate_system_configs(config: &GalaxyConfig) -> Vec<SolarSystemConfig> {
    let systems: Vec<SolarSystemConfig> = (0..config.system_count)
        .map(|index| SolarSystemConfig::generate(config.seed, index))
        .collect();
    log::debug!(
        "Generated {} system configs from seed {}",
        systems.len(),
        config.seed
    );
    systems
}

/// Generate a system name from syllable tables, with an occasional catalog number.
fn generate_system_name(rng: &mut SeededRandom) -> String {
    const PREFIXES: [&str; 24] = [
        "Sol", "Alp", "Bet", "Gam", "Del", "Eps", "Zet", "Eta", "The", "Kap", "Lam", "Sig",
        "Tau", "Rig", "Veg", "Pro", "Arc", "Sir", "Pol", "Den", "Alt", "Cap", "Ald", "Ant",
    ];
    const MIDDLES: [&str; 16] = [
        "ar", "el", "an", "or", "en", "al", "ir", "ul", "ax", "on", "is", "us", "em", "os", "in",
        "at",
    ];
    const SUFFIXES: [&str; 8] = ["a", "us", "is", "i", "ae", "ix", "on", "um"];

    let mut name = String::new();
    name.push_str(*rng.pick(&PREFIXES));
    name.push_str(*rng.pick(&MIDDLES));
    if rng.next() < 0.5 {
        name.push_str(*rng.pick(&SUFFIXES));
    }
    if rng.next() < 0.25 {
        name.push_str(&format!("-{}", 1 + rng.index(998)));
    }
    name
}
