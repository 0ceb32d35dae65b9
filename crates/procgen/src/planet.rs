//! Planet generation from a system seed and orbit slot.
//!
//! **Seed-based replayability:** `generate_planet` is fully deterministic. Each planet
//! draws from its own stream seeded by `hash("<system id>_planet_<slot>")`, always in
//! the same order: name prefix, name suffix, type, size, color, rings, orbit speed,
//! orbit phase. Adding a draw anywhere but the end changes every planet after it.

use glam::Vec3;

use crate::random::{planet_seed_key, SeededRandom};
use crate::star::{hex_color, HabitableZone, StarConfig};

/// Angular speed (radians per tick) of a planet at distance 1, before jitter.
pub const ORBIT_SPEED_FACTOR: f32 = 0.02;

const NAME_PREFIXES: [&str; 24] = [
    "Aether", "Borea", "Cygni", "Draco", "Elysia", "Faros", "Gaia", "Helio", "Ixion", "Juno",
    "Kepler", "Lyra", "Mira", "Nyx", "Orion", "Pyxis", "Quasar", "Rhea", "Sirius", "Tycho",
    "Umbra", "Vega", "Wolf", "Zephyr",
];

const NAME_SUFFIXES: [&str; 16] = [
    "Prime", "Major", "Minor", "Secundus", "Tertius", "Alpha", "Beta", "Gamma", "Delta", "Nova",
    "Rex", "Vale", "Reach", "Haven", "Deep", "Drift",
];

/// Planet classification by composition and climate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetType {
    EarthLike,
    MarsLike,
    GasGiant,
    IceGiant,
    IcyCold,
    RedHot,
    Desert,
    Ocean,
    Rocky,
}

impl PlanetType {
    pub const ALL: [PlanetType; 9] = [
        PlanetType::EarthLike,
        PlanetType::MarsLike,
        PlanetType::GasGiant,
        PlanetType::IceGiant,
        PlanetType::IcyCold,
        PlanetType::RedHot,
        PlanetType::Desert,
        PlanetType::Ocean,
        PlanetType::Rocky,
    ];

    /// Stable identifier (`earth_like`, `gas_giant`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            PlanetType::EarthLike => "earth_like",
            PlanetType::MarsLike => "mars_like",
            PlanetType::GasGiant => "gas_giant",
            PlanetType::IceGiant => "ice_giant",
            PlanetType::IcyCold => "icy_cold",
            PlanetType::RedHot => "red_hot",
            PlanetType::Desert => "desert",
            PlanetType::Ocean => "ocean",
            PlanetType::Rocky => "rocky",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanetType::EarthLike => "Earth-like",
            PlanetType::MarsLike => "Mars-like",
            PlanetType::GasGiant => "Gas Giant",
            PlanetType::IceGiant => "Ice Giant",
            PlanetType::IcyCold => "Frozen World",
            PlanetType::RedHot => "Volcanic",
            PlanetType::Desert => "Desert",
            PlanetType::Ocean => "Ocean World",
            PlanetType::Rocky => "Rocky",
        }
    }

    pub fn atmosphere_label(&self) -> &'static str {
        match self {
            PlanetType::EarthLike => "Nitrogen-Oxygen",
            PlanetType::MarsLike => "Thin CO2",
            PlanetType::GasGiant => "Hydrogen-Helium",
            PlanetType::IceGiant => "Methane-Hydrogen",
            PlanetType::IcyCold => "Trace Nitrogen",
            PlanetType::RedHot => "Sulfuric",
            PlanetType::Desert => "Dry CO2-Nitrogen",
            PlanetType::Ocean => "Humid Nitrogen",
            PlanetType::Rocky => "None",
        }
    }

    /// Types that can host life when they sit inside the habitable zone.
    pub fn supports_life(&self) -> bool {
        matches!(
            self,
            PlanetType::EarthLike | PlanetType::MarsLike | PlanetType::Ocean
        )
    }

    /// Radius range (Earth radii).
    pub fn size_range(&self) -> (f32, f32) {
        match self {
            PlanetType::GasGiant => (3.0, 5.0),
            PlanetType::IceGiant => (2.2, 3.2),
            PlanetType::EarthLike => (0.9, 1.3),
            PlanetType::Ocean => (1.0, 1.5),
            PlanetType::Desert => (0.7, 1.1),
            PlanetType::IcyCold => (0.6, 1.0),
            PlanetType::Rocky => (0.5, 1.0),
            PlanetType::MarsLike => (0.5, 0.8),
            PlanetType::RedHot => (0.4, 0.8),
        }
    }

    /// Two endpoints of the type's color family.
    fn color_family(&self) -> (u32, u32) {
        match self {
            PlanetType::EarthLike => (0x2e7d4f, 0x3a6fd8),
            PlanetType::MarsLike => (0xb5472b, 0xd9774a),
            PlanetType::GasGiant => (0xd8b38a, 0xa7784e),
            PlanetType::IceGiant => (0x5fc7c9, 0x4a8fd8),
            PlanetType::IcyCold => (0xe8f1f8, 0xbcd6e8),
            PlanetType::RedHot => (0xff4a1c, 0xff9a2e),
            PlanetType::Desert => (0xd2b48c, 0xc49a5c),
            PlanetType::Ocean => (0x0d3b8c, 0x1f6fb8),
            PlanetType::Rocky => (0x7a7a7a, 0x9c958c),
        }
    }

    /// Probability of a ring system. Only giants carry rings.
    pub fn ring_chance(&self) -> f32 {
        match self {
            PlanetType::GasGiant => 0.6,
            PlanetType::IceGiant => 0.3,
            _ => 0.0,
        }
    }
}

/// Distance band a slot falls into relative to the habitable zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneBand {
    /// Closer than half the inner edge.
    Scorched,
    /// Between half the inner edge and the inner edge.
    Warm,
    /// Inside the habitable zone (edges inclusive).
    Habitable,
    /// Beyond the outer edge, up to 1.5x.
    Cool,
    /// Further than 1.5x the outer edge.
    Frozen,
}

impl ZoneBand {
    pub fn classify(distance: f32, zone: HabitableZone) -> Self {
        if distance < zone.inner * 0.5 {
            ZoneBand::Scorched
        } else if distance < zone.inner {
            ZoneBand::Warm
        } else if distance <= zone.outer {
            ZoneBand::Habitable
        } else if distance <= zone.outer * 1.5 {
            ZoneBand::Cool
        } else {
            ZoneBand::Frozen
        }
    }

    /// Cumulative thresholds on a single draw.
    fn weights(&self) -> &'static [(f32, PlanetType)] {
        match self {
            ZoneBand::Scorched => &[(1.0, PlanetType::RedHot)],
            ZoneBand::Warm => &[
                (0.40, PlanetType::Rocky),
                (0.75, PlanetType::Desert),
                (1.00, PlanetType::MarsLike),
            ],
            ZoneBand::Habitable => &[
                (0.35, PlanetType::EarthLike),
                (0.55, PlanetType::Ocean),
                (0.75, PlanetType::MarsLike),
                (0.90, PlanetType::Desert),
                (1.00, PlanetType::Rocky),
            ],
            ZoneBand::Cool => &[
                (0.40, PlanetType::MarsLike),
                (0.75, PlanetType::IcyCold),
                (1.00, PlanetType::Rocky),
            ],
            ZoneBand::Frozen => &[
                (0.50, PlanetType::GasGiant),
                (0.80, PlanetType::IceGiant),
                (1.00, PlanetType::IcyCold),
            ],
        }
    }

    /// Select a type from this band for draw `r` in `[0, 1)`.
    pub fn select(&self, r: f32) -> PlanetType {
        let weights = self.weights();
        weights
            .iter()
            .find(|(threshold, _)| r < *threshold)
            .map(|(_, planet_type)| *planet_type)
            .unwrap_or(weights[weights.len() - 1].1)
    }
}

/// Everything generation decides about a planet. Fixed for the planet's lifetime
/// except `orbit_angle`, which is only the starting phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetConfig {
    pub name: String,
    pub slot: usize,
    pub orbit_distance: f32,
    pub size: f32,
    pub base_color: Vec3,
    pub has_rings: bool,
    pub orbit_speed: f32,
    pub orbit_angle: f32,
    pub planet_type: PlanetType,
    pub is_habitable: bool,
}

/// Orbit distances for `count` slots around `star`.
///
/// Slot 0 sits at `star.size * 1.5 + 5`; each further slot adds the star type's
/// spacing plus up to 30% jitter, so distances strictly increase. Jitter comes from
/// the system's layout stream (`hash("<system id>_layout")`).
pub fn orbit_distances(system_id: &str, star: &StarConfig, count: usize) -> Vec<f32> {
    let mut rng = SeededRandom::from_key(&format!("{}_layout", system_id));
    let spacing = star.star_type.orbit_spacing();
    let mut distances = Vec::with_capacity(count);
    let mut distance = star.first_orbit_distance();
    for slot in 0..count {
        let jitter = rng.next() * spacing * 0.3;
        if slot > 0 {
            distance += spacing;
        }
        distances.push(distance + jitter);
        distance += jitter;
    }
    distances
}

/// Generate the planet in `slot` of system `system_id` at `orbit_distance`.
pub fn generate_planet(
    system_id: &str,
    star: &StarConfig,
    slot: usize,
    orbit_distance: f32,
) -> PlanetConfig {
    let mut rng = SeededRandom::from_key(&planet_seed_key(system_id, slot));
    let zone = star.habitable_zone();

    let name = format!(
        "{} {}",
        rng.pick(&NAME_PREFIXES),
        rng.pick(&NAME_SUFFIXES)
    );

    let planet_type = ZoneBand::classify(orbit_distance, zone).select(rng.next());

    let (min_size, max_size) = planet_type.size_range();
    let size = rng.range(min_size, max_size);

    let (color_a, color_b) = planet_type.color_family();
    let base_color = hex_color(color_a).lerp(hex_color(color_b), rng.next());

    let has_rings = rng.next() < planet_type.ring_chance();

    let orbit_speed =
        ORBIT_SPEED_FACTOR / orbit_distance.max(1.0).sqrt() * (0.9 + rng.next() * 0.2);

    let orbit_angle = rng.next() * std::f32::consts::TAU;

    let is_habitable = zone.contains(orbit_distance) && planet_type.supports_life();

    PlanetConfig {
        name,
        slot,
        orbit_distance,
        size,
        base_color,
        has_rings,
        orbit_speed,
        orbit_angle,
        planet_type,
        is_habitable,
    }
}

/// Generate all `count` planets of a system, innermost first.
///
/// The name tables are small, so two slots can draw the same name. Later repeats get
/// a numeral ("Orion Major", "Orion Major II") so every name in a system is unique.
pub fn generate_planets(system_id: &str, star: &StarConfig, count: usize) -> Vec<PlanetConfig> {
    let mut planets: Vec<PlanetConfig> = orbit_distances(system_id, star, count)
        .into_iter()
        .enumerate()
        .map(|(slot, distance)| generate_planet(system_id, star, slot, distance))
        .collect();
    disambiguate_names(&mut planets);
    planets
}

fn disambiguate_names(planets: &mut [PlanetConfig]) {
    const NUMERALS: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];
    let drawn: Vec<String> = planets.iter().map(|p| p.name.clone()).collect();
    for (i, planet) in planets.iter_mut().enumerate() {
        let earlier = drawn[..i].iter().filter(|name| **name == drawn[i]).count();
        if earlier == 0 {
            continue;
        }
        let numeral = NUMERALS
            .get(earlier)
            .map(|n| n.to_string())
            .unwrap_or_else(|| (earlier + 1).to_string());
        planet.name = format!("{} {}", drawn[i], numeral);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::StarType;

    #[test]
    fn same_slot_same_planet() {
        let star = StarType::YellowDwarf.config();
        let a = generate_planet("system_3", &star, 2, 30.0);
        let b = generate_planet("system_3", &star, 2, 30.0);
        assert_eq!(a, b);
    }

    #[test]
    fn different_slots_draw_different_streams() {
        let star = StarType::YellowDwarf.config();
        let a = generate_planet("system_3", &star, 1, 30.0);
        let b = generate_planet("system_3", &star, 2, 30.0);
        assert!(a.name != b.name || a.size != b.size || a.orbit_angle != b.orbit_angle);
    }

    #[test]
    fn orbit_distances_strictly_increase() {
        for star_type in StarType::ALL {
            let star = star_type.config();
            let distances = orbit_distances("system_9", &star, 8);
            assert!(distances[0] >= star.first_orbit_distance());
            for pair in distances.windows(2) {
                assert!(
                    pair[1] - pair[0] >= star_type.orbit_spacing(),
                    "{:?}: {:?}",
                    star_type,
                    distances
                );
            }
        }
    }

    #[test]
    fn scorched_band_is_always_red_hot() {
        let star = StarType::BlueGiant.config();
        let zone = star.habitable_zone();
        for slot in 0..50 {
            let planet = generate_planet("system_hot", &star, slot, zone.inner * 0.4);
            assert_eq!(planet.planet_type, PlanetType::RedHot);
            assert!(!planet.is_habitable);
        }
    }

    #[test]
    fn band_thresholds_are_cumulative() {
        assert_eq!(ZoneBand::Habitable.select(0.0), PlanetType::EarthLike);
        assert_eq!(ZoneBand::Habitable.select(0.35), PlanetType::Ocean);
        assert_eq!(ZoneBand::Habitable.select(0.6), PlanetType::MarsLike);
        assert_eq!(ZoneBand::Habitable.select(0.89), PlanetType::Desert);
        assert_eq!(ZoneBand::Habitable.select(0.999), PlanetType::Rocky);
        assert_eq!(ZoneBand::Frozen.select(0.49), PlanetType::GasGiant);
        assert_eq!(ZoneBand::Warm.select(0.9), PlanetType::MarsLike);
    }

    #[test]
    fn zone_edges_are_inclusive() {
        let zone = HabitableZone { inner: 10.0, outer: 20.0 };
        assert_eq!(ZoneBand::classify(4.99, zone), ZoneBand::Scorched);
        assert_eq!(ZoneBand::classify(5.0, zone), ZoneBand::Warm);
        assert_eq!(ZoneBand::classify(10.0, zone), ZoneBand::Habitable);
        assert_eq!(ZoneBand::classify(20.0, zone), ZoneBand::Habitable);
        assert_eq!(ZoneBand::classify(30.0, zone), ZoneBand::Cool);
        assert_eq!(ZoneBand::classify(30.01, zone), ZoneBand::Frozen);
    }

    /// Search for a planet that is habitable without being both in the zone and of a
    /// life-bearing type.
    #[test]
    fn habitability_requires_zone_and_type() {
        for star_type in StarType::ALL {
            let star = star_type.config();
            let zone = star.habitable_zone();
            for system in 0..40 {
                let id = format!("system_{}", system);
                let distances = orbit_distances(&id, &star, 8);
                for (slot, &distance) in distances.iter().enumerate() {
                    let planet = generate_planet(&id, &star, slot, distance);
                    let expected = zone.contains(planet.orbit_distance)
                        && planet.planet_type.supports_life();
                    assert_eq!(planet.is_habitable, expected, "{:?}", planet);
                }
            }
        }
    }

    #[test]
    fn sizes_and_rings_follow_type() {
        let star = StarType::YellowDwarf.config();
        for slot in 0..200 {
            let distance = 5.0 + slot as f32 * 0.7;
            let planet = generate_planet("system_sizes", &star, slot, distance);
            let (min, max) = planet.planet_type.size_range();
            assert!(planet.size >= min && planet.size <= max, "{:?}", planet);
            if planet.has_rings {
                assert!(matches!(
                    planet.planet_type,
                    PlanetType::GasGiant | PlanetType::IceGiant
                ));
            }
        }
    }

    #[test]
    fn closer_planets_orbit_faster() {
        let star = StarType::YellowDwarf.config();
        let near = generate_planet("system_speed", &star, 0, 10.0);
        // Same stream (same slot) so the jitter factor is identical.
        let far = generate_planet("system_speed", &star, 0, 90.0);
        assert!(near.orbit_speed > far.orbit_speed);
    }

    #[test]
    fn names_are_two_words_from_tables() {
        let star = StarType::RedDwarf.config();
        let planet = generate_planet("system_0", &star, 0, 12.0);
        let words: Vec<&str> = planet.name.split(' ').collect();
        assert_eq!(words.len(), 2);
        assert!(NAME_PREFIXES.contains(&words[0]));
        assert!(NAME_SUFFIXES.contains(&words[1]));
    }

    #[test]
    fn repeated_names_get_numerals() {
        let star = StarType::YellowDwarf.config();
        let mut planets: Vec<PlanetConfig> = (0..4)
            .map(|slot| generate_planet("system_0", &star, slot, 20.0 + slot as f32 * 8.0))
            .collect();
        for planet in &mut planets {
            planet.name = "Orion Major".to_string();
        }
        planets[2].name = "Cygni Nova".to_string();
        disambiguate_names(&mut planets);
        let names: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Orion Major", "Orion Major II", "Cygni Nova", "Orion Major III"]);
    }

    #[test]
    fn planet_names_are_unique_within_each_system() {
        let configs = crate::universe::generate_system_configs(&crate::universe::GalaxyConfig {
            system_count: 8,
            seed: 42,
        });
        for system in &configs {
            let planets = generate_planets(&system.id, &system.star, system.planet_count);
            assert_eq!(planets.len(), system.planet_count);
            let mut names: Vec<&str> = planets.iter().map(|p| p.name.as_str()).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), planets.len(), "repeated planet name in {}", system.id);
            for (slot, planet) in planets.iter().enumerate() {
                assert_eq!(planet.slot, slot);
            }
        }
    }
}
