//! Star tables: visual parameters, habitable zones, and planet-layout constants per
//! star type.

use glam::Vec3;

use crate::random::SeededRandom;

/// Types of stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StarType {
    YellowDwarf,
    RedDwarf,
    BlueGiant,
    OrangeGiant,
    WhiteDwarf,
    RedGiant,
    DeepOrange,
}

/// Cumulative roll thresholds for star selection. Red dwarfs dominate, blue giants
/// are rarest.
const STAR_TYPE_ROLL: [(f32, StarType); 7] = [
    (0.45, StarType::RedDwarf),
    (0.65, StarType::YellowDwarf),
    (0.77, StarType::DeepOrange),
    (0.86, StarType::OrangeGiant),
    (0.91, StarType::WhiteDwarf),
    (0.96, StarType::RedGiant),
    (1.00, StarType::BlueGiant),
];

impl StarType {
    pub const ALL: [StarType; 7] = [
        StarType::YellowDwarf,
        StarType::RedDwarf,
        StarType::BlueGiant,
        StarType::OrangeGiant,
        StarType::WhiteDwarf,
        StarType::RedGiant,
        StarType::DeepOrange,
    ];

    /// Weighted roll on one draw of the stream.
    pub fn roll(rng: &mut SeededRandom) -> Self {
        let r = rng.next();
        STAR_TYPE_ROLL
            .iter()
            .find(|(threshold, _)| r < *threshold)
            .map(|(_, star_type)| *star_type)
            .unwrap_or(StarType::BlueGiant)
    }

    /// Stable identifier (`yellow_dwarf`, `red_dwarf`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            StarType::YellowDwarf => "yellow_dwarf",
            StarType::RedDwarf => "red_dwarf",
            StarType::BlueGiant => "blue_giant",
            StarType::OrangeGiant => "orange_giant",
            StarType::WhiteDwarf => "white_dwarf",
            StarType::RedGiant => "red_giant",
            StarType::DeepOrange => "deep_orange",
        }
    }

    /// Human-readable label for the HUD.
    pub fn label(&self) -> &'static str {
        match self {
            StarType::YellowDwarf => "Yellow Dwarf",
            StarType::RedDwarf => "Red Dwarf",
            StarType::BlueGiant => "Blue Giant",
            StarType::OrangeGiant => "Orange Giant",
            StarType::WhiteDwarf => "White Dwarf",
            StarType::RedGiant => "Red Giant",
            StarType::DeepOrange => "Deep Orange Dwarf",
        }
    }

    /// Planets every system of this type starts with, before the random bonus.
    pub fn base_planet_count(&self) -> usize {
        match self {
            StarType::YellowDwarf => 5,
            StarType::RedDwarf => 3,
            StarType::BlueGiant => 6,
            StarType::OrangeGiant => 5,
            StarType::WhiteDwarf => 2,
            StarType::RedGiant => 4,
            StarType::DeepOrange => 4,
        }
    }

    /// Distance added per successive orbit slot (red dwarfs pack tightest, blue
    /// giants spread widest).
    pub fn orbit_spacing(&self) -> f32 {
        match self {
            StarType::RedDwarf => 4.0,
            StarType::WhiteDwarf => 5.0,
            StarType::DeepOrange => 6.0,
            StarType::YellowDwarf => 8.0,
            StarType::OrangeGiant => 10.0,
            StarType::RedGiant => 11.0,
            StarType::BlueGiant => 14.0,
        }
    }

    /// Distance band in which planets are assumed survivable.
    pub fn habitable_zone(&self) -> HabitableZone {
        let (inner, outer) = match self {
            StarType::YellowDwarf => (18.0, 40.0),
            StarType::RedDwarf => (10.0, 20.0),
            StarType::BlueGiant => (50.0, 100.0),
            StarType::OrangeGiant => (35.0, 70.0),
            StarType::WhiteDwarf => (8.0, 16.0),
            StarType::RedGiant => (45.0, 90.0),
            StarType::DeepOrange => (14.0, 30.0),
        };
        HabitableZone { inner, outer }
    }

    /// Full visual configuration for this type.
    pub fn config(&self) -> StarConfig {
        let (size, color, emissive, light_intensity, corona1, corona2) = match self {
            StarType::YellowDwarf => (5.0, 0xffdd44, 0xffaa00, 2.0, 0xffee88, 0xff8800),
            StarType::RedDwarf => (3.0, 0xff5533, 0xcc2200, 1.2, 0xff7755, 0xaa1100),
            StarType::BlueGiant => (10.0, 0x88aaff, 0x4466ff, 3.5, 0xbbccff, 0x3355ff),
            StarType::OrangeGiant => (8.0, 0xffaa44, 0xff7700, 2.6, 0xffcc77, 0xdd5500),
            StarType::WhiteDwarf => (2.0, 0xf4f6ff, 0xccd4ff, 1.6, 0xffffff, 0xaabbff),
            StarType::RedGiant => (12.0, 0xff6644, 0xdd3311, 2.8, 0xff8866, 0xbb2200),
            StarType::DeepOrange => (4.5, 0xff8833, 0xdd5500, 1.6, 0xffaa66, 0xbb4400),
        };
        StarConfig {
            star_type: *self,
            size,
            color: hex_color(color),
            emissive_color: hex_color(emissive),
            light_intensity,
            corona_color1: hex_color(corona1),
            corona_color2: hex_color(corona2),
        }
    }
}

/// Distance band (same units as orbit distance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HabitableZone {
    pub inner: f32,
    pub outer: f32,
}

impl HabitableZone {
    /// Inclusive on both edges.
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.inner && distance <= self.outer
    }
}

/// Visual parameters of a star, drawn from the fixed table.
#[derive(Debug, Clone, PartialEq)]
pub struct StarConfig {
    pub star_type: StarType,
    pub size: f32,
    pub color: Vec3,
    pub emissive_color: Vec3,
    pub light_intensity: f32,
    pub corona_color1: Vec3,
    pub corona_color2: Vec3,
}

impl StarConfig {
    pub fn habitable_zone(&self) -> HabitableZone {
        self.star_type.habitable_zone()
    }

    /// Distance of the innermost orbit slot before jitter.
    pub fn first_orbit_distance(&self) -> f32 {
        self.size * 1.5 + 5.0
    }
}

/// Convert a `0xRRGGBB` literal to linear-ish RGB in `[0, 1]`.
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
