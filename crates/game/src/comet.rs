//! Comets on eccentric orbits that whip around the star at perihelion.

use glam::Vec3;
use procgen::{EllipticalOrbit, OrbitingBody};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Comet {
    orbit: EllipticalOrbit,
    pub nucleus_size: f32,
    pub tail_length: f32,
    visible: bool,
}

impl Comet {
    pub fn new(orbit: EllipticalOrbit, nucleus_size: f32, tail_length: f32) -> Self {
        Self {
            orbit,
            nucleus_size,
            tail_length,
            visible: false,
        }
    }

    /// Random comet scaled to a system whose outermost planet sits at `outer_orbit`.
    pub fn generate<R: Rng>(outer_orbit: f32, rng: &mut R) -> Self {
        let semi_major_axis = outer_orbit.max(10.0) * (0.6 + rng.gen::<f32>() * 0.6);
        let eccentricity = 0.5 + rng.gen::<f32>() * 0.4;
        let inclination = rng.gen::<f32>() * 0.5;
        let base_speed = 0.0015 + rng.gen::<f32>() * 0.0025;
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        Self::new(
            EllipticalOrbit::new(semi_major_axis, eccentricity, inclination, base_speed, angle),
            0.2 + rng.gen::<f32>() * 0.2,
            4.0 + rng.gen::<f32>() * 6.0,
        )
    }

    pub fn update(&mut self) {
        self.orbit.advance();
    }

    pub fn orbit(&self) -> &EllipticalOrbit {
        &self.orbit
    }

    pub fn position(&self) -> Vec3 {
        self.orbit.position()
    }

    /// Tails always point away from the star.
    pub fn tail_direction(&self) -> Vec3 {
        self.orbit.radial_direction()
    }

    /// 1.0 at perihelion, fading with distance.
    pub fn tail_intensity(&self) -> f32 {
        let distance = self.orbit.distance_from_focus().max(1.0);
        (self.orbit.perihelion() / distance).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}
