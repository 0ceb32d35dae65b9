//! Asteroid belt between two inner orbits.

use glam::Vec3;
use procgen::{CircularOrbit, OrbitingBody};
use rand::Rng;

/// Angular speed of belt material at distance 1.
const BELT_SPEED_FACTOR: f32 = 0.015;

#[derive(Debug, Clone)]
pub struct Asteroid {
    pub orbit: CircularOrbit,
    pub size: f32,
    pub spin: f32,
    pub spin_speed: f32,
}

impl Asteroid {
    fn update(&mut self) {
        self.orbit.advance();
        self.spin += self.spin_speed;
    }
}

/// A ring of small circular-orbit bodies.
#[derive(Debug, Clone)]
pub struct AsteroidBelt {
    pub inner_radius: f32,
    pub outer_radius: f32,
    asteroids: Vec<Asteroid>,
    visible: bool,
}

impl AsteroidBelt {
    /// Scatter asteroids between the orbits at `inner_orbit` and `outer_orbit`,
    /// keeping 30% of the gap clear on each side.
    pub fn generate<R: Rng>(inner_orbit: f32, outer_orbit: f32, rng: &mut R) -> Self {
        let gap = (outer_orbit - inner_orbit).abs();
        let base = inner_orbit.min(outer_orbit);
        let inner_radius = base + gap * 0.3;
        let outer_radius = base + gap * 0.7;
        let count = rng.gen_range(150..=300);

        let asteroids = (0..count)
            .map(|_| {
                let distance = inner_radius + rng.gen::<f32>() * (outer_radius - inner_radius);
                let speed =
                    BELT_SPEED_FACTOR / distance.max(1.0).sqrt() * (0.8 + rng.gen::<f32>() * 0.4);
                let angle = rng.gen::<f32>() * std::f32::consts::TAU;
                let height = (rng.gen::<f32>() - 0.5) * 0.8;
                Asteroid {
                    orbit: CircularOrbit::new(distance, speed, angle).with_height(height),
                    size: 0.05 + rng.gen::<f32>() * 0.2,
                    spin: 0.0,
                    spin_speed: (rng.gen::<f32>() - 0.5) * 0.1,
                }
            })
            .collect();

        Self {
            inner_radius,
            outer_radius,
            asteroids,
            visible: false,
        }
    }

    pub fn update(&mut self) {
        for asteroid in &mut self.asteroids {
            asteroid.update();
        }
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.asteroids.iter().map(|a| a.orbit.position())
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn belt_stays_between_its_orbits() {
        let mut rng = StdRng::seed_from_u64(11);
        let belt = AsteroidBelt::generate(20.0, 30.0, &mut rng);
        assert!((150..=300).contains(&belt.len()));
        assert!(belt.inner_radius > 20.0 && belt.outer_radius < 30.0);
        for asteroid in belt.asteroids() {
            assert!(asteroid.orbit.distance >= belt.inner_radius);
            assert!(asteroid.orbit.distance <= belt.outer_radius);
        }
    }

    #[test]
    fn update_moves_every_asteroid() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut belt = AsteroidBelt::generate(10.0, 18.0, &mut rng);
        let before: Vec<f32> = belt.asteroids().iter().map(|a| a.orbit.angle).collect();
        belt.update();
        for (asteroid, angle) in belt.asteroids().iter().zip(before) {
            assert!(asteroid.orbit.angle > angle);
        }
    }
}
