//! Orbit update contracts for anything that revolves around a central point.
//!
//! Circular orbits advance at a constant angular rate. Elliptical orbits put the
//! parent at a focus and speed up near perihelion: the angular step is scaled by
//! `(a / r)^1.5`, a stylized stand-in for Kepler's second law rather than a solve of
//! Kepler's equation. The only mutable state in either kind is the orbit angle.

use glam::Vec3;

/// Distance floor used when scaling elliptical speed, so a body passing through the
/// focus cannot produce an unbounded step.
pub const MIN_FOCUS_DISTANCE: f32 = 1.0;

/// Shared update contract for planets, moons, asteroids and comets.
pub trait OrbitingBody {
    /// Advance one simulation tick.
    fn advance(&mut self);

    /// Position relative to the orbit's center (circular) or focus (elliptical).
    fn position(&self) -> Vec3;

    /// Current phase in radians.
    fn orbit_angle(&self) -> f32;

    /// Distance from the center/focus at the current phase.
    fn distance_from_focus(&self) -> f32 {
        self.position().length()
    }
}

/// Constant-rate circular orbit in the XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularOrbit {
    pub distance: f32,
    /// Radians per tick.
    pub speed: f32,
    pub angle: f32,
    /// Fixed vertical offset from the orbital plane.
    pub height: f32,
}

impl CircularOrbit {
    pub fn new(distance: f32, speed: f32, angle: f32) -> Self {
        Self {
            distance,
            speed,
            angle,
            height: 0.0,
        }
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Ticks per full revolution. Infinite for a stationary body.
    pub fn period_ticks(&self) -> f32 {
        if self.speed == 0.0 {
            f32::INFINITY
        } else {
            std::f32::consts::TAU / self.speed.abs()
        }
    }

    /// Position after `ticks` more ticks without mutating the orbit.
    pub fn position_after(&self, ticks: u64) -> Vec3 {
        let angle = self.angle + self.speed * ticks as f32;
        Vec3::new(angle.cos() * self.distance, self.height, angle.sin() * self.distance)
    }
}

impl OrbitingBody for CircularOrbit {
    fn advance(&mut self) {
        self.angle += self.speed;
    }

    fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.distance,
            self.height,
            self.angle.sin() * self.distance,
        )
    }

    fn orbit_angle(&self) -> f32 {
        self.angle
    }

    fn distance_from_focus(&self) -> f32 {
        (self.distance * self.distance + self.height * self.height).sqrt()
    }
}

/// Keplerian-style ellipse with the parent at a focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalOrbit {
    pub semi_major_axis: f32,
    /// `0 <= e < 1`.
    pub eccentricity: f32,
    /// Tilt of the orbital plane in radians.
    pub inclination: f32,
    /// Angular step at distance `a`, radians per tick.
    pub base_speed: f32,
    pub angle: f32,
}

impl EllipticalOrbit {
    /// Build an orbit. Eccentricity is clamped into `[0, 0.99]`.
    pub fn new(
        semi_major_axis: f32,
        eccentricity: f32,
        inclination: f32,
        base_speed: f32,
        angle: f32,
    ) -> Self {
        Self {
            semi_major_axis,
            eccentricity: eccentricity.clamp(0.0, 0.99),
            inclination,
            base_speed,
            angle,
        }
    }

    pub fn semi_minor_axis(&self) -> f32 {
        let e = self.eccentricity;
        self.semi_major_axis * (1.0 - e * e).sqrt()
    }

    pub fn perihelion(&self) -> f32 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn aphelion(&self) -> f32 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Position at an arbitrary phase.
    pub fn position_at(&self, angle: f32) -> Vec3 {
        let a = self.semi_major_axis;
        let b = self.semi_minor_axis();
        Vec3::new(
            angle.cos() * a - a * self.eccentricity,
            angle.sin() * self.inclination.sin() * b * 0.5,
            angle.sin() * b,
        )
    }

    /// Multiplier on `base_speed` at `current_distance` from the focus.
    pub fn speed_modifier(&self, current_distance: f32) -> f32 {
        (self.semi_major_axis / current_distance.max(MIN_FOCUS_DISTANCE)).powf(1.5)
    }

    /// Angular step the next `advance` will take.
    pub fn angular_step(&self) -> f32 {
        self.base_speed * self.speed_modifier(self.distance_from_focus())
    }

    /// Unit direction pointing away from the focus, or zero at the focus.
    pub fn radial_direction(&self) -> Vec3 {
        self.position().normalize_or_zero()
    }
}

impl OrbitingBody for EllipticalOrbit {
    fn advance(&mut self) {
        self.angle += self.angular_step();
    }

    fn position(&self) -> Vec3 {
        self.position_at(self.angle)
    }

    fn orbit_angle(&self) -> f32 {
        self.angle
    }
}
