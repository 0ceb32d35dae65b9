//! Orbit camera rig. Rendering consumes `eye()`/`target`; the simulation only
//! decides what to look at.

use glam::Vec3;

const DEFAULT_DISTANCE: f32 = 120.0;
const DEFAULT_PITCH: f32 = 0.45;
const MIN_DISTANCE: f32 = 2.0;
const MAX_DISTANCE: f32 = 600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub target: Vec3,
    pub distance: f32,
    /// Rotation around the vertical axis, radians.
    pub yaw: f32,
    /// Elevation above the orbital plane, radians.
    pub pitch: f32,
    /// Input sensitivity for orbit drags.
    pub sensitivity: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: DEFAULT_DISTANCE,
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
            sensitivity: 0.005,
        }
    }
}

impl CameraRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the overview of the whole system.
    pub fn reset(&mut self) {
        let sensitivity = self.sensitivity;
        *self = Self {
            sensitivity,
            ..Self::default()
        };
    }

    /// Frame a body of radius `size` at `position`.
    pub fn focus_on(&mut self, position: Vec3, size: f32) {
        self.target = position;
        self.distance = (size * 6.0 + 8.0).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Keep the current framing but move with a tracked body.
    pub fn follow(&mut self, position: Vec3) {
        self.target = position;
    }

    /// Orbit drag from pointer movement.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw -= delta_x * self.sensitivity;
        let max_pitch = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = (self.pitch + delta_y * self.sensitivity).clamp(-max_pitch, max_pitch);
    }

    /// Positive `amount` zooms in.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance * (1.0 - amount * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Camera position.
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.pitch.cos() * self.distance;
        self.target
            + Vec3::new(
                self.yaw.sin() * horizontal,
                self.pitch.sin() * self.distance,
                self.yaw.cos() * horizontal,
            )
    }
}
