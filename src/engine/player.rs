// First-person player state: pose, velocity, grounded flag and locomotion mode.
//
// Angles are in degrees. yaw = 0 faces +X, yaw = -90 faces -Z; pitch is
// positive looking up and always stays within +/- PITCH_LIMIT.

use glam::{Vec2, Vec3};

/// Pitch clamp in degrees; keeps the view from flipping over the poles.
pub const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocomotionMode {
    #[default]
    Walking,
    Noclip,
}

impl LocomotionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Walking => Self::Noclip,
            Self::Noclip => Self::Walking,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Walking => "WALKING",
            Self::Noclip => "NOCLIP (Flying)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Eye position in world space (Y up). The feet are `height` below.
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Eye height above the feet.
    pub height: f32,
    /// Horizontal collision radius.
    pub radius: f32,

    // Written only by the locomotion step; read through accessors.
    pub(super) velocity: Vec3,
    pub(super) grounded: bool,
    pub(super) mode: LocomotionMode,
}

impl Player {
    pub fn new(position: Vec3, yaw: f32, pitch: f32, height: f32, radius: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            height,
            radius,
            velocity: Vec3::ZERO,
            grounded: false,
            mode: LocomotionMode::Walking,
        }
    }

    pub fn velocity(&self) -> Vec3 { self.velocity }
    pub fn is_grounded(&self) -> bool { self.grounded }
    pub fn mode(&self) -> LocomotionMode { self.mode }
    pub fn is_noclip(&self) -> bool { self.mode == LocomotionMode::Noclip }

    pub fn feet_y(&self) -> f32 {
        self.position.y - self.height
    }

    /// Flip between walking and noclip. Entering walking clears vertical velocity.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        if self.mode == LocomotionMode::Walking {
            self.velocity.y = 0.0;
        }
        log::debug!("locomotion mode -> {:?}", self.mode);
    }

    /// Integrate a mouse delta (x right, y down) into yaw/pitch.
    /// Yaw is left unbounded; pitch is clamped.
    pub fn apply_look(&mut self, mouse_delta: Vec2, sensitivity: f32) {
        self.yaw += mouse_delta.x * sensitivity;
        self.pitch -= mouse_delta.y * sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Unit view direction including pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
    }

    /// Unit view direction projected onto the ground plane.
    pub fn flat_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(cos_yaw, 0.0, sin_yaw).normalize()
    }
}

/// Right-hand side vector for a given facing.
pub fn right_of(forward: Vec3) -> Vec3 {
    forward.cross(Vec3::Y).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn player() -> Player {
        Player::new(Vec3::new(0.0, 1.8, 10.0), -90.0, 0.0, 1.8, 0.3)
    }

    #[test]
    fn starts_walking_and_airborne() {
        let p = player();
        assert_eq!(p.mode(), LocomotionMode::Walking);
        assert!(!p.is_grounded());
        assert_eq!(p.velocity(), Vec3::ZERO);
    }

    #[test]
    fn look_moves_yaw_right_and_pitch_up_for_mouse_up() {
        let mut p = player();
        p.apply_look(Vec2::new(10.0, -20.0), 0.1);
        assert!((p.yaw - -89.0).abs() < 1e-5);
        assert!((p.pitch - 2.0).abs() < 1e-5);
    }

    #[test]
    fn pitch_clamps_at_limits() {
        let mut p = player();
        p.apply_look(Vec2::new(0.0, -100_000.0), 0.1);
        assert_eq!(p.pitch, PITCH_LIMIT);
        p.apply_look(Vec2::new(0.0, 100_000.0), 0.1);
        assert_eq!(p.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn pitch_stays_bounded_under_random_input() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut p = player();
        for _ in 0..10_000 {
            let delta = Vec2::new(rng.gen_range(-500.0..500.0), rng.gen_range(-500.0..500.0));
            p.apply_look(delta, rng.gen_range(0.01..0.5));
            assert!(p.pitch >= -PITCH_LIMIT && p.pitch <= PITCH_LIMIT);
        }
    }

    #[test]
    fn yaw_accumulates_without_wrapping() {
        let mut p = player();
        for _ in 0..10 {
            p.apply_look(Vec2::new(1000.0, 0.0), 0.1);
        }
        assert!((p.yaw - 910.0).abs() < 1e-3);
    }

    #[test]
    fn initial_facing_is_negative_z() {
        let p = player();
        assert!(p.forward().abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-6));
        assert!(right_of(p.forward()).abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn flat_forward_ignores_pitch() {
        let mut p = player();
        p.yaw = 30.0;
        p.pitch = 60.0;
        let flat = p.flat_forward();
        assert_eq!(flat.y, 0.0);
        assert!((flat.length() - 1.0).abs() < 1e-6);
        let f = p.forward();
        assert!((f.length() - 1.0).abs() < 1e-6);
        assert!(f.y > 0.8);
    }

    #[test]
    fn toggling_into_walking_clears_vertical_velocity() {
        let mut p = player();
        p.toggle_mode();
        assert!(p.is_noclip());
        p.velocity = Vec3::new(1.0, 5.0, 1.0);
        p.toggle_mode();
        assert_eq!(p.mode(), LocomotionMode::Walking);
        assert_eq!(p.velocity().y, 0.0);
    }
}
