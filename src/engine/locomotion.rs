// Locomotion strategies for the first-person player.
//
// Each frame exactly one strategy mutates the Player: Walking (gravity,
// jump, box collision, ground-snap) or Noclip (free flight, no collision).
// Both run the look step first.

use glam::{Vec2, Vec3};

use super::collision::{self, CollisionBox};
use super::player::{right_of, LocomotionMode, Player};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Feet this close above the floor level count as touching it.
pub const FLOOR_TOLERANCE: f32 = 0.05;
/// Ground-snap band relative to an obstacle top: [top - BELOW, top + ABOVE].
pub const SNAP_BAND_BELOW: f32 = 0.5;
pub const SNAP_BAND_ABOVE: f32 = 0.05;
/// Vertical speeds at or below this count as falling or resting.
pub const RESTING_VELOCITY: f32 = 0.01;

// ============================================================================
// INPUT & CONFIG
// ============================================================================

/// One frame of player input, already decoupled from the windowing layer.
///
/// `jump` and `toggle_mode` are edge-triggered: true only on the frame the
/// key went down. Everything else reflects keys currently held.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub sprint: bool,
    pub jump: bool,
    pub toggle_mode: bool,
    /// Raw mouse motion this frame (x right, y down).
    pub mouse_delta: Vec2,
}

/// Tuning for both locomotion modes.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    /// Walking speed (units/second).
    pub move_speed: f32,
    /// Degrees of rotation per pixel of mouse motion.
    pub mouse_sensitivity: f32,
    /// Downward acceleration (units/second²).
    pub gravity: f32,
    /// Upward velocity set on jump (units/second).
    pub jump_force: f32,
    /// Height of the world floor.
    pub floor_level: f32,
    pub walk_sprint_multiplier: f32,
    pub noclip_sprint_multiplier: f32,
    /// Noclip base speed relative to `move_speed`.
    pub noclip_speed_scale: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 7.0,
            mouse_sensitivity: 0.1,
            gravity: 20.0,
            jump_force: 8.0,
            floor_level: 0.0,
            walk_sprint_multiplier: 2.0,
            noclip_sprint_multiplier: 2.5,
            noclip_speed_scale: 1.5,
        }
    }
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Per-frame update for one locomotion mode.
pub trait Locomotion {
    /// Advance `player` by `dt` seconds. Returns the number of obstacle
    /// collision tests performed.
    fn update(
        &self,
        player: &mut Player,
        input: &PlayerInput,
        obstacles: &[CollisionBox],
        config: &MovementConfig,
        dt: f32,
    ) -> usize;
}

pub struct Walking;
pub struct Noclip;

impl LocomotionMode {
    pub fn locomotion(self) -> &'static dyn Locomotion {
        match self {
            LocomotionMode::Walking => &Walking,
            LocomotionMode::Noclip => &Noclip,
        }
    }
}

impl Locomotion for Noclip {
    fn update(
        &self,
        player: &mut Player,
        input: &PlayerInput,
        _obstacles: &[CollisionBox],
        config: &MovementConfig,
        dt: f32,
    ) -> usize {
        player.apply_look(input.mouse_delta, config.mouse_sensitivity);

        let forward = player.forward();
        let right = right_of(forward);

        let mut move_dir = Vec3::ZERO;
        if input.forward { move_dir += forward; }
        if input.backward { move_dir -= forward; }
        if input.right { move_dir += right; }
        if input.left { move_dir -= right; }
        if input.up { move_dir += Vec3::Y; }
        if input.down { move_dir -= Vec3::Y; }

        let mut speed = config.move_speed * config.noclip_speed_scale;
        if input.sprint {
            speed *= config.noclip_sprint_multiplier;
        }

        if move_dir.length_squared() > 0.0 {
            player.position += move_dir.normalize() * speed * dt;
        }

        player.velocity = Vec3::ZERO;
        player.grounded = false;
        0
    }
}

impl Locomotion for Walking {
    fn update(
        &self,
        player: &mut Player,
        input: &PlayerInput,
        obstacles: &[CollisionBox],
        config: &MovementConfig,
        dt: f32,
    ) -> usize {
        player.apply_look(input.mouse_delta, config.mouse_sensitivity);

        // --- Horizontal intent (pitch ignored) ---
        let forward = player.flat_forward();
        let right = right_of(forward);

        let mut move_dir = Vec3::ZERO;
        if input.forward { move_dir += forward; }
        if input.backward { move_dir -= forward; }
        if input.right { move_dir += right; }
        if input.left { move_dir -= right; }

        if move_dir.length_squared() > 0.0 {
            move_dir = move_dir.normalize();
        }

        let mut speed = config.move_speed;
        if input.sprint {
            speed *= config.walk_sprint_multiplier;
        }

        player.velocity.x = move_dir.x * speed;
        player.velocity.z = move_dir.z * speed;

        // --- Gravity, then jump ---
        if !player.grounded {
            player.velocity.y -= config.gravity * dt;
        }

        if input.jump && player.grounded {
            player.velocity.y = config.jump_force;
            player.grounded = false;
        }

        // --- Horizontal move + push-out, obstacles in order ---
        let mut candidate = player.position;
        candidate.x += player.velocity.x * dt;
        candidate.z += player.velocity.z * dt;

        let mut checks = 0;
        for obstacle in obstacles {
            checks += 1;
            if collision::should_resolve_horizontally(candidate, player.radius, player.height, obstacle) {
                candidate = collision::resolve_push_out(candidate, player.radius, obstacle);
            }
        }

        // --- Vertical move ---
        candidate.y += player.velocity.y * dt;

        // --- Ground-snap: highest supporting surface wins ---
        let falling_or_resting = player.velocity.y <= RESTING_VELOCITY;
        let feet_y = candidate.y - player.height;

        let mut ground: Option<f32> = None;
        if feet_y <= config.floor_level + FLOOR_TOLERANCE {
            ground = Some(config.floor_level);
        }

        for obstacle in obstacles {
            checks += 1;
            let bounds = obstacle.bounds();
            if !bounds.footprint_overlaps(candidate, player.radius) {
                continue;
            }
            let top = bounds.max.y;
            let in_band = feet_y <= top + SNAP_BAND_ABOVE && feet_y >= top - SNAP_BAND_BELOW;
            if in_band && falling_or_resting {
                ground = Some(ground.map_or(top, |g| g.max(top)));
            }
        }

        match ground {
            Some(ground_y) if falling_or_resting => {
                if !player.grounded {
                    log::debug!("landed at y={ground_y:.2}");
                }
                candidate.y = ground_y + player.height;
                player.velocity.y = 0.0;
                player.grounded = true;
            }
            _ => player.grounded = false,
        }

        player.position = candidate;
        checks
    }
}
