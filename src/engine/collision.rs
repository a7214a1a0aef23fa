// Axis-aligned box collision for the first-person player.
//
// The player is treated as an upright box: half-width = radius on X/Z,
// top at the eye position, bottom `height` below it. Obstacles are static
// boxes given by center + full extent. Everything here is stateless.

use glam::Vec3;

/// Feet within this distance below a box top count as "standing on it"
/// and are left to ground-snap instead of being pushed sideways.
pub const STEP_ON_TOLERANCE: f32 = 0.1;

// ============================================================================
// SHAPES
// ============================================================================

/// Static obstacle: center position and full size (width, height, depth).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    pub position: Vec3,
    pub size: Vec3,
    /// RGB, only read by the renderer.
    pub color: [f32; 3],
}

impl CollisionBox {
    pub fn new(position: Vec3, size: Vec3, color: [f32; 3]) -> Self {
        Self { position, size, color }
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_center_size(self.position, self.size)
    }
}

/// Min/max corners. Derived on demand, never stored on obstacles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box approximation of the player's cylinder, hanging below the eye.
    pub fn player(eye: Vec3, radius: f32, height: f32) -> Self {
        Self {
            min: Vec3::new(eye.x - radius, eye.y - height, eye.z - radius),
            max: Vec3::new(eye.x + radius, eye.y, eye.z + radius),
        }
    }

    /// Inclusive overlap on all three axes.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Strict X/Z footprint overlap against a circle-as-square of `radius` at `pos`.
    pub fn footprint_overlaps(&self, pos: Vec3, radius: f32) -> bool {
        pos.x + radius > self.min.x
            && pos.x - radius < self.max.x
            && pos.z + radius > self.min.z
            && pos.z - radius < self.max.z
    }
}

// ============================================================================
// QUERIES
// ============================================================================

/// Full 3D overlap between the player box and an obstacle.
pub fn overlaps(eye: Vec3, radius: f32, height: f32, obstacle: &CollisionBox) -> bool {
    BoundingBox::player(eye, radius, height).intersects(&obstacle.bounds())
}

/// Whether the obstacle should push the player sideways this frame.
///
/// False when the footprints don't touch, when the feet are at or above the
/// top minus [`STEP_ON_TOLERANCE`] (standing on it), or when the eye is
/// below the bottom of the box.
pub fn should_resolve_horizontally(
    eye: Vec3,
    radius: f32,
    height: f32,
    obstacle: &CollisionBox,
) -> bool {
    let bounds = obstacle.bounds();

    if !bounds.footprint_overlaps(eye, radius) {
        return false;
    }

    let feet_y = eye.y - height;
    if feet_y >= bounds.max.y - STEP_ON_TOLERANCE {
        return false;
    }

    if eye.y < bounds.min.y {
        return false;
    }

    true
}

/// Push the player out of an obstacle along a single horizontal axis.
///
/// Per axis the signed overlap of smaller magnitude is the candidate; of the
/// X and Z candidates, the smaller one is applied. Ties go to Z.
pub fn resolve_push_out(eye: Vec3, radius: f32, obstacle: &CollisionBox) -> Vec3 {
    let bounds = obstacle.bounds();

    let enter_neg_x = (eye.x + radius) - bounds.min.x;
    let enter_pos_x = bounds.max.x - (eye.x - radius);
    let enter_neg_z = (eye.z + radius) - bounds.min.z;
    let enter_pos_z = bounds.max.z - (eye.z - radius);

    let push_x = if enter_neg_x < enter_pos_x { -enter_neg_x } else { enter_pos_x };
    let push_z = if enter_neg_z < enter_pos_z { -enter_neg_z } else { enter_pos_z };

    let mut resolved = eye;
    if push_x.abs() < push_z.abs() {
        resolved.x += push_x;
    } else {
        resolved.z += push_z;
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADIUS: f32 = 0.3;
    const HEIGHT: f32 = 1.8;

    fn center_cube() -> CollisionBox {
        CollisionBox::new(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(2.0), [1.0, 0.0, 0.0])
    }

    #[test]
    fn bounds_are_center_plus_minus_half_size() {
        let b = CollisionBox::new(Vec3::new(3.0, 0.5, -3.0), Vec3::new(0.5, 1.0, 0.5), [0.0; 3]);
        let bounds = b.bounds();
        assert_eq!(bounds.min, Vec3::new(2.75, 0.0, -3.25));
        assert_eq!(bounds.max, Vec3::new(3.25, 1.0, -2.75));
    }

    #[test]
    fn player_box_hangs_below_eye() {
        let b = BoundingBox::player(Vec3::new(1.0, 1.8, 2.0), RADIUS, HEIGHT);
        assert!(b.min.abs_diff_eq(Vec3::new(0.7, 0.0, 1.7), 1e-6));
        assert!(b.max.abs_diff_eq(Vec3::new(1.3, 1.8, 2.3), 1e-6));
    }

    #[test]
    fn overlap_detects_touching_and_separated() {
        let cube = center_cube();
        assert!(overlaps(Vec3::new(0.0, 1.8, 0.0), RADIUS, HEIGHT, &cube));
        assert!(overlaps(Vec3::new(1.29, 1.8, 0.0), RADIUS, HEIGHT, &cube));
        assert!(!overlaps(Vec3::new(1.31, 1.8, 0.0), RADIUS, HEIGHT, &cube));
        // Feet well above the top
        assert!(!overlaps(Vec3::new(0.0, 4.0, 0.0), RADIUS, HEIGHT, &cube));
    }

    #[test]
    fn no_horizontal_resolution_without_footprint_overlap() {
        let cube = center_cube();
        assert!(!should_resolve_horizontally(Vec3::new(1.35, 1.8, 0.0), RADIUS, HEIGHT, &cube));
        assert!(!should_resolve_horizontally(Vec3::new(0.0, 1.8, -1.5), RADIUS, HEIGHT, &cube));
    }

    #[test]
    fn standing_on_top_is_not_pushed() {
        let cube = center_cube();
        // Feet exactly on the top
        assert!(!should_resolve_horizontally(Vec3::new(0.9, 3.8, 0.0), RADIUS, HEIGHT, &cube));
        // Feet just inside the tolerance band
        assert!(!should_resolve_horizontally(Vec3::new(0.9, 3.75, 0.0), RADIUS, HEIGHT, &cube));
    }

    #[test]
    fn feet_below_tolerance_are_pushed() {
        let cube = center_cube();
        assert!(should_resolve_horizontally(Vec3::new(1.2, 3.6, 0.0), RADIUS, HEIGHT, &cube));
        assert!(should_resolve_horizontally(Vec3::new(1.2, 1.8, 0.0), RADIUS, HEIGHT, &cube));
    }

    #[test]
    fn eye_below_box_bottom_is_not_pushed() {
        let floating = CollisionBox::new(Vec3::new(0.0, 5.0, 0.0), Vec3::splat(2.0), [0.0; 3]);
        assert!(!should_resolve_horizontally(Vec3::new(0.5, 1.8, 0.0), RADIUS, HEIGHT, &floating));
    }

    #[test]
    fn push_out_along_shallow_x_leaves_z_alone() {
        let cube = center_cube();
        let resolved = resolve_push_out(Vec3::new(1.2, 1.8, 0.25), RADIUS, &cube);
        assert!((resolved.x - 1.3).abs() < 1e-5);
        assert_eq!(resolved.y, 1.8);
        assert_eq!(resolved.z, 0.25);
    }

    #[test]
    fn push_out_picks_negative_direction_from_min_side() {
        let cube = center_cube();
        let resolved = resolve_push_out(Vec3::new(0.2, 1.8, -1.1), RADIUS, &cube);
        assert_eq!(resolved.x, 0.2);
        assert!((resolved.z - -1.3).abs() < 1e-5);
    }

    #[test]
    fn push_out_is_single_axis_at_corners() {
        let cube = center_cube();
        // X overlap 0.1, Z overlap 0.2: only X moves
        let resolved = resolve_push_out(Vec3::new(1.2, 1.8, 1.1), RADIUS, &cube);
        assert!((resolved.x - 1.3).abs() < 1e-5);
        assert_eq!(resolved.z, 1.1);
    }

    #[test]
    fn equal_penetration_pushes_along_z() {
        let cube = center_cube();
        // X and Z overlap are both 0.1
        let resolved = resolve_push_out(Vec3::new(1.2, 1.8, 1.2), RADIUS, &cube);
        assert_eq!(resolved.x, 1.2);
        assert_eq!(resolved.y, 1.8);
        assert!((resolved.z - 1.3).abs() < 1e-5);
    }
}
