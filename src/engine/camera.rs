// First-person camera
//
// Camera model:
//   - The eye sits at the player position (the position already is eye level)
//   - The look target is one unit along the full 3D forward (pitch included)
//   - No state of its own besides projection parameters; the view is
//     re-derived from the Player every frame after locomotion runs

use glam::{Mat4, Vec3};
use super::player::Player;

/// Eye position and look target for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraView {
    pub fn from_player(player: &Player) -> Self {
        Self {
            position: player.position,
            target: player.position + player.forward(),
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }
}

pub struct FirstPersonCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl FirstPersonCamera {
    pub fn new(fov: f32) -> Self {
        Self {
            fov,
            near: 0.1,
            far: 200.0,
        }
    }

    /// Perspective projection matrix.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far)
    }

    /// Combined view-projection matrix ready to upload to the GPU.
    pub fn view_projection(&self, view: &CameraView, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * view.view_matrix()
    }
}
