// Per-frame player update
// Order within a frame: mode toggle -> active locomotion (look first) -> camera

use super::camera::CameraView;
use super::collision::{self, CollisionBox};
use super::locomotion::{MovementConfig, PlayerInput};
use super::player::Player;

/// What one tick produced, for the camera and the debug overlay.
#[derive(Debug, Clone, Copy)]
pub struct TickReport {
    pub view: CameraView,
    /// Obstacle tests run by the locomotion step.
    pub collision_checks: usize,
    /// Obstacles the player box overlaps after the move.
    pub contacts: usize,
}

pub struct PlayerController {
    pub config: MovementConfig,
}

impl PlayerController {
    pub fn new(config: MovementConfig) -> Self {
        Self { config }
    }

    /// Advance the player one frame. The obstacle set is only read.
    pub fn tick(
        &self,
        player: &mut Player,
        input: &PlayerInput,
        obstacles: &[CollisionBox],
        dt: f32,
    ) -> TickReport {
        if input.toggle_mode {
            player.toggle_mode();
        }

        let collision_checks = player
            .mode()
            .locomotion()
            .update(player, input, obstacles, &self.config, dt);

        let contacts = obstacles
            .iter()
            .filter(|obstacle| collision::overlaps(player.position, player.radius, player.height, obstacle))
            .count();

        TickReport {
            view: CameraView::from_player(player),
            collision_checks,
            contacts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::player::LocomotionMode;
    use glam::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn walking_player() -> Player {
        Player::new(Vec3::new(0.0, 1.8, 10.0), -90.0, 0.0, 1.8, 0.3)
    }

    #[test]
    fn toggle_switches_strategy_on_the_same_tick() {
        let controller = PlayerController::new(MovementConfig::default());
        let mut player = walking_player();
        player.position.y = 10.0;

        let toggle = PlayerInput { toggle_mode: true, ..Default::default() };
        controller.tick(&mut player, &toggle, &[], DT);
        assert_eq!(player.mode(), LocomotionMode::Noclip);
        // Noclip ran: no gravity applied
        assert_eq!(player.position.y, 10.0);
        assert_eq!(player.velocity(), Vec3::ZERO);

        controller.tick(&mut player, &toggle, &[], DT);
        assert_eq!(player.mode(), LocomotionMode::Walking);
        // Walking ran: gravity started
        assert!(player.velocity().y < 0.0);
        assert!(player.position.y < 10.0);
    }

    #[test]
    fn camera_view_reflects_post_update_pose() {
        let controller = PlayerController::new(MovementConfig::default());
        let mut player = walking_player();
        let input = PlayerInput {
            forward: true,
            mouse_delta: glam::Vec2::new(0.0, -100.0),
            ..Default::default()
        };
        let report = controller.tick(&mut player, &input, &[], DT);
        assert_eq!(report.view.position, player.position);
        assert!((player.pitch - 10.0).abs() < 1e-4);
        assert!(report.view.target.y > report.view.position.y);
    }

    #[test]
    fn reports_collision_work_and_contacts() {
        let controller = PlayerController::new(MovementConfig::default());
        let cube = CollisionBox::new(Vec3::new(0.0, 1.0, 0.0), Vec3::splat(2.0), [1.0, 0.0, 0.0]);
        let mut player = Player::new(Vec3::new(1.25, 1.8, 0.0), 180.0, 0.0, 1.8, 0.3);

        let report = controller.tick(&mut player, &PlayerInput::default(), &[cube, cube], DT);
        // One horizontal and one ground pass per obstacle
        assert_eq!(report.collision_checks, 4);
        assert!((player.position.x - 1.3).abs() < 1e-4);

        let mut flying = walking_player();
        flying.toggle_mode();
        let report = controller.tick(&mut flying, &PlayerInput::default(), &[cube], DT);
        assert_eq!(report.collision_checks, 0);
        assert_eq!(report.contacts, 0);
    }
}
