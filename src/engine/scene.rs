// Static test scene: one center cube surrounded by a grid of pillars.
// Built once before the frame loop; never mutated afterwards.

use glam::Vec3;

use super::collision::CollisionBox;
use super::player::Player;

const CENTER_CUBE_COLOR: [f32; 3] = [0.90, 0.16, 0.22];
const PILLAR_COLOR: [f32; 3] = [0.0, 0.47, 0.95];
/// World distance between neighbouring pillar grid indices.
const PILLAR_SPACING: f32 = 3.0;

pub const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, 1.8, 10.0);
pub const PLAYER_EYE_HEIGHT: f32 = 1.8;
pub const PLAYER_RADIUS: f32 = 0.3;

pub fn spawn_player() -> Player {
    Player::new(PLAYER_SPAWN, -90.0, 0.0, PLAYER_EYE_HEIGHT, PLAYER_RADIUS)
}

/// Obstacle set in insertion order: the center cube first, then pillars
/// row by row. Pillar heights cycle through 1, 2, 3.
pub fn build_obstacles() -> Vec<CollisionBox> {
    let mut obstacles = vec![CollisionBox::new(
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::splat(2.0),
        CENTER_CUBE_COLOR,
    )];

    for i in (-5i32..=5).step_by(2) {
        for j in (-5i32..=5).step_by(2) {
            if i == 0 && j == 0 {
                continue;
            }
            let height = 1.0 + ((i + j).abs() % 3) as f32;
            obstacles.push(CollisionBox::new(
                Vec3::new(i as f32 * PILLAR_SPACING, height / 2.0, j as f32 * PILLAR_SPACING),
                Vec3::new(0.5, height, 0.5),
                PILLAR_COLOR,
            ));
        }
    }

    log::info!("built scene with {} obstacles", obstacles.len());
    obstacles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_layout() {
        let obstacles = build_obstacles();
        assert_eq!(obstacles.len(), 1 + 36);
        assert_eq!(obstacles[0].bounds().max.y, 2.0);

        for pillar in &obstacles[1..] {
            let bounds = pillar.bounds();
            assert_eq!(bounds.min.y, 0.0);
            assert!([1.0, 2.0, 3.0].contains(&pillar.size.y));
            assert_eq!(pillar.size.x, 0.5);
        }
    }

    #[test]
    fn pillar_height_pattern() {
        let obstacles = build_obstacles();
        // i = -5, j = -5: |−10| % 3 = 1
        assert_eq!(obstacles[1].position, Vec3::new(-15.0, 1.0, -15.0));
        assert_eq!(obstacles[1].size.y, 2.0);
        // i = -5, j = 5: 0 % 3 = 0
        assert_eq!(obstacles[6].size.y, 1.0);
    }

    #[test]
    fn spawn_is_clear_of_obstacles() {
        let player = spawn_player();
        for obstacle in build_obstacles() {
            assert!(!obstacle.bounds().footprint_overlaps(player.position, player.radius));
        }
    }
}
