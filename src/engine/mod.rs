// Engine module - first-person controller core plus host-side helpers
// Core (no windowing/GPU types): collision, player, locomotion, systems, camera, scene
// Host: input, settings, frame_stats, window_mode, debug_overlay

pub mod camera;
pub mod collision;
pub mod debug_overlay;
pub mod frame_stats;
pub mod input;
pub mod locomotion;
pub mod player;
pub mod scene;
pub mod settings;
pub mod systems;
pub mod window_mode;

// Re-export commonly used items
pub use camera::{CameraView, FirstPersonCamera};
pub use collision::CollisionBox;
pub use player::Player;
pub use systems::{PlayerController, TickReport};
