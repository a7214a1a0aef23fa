// User-facing game settings, edited live from the settings menu.

use std::ops::RangeInclusive;
use std::time::Duration;

use super::locomotion::MovementConfig;
use super::window_mode::WindowMode;

/// Slider value meaning "no frame cap".
pub const UNCAPPED_FPS: u32 = 301;

pub const TARGET_FPS_RANGE: RangeInclusive<u32> = 30..=UNCAPPED_FPS;
pub const SENSITIVITY_RANGE: RangeInclusive<f32> = 0.01..=0.5;
pub const FOV_RANGE: RangeInclusive<f32> = 50.0..=120.0;
pub const MOVE_SPEED_RANGE: RangeInclusive<f32> = 1.0..=20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    pub target_fps: u32,
    pub mouse_sensitivity: f32,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub move_speed: f32,
    pub vsync: bool,
    pub show_fps: bool,
    pub window_mode: WindowMode,
    /// Window size used when returning to windowed mode.
    pub default_size: (u32, u32),
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            mouse_sensitivity: 0.1,
            fov: 70.0,
            move_speed: 7.0,
            vsync: false,
            show_fps: true,
            window_mode: WindowMode::Windowed,
            default_size: (1280, 720),
        }
    }
}

impl GameSettings {
    /// Force every tunable into its slider range.
    pub fn clamp(&mut self) {
        self.target_fps = self.target_fps.clamp(*TARGET_FPS_RANGE.start(), *TARGET_FPS_RANGE.end());
        self.mouse_sensitivity = self.mouse_sensitivity.clamp(*SENSITIVITY_RANGE.start(), *SENSITIVITY_RANGE.end());
        self.fov = self.fov.clamp(*FOV_RANGE.start(), *FOV_RANGE.end());
        self.move_speed = self.move_speed.clamp(*MOVE_SPEED_RANGE.start(), *MOVE_SPEED_RANGE.end());
    }

    pub fn is_uncapped(&self) -> bool {
        self.target_fps >= UNCAPPED_FPS
    }

    /// Minimum time between frames, or None when uncapped.
    pub fn frame_interval(&self) -> Option<Duration> {
        if self.is_uncapped() || self.target_fps == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / self.target_fps as f64))
        }
    }

    pub fn fps_label(&self) -> String {
        if self.is_uncapped() {
            "Uncapped".to_string()
        } else {
            self.target_fps.to_string()
        }
    }

    pub fn movement_config(&self) -> MovementConfig {
        MovementConfig {
            move_speed: self.move_speed,
            mouse_sensitivity: self.mouse_sensitivity,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_in_range() {
        let s = GameSettings::default();
        let mut clamped = s.clone();
        clamped.clamp();
        assert_eq!(s, clamped);
        assert_eq!(s.frame_interval(), Some(Duration::from_secs_f64(1.0 / 60.0)));
    }

    #[test]
    fn clamp_pulls_values_into_range() {
        let mut s = GameSettings {
            target_fps: 5,
            mouse_sensitivity: 3.0,
            fov: 10.0,
            move_speed: 100.0,
            ..Default::default()
        };
        s.clamp();
        assert_eq!(s.target_fps, 30);
        assert_eq!(s.mouse_sensitivity, 0.5);
        assert_eq!(s.fov, 50.0);
        assert_eq!(s.move_speed, 20.0);
    }

    #[test]
    fn top_of_fps_range_is_uncapped() {
        let s = GameSettings { target_fps: UNCAPPED_FPS, ..Default::default() };
        assert!(s.is_uncapped());
        assert_eq!(s.frame_interval(), None);
        assert_eq!(s.fps_label(), "Uncapped");
        let s = GameSettings { target_fps: 144, ..Default::default() };
        assert_eq!(s.fps_label(), "144");
    }

    #[test]
    fn movement_config_carries_speed_and_sensitivity() {
        let s = GameSettings { move_speed: 12.0, mouse_sensitivity: 0.25, ..Default::default() };
        let config = s.movement_config();
        assert_eq!(config.move_speed, 12.0);
        assert_eq!(config.mouse_sensitivity, 0.25);
        assert_eq!(config.gravity, MovementConfig::default().gravity);
    }
}
