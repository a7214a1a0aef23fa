// Window mode switching (windowed / borderless / exclusive fullscreen).
//
// The settings menu and F11 only change the *requested* mode. The host
// applies it to the OS window once per change via `take_pending()`.

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::{Fullscreen, Window};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Windowed,
    Borderless,
    Exclusive,
}

impl WindowMode {
    pub const ALL: [WindowMode; 3] = [WindowMode::Windowed, WindowMode::Borderless, WindowMode::Exclusive];

    pub fn label(self) -> &'static str {
        match self {
            WindowMode::Windowed => "Windowed",
            WindowMode::Borderless => "Borderless Fullscreen",
            WindowMode::Exclusive => "Exclusive Fullscreen",
        }
    }
}

/// Requested vs applied window mode.
#[derive(Debug, Clone)]
pub struct WindowModeState {
    requested: WindowMode,
    applied: WindowMode,
}

impl WindowModeState {
    /// The window starts out in `initial`; nothing is pending.
    pub fn new(initial: WindowMode) -> Self {
        Self {
            requested: initial,
            applied: initial,
        }
    }

    pub fn requested(&self) -> WindowMode { self.requested }
    pub fn applied(&self) -> WindowMode { self.applied }

    pub fn request(&mut self, mode: WindowMode) {
        self.requested = mode;
    }

    /// F11: windowed <-> borderless. Exclusive drops back to windowed.
    pub fn toggle_borderless(&mut self) {
        self.requested = match self.requested {
            WindowMode::Windowed => WindowMode::Borderless,
            WindowMode::Borderless | WindowMode::Exclusive => WindowMode::Windowed,
        };
    }

    /// The mode to apply, once per change. Marks it applied.
    pub fn take_pending(&mut self) -> Option<WindowMode> {
        if self.requested == self.applied {
            return None;
        }
        self.applied = self.requested;
        Some(self.applied)
    }
}

/// Apply `mode` to the OS window. Returns the mode actually in effect.
pub fn apply_window_mode(window: &Window, mode: WindowMode, default_size: (u32, u32)) -> WindowMode {
    log::info!("applying window mode: {}", mode.label());

    let monitor = window.current_monitor();
    if let Some(m) = &monitor {
        let size = m.size();
        log::info!("monitor {:?}: {}x{}", m.name(), size.width, size.height);
    }

    // Leave any fullscreen state first
    window.set_fullscreen(None);

    match mode {
        WindowMode::Windowed => {}
        WindowMode::Borderless => {
            window.set_fullscreen(Some(Fullscreen::Borderless(monitor)));
            return mode;
        }
        WindowMode::Exclusive => {
            let video_mode = monitor.as_ref().and_then(|m| {
                m.video_modes().max_by_key(|v| {
                    let size = v.size();
                    (size.width * size.height, v.refresh_rate_millihertz())
                })
            });
            match video_mode {
                Some(video_mode) => {
                    window.set_fullscreen(Some(Fullscreen::Exclusive(video_mode)));
                    return mode;
                }
                None => log::warn!("no exclusive video mode available, falling back to windowed"),
            }
        }
    }

    window.set_decorations(true);
    window.set_resizable(true);
    let (width, height) = default_size;
    let _ = window.request_inner_size(PhysicalSize::new(width, height));
    if let Some(m) = monitor {
        let origin = m.position();
        let size = m.size();
        let x = origin.x + (size.width as i32 - width as i32) / 2;
        let y = origin.y + (size.height as i32 - height as i32) / 2;
        window.set_outer_position(PhysicalPosition::new(x, y));
    }
    WindowMode::Windowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_pending_initially() {
        let mut state = WindowModeState::new(WindowMode::Windowed);
        assert_eq!(state.take_pending(), None);
    }

    #[test]
    fn toggle_cycles_windowed_and_borderless() {
        let mut state = WindowModeState::new(WindowMode::Windowed);
        state.toggle_borderless();
        assert_eq!(state.requested(), WindowMode::Borderless);
        assert_eq!(state.applied(), WindowMode::Windowed);
        assert_eq!(state.take_pending(), Some(WindowMode::Borderless));
        assert_eq!(state.take_pending(), None);

        state.toggle_borderless();
        assert_eq!(state.take_pending(), Some(WindowMode::Windowed));
    }

    #[test]
    fn toggle_from_exclusive_returns_to_windowed() {
        let mut state = WindowModeState::new(WindowMode::Windowed);
        state.request(WindowMode::Exclusive);
        assert_eq!(state.take_pending(), Some(WindowMode::Exclusive));
        state.toggle_borderless();
        assert_eq!(state.take_pending(), Some(WindowMode::Windowed));
    }

    #[test]
    fn request_and_revert_before_apply_is_a_no_op() {
        let mut state = WindowModeState::new(WindowMode::Windowed);
        state.request(WindowMode::Borderless);
        state.request(WindowMode::Windowed);
        assert_eq!(state.take_pending(), None);
    }
}
