use egui::epaint::Shadow;
use egui::{Align2, Color32, Id, LayerId, Order};

use super::frame_stats::{FrameStats, HISTORY_SIZE};
use super::player::Player;
use super::settings::{GameSettings, FOV_RANGE, MOVE_SPEED_RANGE, SENSITIVITY_RANGE, TARGET_FPS_RANGE};
use super::window_mode::WindowMode;

/// Frame time (ms) at the top of the graph; ~30 fps.
const GRAPH_CEILING_MS: f32 = 33.33;
const GRAPH_WARN_MS: f32 = 16.67;

/// Read-only view of the game for the HUD and the F3 panel.
pub struct HudInfo<'a> {
    pub player: &'a Player,
    pub obstacle_count: usize,
    pub collision_checks: usize,
    pub contacts: usize,
    pub resolution: (u32, u32),
    pub cursor_locked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    Resume,
    Exit,
}

pub struct DebugOverlay {
    /// F3 stats panel.
    pub visible: bool,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl DebugOverlay {
    pub fn new(
        window: &winit::window::Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let egui_ctx = egui::Context::default();

        // Style: dark, semi-transparent, small monospace white font
        let mut visuals = egui::Visuals::dark();
        visuals.window_fill = Color32::from_rgba_premultiplied(0, 0, 0, 200);
        visuals.window_shadow = Shadow::NONE;
        visuals.override_text_color = Some(Color32::WHITE);
        egui_ctx.set_visuals(visuals);

        let mut style = (*egui_ctx.style()).clone();
        style.override_font_id = Some(egui::FontId::monospace(14.0));
        egui_ctx.set_style(style);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            None,  // no depth
            1,     // msaa samples
            false, // no dithering
        );

        Self {
            visible: false,
            egui_ctx,
            egui_state,
            egui_renderer,
        }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn handle_window_event(
        &mut self,
        window: &winit::window::Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// Render one egui frame: crosshair, HUD, player status, FPS counter,
    /// the F3 panel when `visible`, and the settings menu when `menu_open`.
    ///
    /// The settings menu edits `settings` in place.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        window: &winit::window::Window,
        view: &wgpu::TextureView,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
        hud: &HudInfo,
        stats: &FrameStats,
        settings: &mut GameSettings,
        menu_open: bool,
    ) -> MenuAction {
        let raw_input = self.egui_state.take_egui_input(window);
        let show_debug = self.visible;
        let mut action = MenuAction::None;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            draw_crosshair(ctx);
            draw_hud(ctx, hud.player);
            draw_status(ctx, hud.player);

            if settings.show_fps {
                egui::Area::new(Id::new("fps_counter"))
                    .anchor(Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
                    .show(ctx, |ui| {
                        ui.colored_label(Color32::GREEN, format!("{:.0} FPS", stats.avg_fps));
                    });
            }

            if show_debug {
                draw_debug_panel(ctx, hud, stats, settings);
            }

            if menu_open {
                action = draw_settings_menu(ctx, settings);
            }
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, &tris, screen_descriptor);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.egui_renderer
                .render(&mut render_pass.forget_lifetime(), &tris, screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        action
    }
}

// ============================================================================
// LAYERS
// ============================================================================

fn panel_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(Color32::from_rgba_premultiplied(0, 0, 0, 128))
        .inner_margin(egui::Margin::same(8.0))
        .rounding(4.0)
}

fn draw_crosshair(ctx: &egui::Context) {
    let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("crosshair")));
    let c = ctx.screen_rect().center();
    let stroke = egui::Stroke::new(1.5, Color32::WHITE);
    painter.line_segment([c - egui::vec2(10.0, 0.0), c + egui::vec2(10.0, 0.0)], stroke);
    painter.line_segment([c - egui::vec2(0.0, 10.0), c + egui::vec2(0.0, 10.0)], stroke);
}

fn draw_hud(ctx: &egui::Context, player: &Player) {
    egui::Area::new(Id::new("hud"))
        .fixed_pos(egui::pos2(10.0, 10.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui: &mut egui::Ui| {
                let mode_color = if player.is_noclip() { Color32::YELLOW } else { Color32::GREEN };
                ui.colored_label(mode_color, format!("MODE: {}", player.mode().label()));
                if player.is_noclip() {
                    ui.label("WASD - Fly horizontally");
                    ui.label("Space/Shift - Fly up/down");
                } else {
                    ui.label("WASD - Walk");
                    ui.label("Space - Jump");
                }
                ui.label("Mouse - Look around");
                ui.label("Ctrl - Sprint");
                ui.colored_label(Color32::ORANGE, "V - Toggle noclip");
                ui.label("Tab - Toggle mouse lock");
                ui.colored_label(Color32::YELLOW, "ESC - Settings | F3 - Debug");
            });
        });
}

fn draw_status(ctx: &egui::Context, player: &Player) {
    egui::Area::new(Id::new("player_status"))
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui: &mut egui::Ui| {
                let p = player.position;
                ui.label(format!("Position: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z));
                ui.label(format!(
                    "Grounded: {} | Vel Y: {:.1}",
                    if player.is_grounded() { "Yes" } else { "No" },
                    player.velocity().y
                ));
            });
        });
}

fn draw_debug_panel(ctx: &egui::Context, hud: &HudInfo, stats: &FrameStats, settings: &GameSettings) {
    egui::Area::new(Id::new("debug_overlay"))
        .anchor(Align2::RIGHT_TOP, egui::vec2(-10.0, 40.0))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(Color32::from_rgba_premultiplied(0, 0, 0, 200))
                .stroke(egui::Stroke::new(1.0, Color32::GREEN))
                .inner_margin(egui::Margin::same(8.0))
                .rounding(4.0)
                .show(ui, |ui: &mut egui::Ui| {
                    ui.colored_label(Color32::GREEN, "DEBUG / PERFORMANCE");

                    ui.colored_label(Color32::YELLOW, "-- Frame Timing --");
                    ui.label(format!("Current: {:.2} ms ({:.0} FPS)", stats.current_frame_ms, stats.current_fps));
                    ui.label(format!("Average: {:.2} ms ({:.0} FPS)", stats.avg_frame_ms, stats.avg_fps));
                    ui.colored_label(
                        Color32::GREEN,
                        format!("Min: {:.2} ms ({:.0} FPS)", stats.min_frame_ms, stats.max_fps),
                    );
                    ui.colored_label(
                        Color32::RED,
                        format!("Max: {:.2} ms ({:.0} FPS)", stats.max_frame_ms, stats.min_fps),
                    );

                    ui.colored_label(Color32::YELLOW, format!("Frame Time Graph (last {HISTORY_SIZE} frames):"));
                    draw_frame_graph(ui, stats);

                    let player = hud.player;
                    let (p, v) = (player.position, player.velocity());
                    ui.colored_label(Color32::YELLOW, "-- Player State --");
                    ui.label(format!("Pos: ({:.2}, {:.2}, {:.2})  Feet: {:.2}", p.x, p.y, p.z, player.feet_y()));
                    ui.label(format!("Vel: ({:.2}, {:.2}, {:.2})", v.x, v.y, v.z));
                    ui.label(format!("Yaw: {:.1}  Pitch: {:.1}", player.yaw, player.pitch));
                    ui.colored_label(
                        if player.is_grounded() { Color32::GREEN } else { Color32::RED },
                        format!(
                            "Grounded: {}  Noclip: {}",
                            if player.is_grounded() { "YES" } else { "NO" },
                            if player.is_noclip() { "YES" } else { "NO" },
                        ),
                    );
                    ui.label(format!("Collision checks: {}  Contacts: {}", hud.collision_checks, hud.contacts));

                    ui.colored_label(Color32::YELLOW, "-- System --");
                    ui.label(format!("Window: {}x{}", hud.resolution.0, hud.resolution.1));
                    ui.label(format!(
                        "Colliders: {}  Target FPS: {}",
                        hud.obstacle_count,
                        settings.fps_label()
                    ));
                    ui.label(format!("Mouse lock: {}", if hud.cursor_locked { "on" } else { "off" }));
                    ui.colored_label(
                        Color32::GRAY,
                        format!("Total Frames: {}  Time: {:.1}s", stats.frame_count, stats.total_time),
                    );
                });
        });
}

fn draw_frame_graph(ui: &mut egui::Ui, stats: &FrameStats) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(280.0, 50.0), egui::Sense::hover());
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, Color32::from_rgba_premultiplied(40, 40, 40, 128));
    painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::GRAY));

    // Newest frame at the right edge, the graph fills in from the right
    let bar_width = rect.width() / HISTORY_SIZE as f32;
    let first_slot = HISTORY_SIZE.saturating_sub(stats.history_len());
    for (i, frame_ms) in stats.history().enumerate() {
        let bar_height = (frame_ms / GRAPH_CEILING_MS * rect.height()).min(rect.height());
        let color = if frame_ms > GRAPH_CEILING_MS {
            Color32::RED
        } else if frame_ms > GRAPH_WARN_MS {
            Color32::YELLOW
        } else {
            Color32::GREEN
        };
        let x = rect.left() + (first_slot + i) as f32 * bar_width;
        painter.rect_filled(
            egui::Rect::from_min_max(
                egui::pos2(x, rect.bottom() - bar_height),
                egui::pos2(x + bar_width, rect.bottom()),
            ),
            0.0,
            color,
        );
    }
}

fn draw_settings_menu(ctx: &egui::Context, settings: &mut GameSettings) -> MenuAction {
    let mut action = MenuAction::None;

    ctx.layer_painter(LayerId::new(Order::Background, Id::new("menu_dim")))
        .rect_filled(ctx.screen_rect(), 0.0, Color32::from_black_alpha(180));

    egui::Window::new("SETTINGS")
        .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .show(ctx, |ui| {
            ui.spacing_mut().slider_width = 300.0;

            ui.label(format!("Target FPS: {}", settings.fps_label()));
            ui.add(
                egui::Slider::new(&mut settings.target_fps, TARGET_FPS_RANGE)
                    .show_value(false),
            );
            ui.add_space(8.0);

            ui.label(format!("Mouse Sensitivity: {:.2}", settings.mouse_sensitivity));
            ui.add(egui::Slider::new(&mut settings.mouse_sensitivity, SENSITIVITY_RANGE).show_value(false));
            ui.add_space(8.0);

            ui.label(format!("Field of View: {:.0}", settings.fov));
            ui.add(egui::Slider::new(&mut settings.fov, FOV_RANGE).show_value(false));
            ui.add_space(8.0);

            ui.label(format!("Move Speed: {:.1}", settings.move_speed));
            ui.add(egui::Slider::new(&mut settings.move_speed, MOVE_SPEED_RANGE).show_value(false));
            ui.add_space(8.0);

            ui.checkbox(&mut settings.show_fps, "Show FPS Counter");
            ui.checkbox(&mut settings.vsync, "VSync");
            ui.add_space(8.0);

            egui::ComboBox::from_label("Window Mode (F11)")
                .selected_text(settings.window_mode.label())
                .show_ui(ui, |ui| {
                    for mode in WindowMode::ALL {
                        ui.selectable_value(&mut settings.window_mode, mode, mode.label());
                    }
                });
            ui.add_space(16.0);

            let button_size = egui::vec2(ui.available_width(), 36.0);
            if ui.add_sized(button_size, egui::Button::new("Resume Game (ESC)")).clicked() {
                action = MenuAction::Resume;
            }
            if ui.add_sized(button_size, egui::Button::new("Exit Game")).clicked() {
                action = MenuAction::Exit;
            }
        });

    action
}
