// First-person walking/noclip demo over an instanced box scene
// Core controller lives in engine/; this file is the windowed host:
// wgpu renderer, winit event loop, egui overlay, settings and window modes

mod engine;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::{
    event::{Event as WinitEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{CursorGrabMode, Window},
};

use engine::debug_overlay::{DebugOverlay, HudInfo, MenuAction};
use engine::frame_stats::FrameStats;
use engine::input::{self, InputState};
use engine::scene;
use engine::settings::GameSettings;
use engine::window_mode::{self, WindowModeState};
use engine::{CameraView, CollisionBox, FirstPersonCamera, Player, PlayerController, TickReport};

const CLEAR_COLOR: wgpu::Color = wgpu::Color { r: 0.53, g: 0.75, b: 0.92, a: 1.0 };
const GROUND_COLOR: [f32; 3] = [0.16, 0.36, 0.18];
const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// ============================================================================
// VERTEX DEFINITION
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

impl Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

// ============================================================================
// INSTANCE DATA (per box)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct InstanceData {
    center: [f32; 3],
    size: [f32; 3],
    color: [f32; 3],
}

impl InstanceData {
    fn from_box(b: &CollisionBox) -> Self {
        Self {
            center: b.position.to_array(),
            size: b.size.to_array(),
            color: b.color,
        }
    }

    fn desc() -> wgpu::VertexBufferLayout<'static> {
        const FIELD: wgpu::BufferAddress = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceData>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                // Center (location 2)
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Size (location 3)
                wgpu::VertexAttribute {
                    offset: FIELD,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // Color (location 4)
                wgpu::VertexAttribute {
                    offset: FIELD * 2,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

// Unit cube faces: (normal, u, v) with u x v = normal, so corners listed
// -u-v, +u-v, +u+v, -u+v wind counter-clockwise seen from outside
const CUBE_FACES: [[Vec3; 3]; 6] = [
    [Vec3::X, Vec3::NEG_Z, Vec3::Y],
    [Vec3::NEG_X, Vec3::Z, Vec3::Y],
    [Vec3::Y, Vec3::X, Vec3::NEG_Z],
    [Vec3::NEG_Y, Vec3::X, Vec3::Z],
    [Vec3::Z, Vec3::X, Vec3::Y],
    [Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y],
];

/// 24 vertices (4 per face, own normals) and 36 indices.
fn cube_mesh() -> (Vec<Vertex>, Vec<u16>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for [normal, u, v] in CUBE_FACES {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let corner = (normal + u * su + v * sv) * 0.5;
            vertices.push(Vertex {
                position: corner.to_array(),
                normal: normal.to_array(),
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// Obstacles in scene order followed by the ground slab.
fn scene_instances(obstacles: &[CollisionBox]) -> Vec<InstanceData> {
    let ground = CollisionBox::new(Vec3::new(0.0, -0.05, 0.0), Vec3::new(50.0, 0.1, 50.0), GROUND_COLOR);
    obstacles
        .iter()
        .chain(std::iter::once(&ground))
        .map(InstanceData::from_box)
        .collect()
}

// ============================================================================
// UNIFORM DATA (camera only)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Grab and hide the cursor for mouse look, or release it.
fn set_cursor_locked(window: &Window, locked: bool) {
    if locked {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Confined)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
        if let Err(e) = grabbed {
            log::warn!("cursor grab unavailable: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        log::warn!("cursor release failed: {e}");
    }
    window.set_cursor_visible(!locked);
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

struct State {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    num_indices: u32,
    num_instances: u32,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    overlay: DebugOverlay,

    // Game
    player: Player,
    obstacles: Vec<CollisionBox>,
    controller: PlayerController,
    last_report: TickReport,

    // Host
    input: InputState,
    settings: GameSettings,
    window_mode: WindowModeState,
    frame_stats: FrameStats,
    last_frame: Instant,
    last_target_fps: u32,
    menu_open: bool,
    cursor_locked: bool,
}

impl State {
    async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let settings = GameSettings::default();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;
        log::info!("using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: present_mode(settings.vsync),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);
        log::info!("surface configured: {:?} {}x{}", surface_format, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader_instanced.wgsl").into()),
        });

        let uniforms = Uniforms {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
        };

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[uniforms]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("uniform_bind_group_layout"),
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("uniform_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::desc(), InstanceData::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let (cube_vertices, cube_indices) = cube_mesh();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Vertex Buffer"),
            contents: bytemuck::cast_slice(&cube_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Index Buffer"),
            contents: bytemuck::cast_slice(&cube_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        // The scene is static: upload every box once
        let obstacles = scene::build_obstacles();
        let instances = scene_instances(&obstacles);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Instance Buffer"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let depth_view = create_depth_view(&device, &config);
        let overlay = DebugOverlay::new(&window, &device, config.format);

        let player = scene::spawn_player();
        let last_report = TickReport {
            view: CameraView::from_player(&player),
            collision_checks: 0,
            contacts: 0,
        };

        let mut input = InputState::new();
        input.window_size = (size.width, size.height);

        set_cursor_locked(&window, true);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            num_indices: cube_indices.len() as u32,
            num_instances: instances.len() as u32,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            overlay,
            player,
            obstacles,
            controller: PlayerController::new(settings.movement_config()),
            last_report,
            input,
            window_mode: WindowModeState::new(settings.window_mode),
            last_target_fps: settings.target_fps,
            settings,
            frame_stats: FrameStats::new(),
            last_frame: Instant::now(),
            menu_open: false,
            cursor_locked: true,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, &self.config);
        }
    }

    fn open_menu(&mut self) {
        self.menu_open = true;
        set_cursor_locked(&self.window, false);
        log::info!("settings menu opened");
    }

    fn close_menu(&mut self) {
        self.menu_open = false;
        self.settings.clamp();
        set_cursor_locked(&self.window, self.cursor_locked);
        log::info!("settings menu closed");
    }

    /// The OS drops the cursor grab on focus loss; take it back on return.
    fn focus_changed(&mut self, focused: bool) {
        log::debug!("window focus: {focused}");
        if focused && self.cursor_locked && !self.menu_open {
            set_cursor_locked(&self.window, true);
        }
    }

    /// Host-only keys: menu, cursor lock, debug panel, window mode.
    fn handle_hotkeys(&mut self) {
        if self.input.was_pressed(input::KEY_MENU) {
            if self.menu_open {
                self.close_menu();
            } else {
                self.open_menu();
            }
        }

        if !self.menu_open && self.input.was_pressed(input::KEY_CURSOR_LOCK) {
            self.cursor_locked = !self.cursor_locked;
            set_cursor_locked(&self.window, self.cursor_locked);
        }

        if self.input.was_pressed(input::KEY_DEBUG_OVERLAY) {
            self.overlay.toggle();
        }

        if self.input.was_pressed(input::KEY_WINDOW_MODE) {
            self.window_mode.toggle_borderless();
            self.settings.window_mode = self.window_mode.requested();
            log::info!(
                "window mode toggle: {} -> {}",
                self.window_mode.applied().label(),
                self.window_mode.requested().label()
            );
        }
    }

    fn update(&mut self, dt: f32) {
        // Paused while the menu is up
        if self.menu_open {
            return;
        }

        self.controller.config = self.settings.movement_config();
        let player_input = self.input.player_input();
        self.last_report = self
            .controller
            .tick(&mut self.player, &player_input, &self.obstacles, dt);
    }

    /// Push settings edits from the menu (or hotkeys) out to the window,
    /// the surface and the frame statistics.
    fn apply_settings(&mut self) {
        self.settings.clamp();

        if self.settings.window_mode != self.window_mode.requested() {
            self.window_mode.request(self.settings.window_mode);
        }
        if let Some(mode) = self.window_mode.take_pending() {
            let applied = window_mode::apply_window_mode(&self.window, mode, self.settings.default_size);
            if applied != mode {
                self.window_mode.request(applied);
                self.window_mode.take_pending();
            }
            self.settings.window_mode = applied;
        }

        let wanted = present_mode(self.settings.vsync);
        if wanted != self.config.present_mode {
            self.config.present_mode = wanted;
            self.surface.configure(&self.device, &self.config);
            log::info!("vsync {}", if self.settings.vsync { "on" } else { "off" });
        }

        if self.settings.target_fps != self.last_target_fps {
            self.last_target_fps = self.settings.target_fps;
            self.frame_stats.reset();
            log::info!("target fps: {}", self.settings.fps_label());
        }
    }

    fn render(&mut self) -> Result<MenuAction, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Update camera uniforms
        let aspect = self.config.width as f32 / self.config.height as f32;
        let camera = FirstPersonCamera::new(self.settings.fov);
        let uniforms = Uniforms {
            view_proj: camera
                .view_projection(&self.last_report.view, aspect)
                .to_cols_array_2d(),
        };
        self.queue.write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

            // Every box, ground included, in one draw call
            render_pass.draw_indexed(0..self.num_indices, 0, 0..self.num_instances);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        let hud = HudInfo {
            player: &self.player,
            obstacle_count: self.obstacles.len(),
            collision_checks: self.last_report.collision_checks,
            contacts: self.last_report.contacts,
            resolution: (self.config.width, self.config.height),
            cursor_locked: self.cursor_locked,
        };
        let action = self.overlay.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &self.window,
            &view,
            &screen_descriptor,
            &hud,
            &self.frame_stats,
            &mut self.settings,
            self.menu_open,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(action)
    }

    /// One full frame: timing, hotkeys, player tick, draw, settings.
    fn frame(&mut self, elwt: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_stats.record(dt);

        self.handle_hotkeys();
        self.update(dt);

        match self.render() {
            Ok(MenuAction::None) => {}
            Ok(MenuAction::Resume) => self.close_menu(),
            Ok(MenuAction::Exit) => elwt.exit(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.resize(self.size),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory, exiting");
                elwt.exit();
            }
            Err(e) => log::warn!("surface error: {e:?}"),
        }

        self.apply_settings();
        self.input.end_frame();
    }
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoop::new().context("failed to create event loop")?;

    let settings = GameSettings::default();
    let (width, height) = settings.default_size;
    let window_attributes = Window::default_attributes()
        .with_title("Mavish FPS - WASD to move, V for noclip, Esc for settings")
        .with_inner_size(winit::dpi::PhysicalSize::new(width, height));

    let window = Arc::new(
        event_loop
            .create_window(window_attributes)
            .context("failed to create window")?,
    );

    let mut state = pollster::block_on(State::new(window.clone()))?;

    event_loop.run(move |event, elwt| {
        match event {
            WinitEvent::WindowEvent {
                ref event,
                window_id,
            } if window_id == window.id() => {
                let _ = state.overlay.handle_window_event(&window, event);
                state.input.process_event(event);

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(physical_size) => {
                        state.resize(*physical_size);
                    }
                    WindowEvent::Focused(focused) => state.focus_changed(*focused),
                    WindowEvent::RedrawRequested => state.frame(elwt),
                    _ => {}
                }
            }
            WinitEvent::DeviceEvent { ref event, .. } => {
                if state.cursor_locked && !state.menu_open && state.input.is_focused() {
                    state.input.process_device_event(event);
                }
            }
            WinitEvent::AboutToWait => match state.settings.frame_interval() {
                Some(interval) => {
                    let next_frame = state.last_frame + interval;
                    if Instant::now() >= next_frame {
                        window.request_redraw();
                    } else {
                        elwt.set_control_flow(ControlFlow::WaitUntil(next_frame));
                    }
                }
                None => {
                    elwt.set_control_flow(ControlFlow::Poll);
                    window.request_redraw();
                }
            },
            _ => {}
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_mesh_faces_wind_outward() {
        let (vertices, indices) = cube_mesh();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for tri in indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(vertices[i as usize].position));
            let normal = Vec3::from_array(vertices[tri[0] as usize].normal);
            let winding = (b - a).cross(c - a).normalize();
            assert!(winding.abs_diff_eq(normal, 1e-5));
        }
    }

    #[test]
    fn cube_mesh_is_unit_sized() {
        let (vertices, _) = cube_mesh();
        for v in &vertices {
            for coord in v.position {
                assert_eq!(coord.abs(), 0.5);
            }
        }
    }

    #[test]
    fn instances_end_with_ground_slab() {
        let obstacles = scene::build_obstacles();
        let instances = scene_instances(&obstacles);
        assert_eq!(instances.len(), obstacles.len() + 1);
        let ground = instances[instances.len() - 1];
        assert_eq!(ground.size, [50.0, 0.1, 50.0]);
        // Top face sits on the floor plane
        assert!((ground.center[1] + ground.size[1] / 2.0).abs() < 1e-6);
    }
}
