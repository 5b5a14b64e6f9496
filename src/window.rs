//! Window, event wiring, and canvas presentation.
//!
//! The simulation draws into a CPU [`PixelCanvas`]; each frame the canvas
//! bytes are uploaded as a texture and blitted fullscreen. `RedrawRequested`
//! re-requests itself, so the tick loop runs once per display refresh and
//! yields to the event loop between frames.
//!
//! Interaction mapping (the card's click/focus/scroll handlers):
//!
//! * first left click reveals the card and starts the launch timers
//! * later left clicks fire a 5-launch celebration at the cursor
//! * `S` fires a 3-launch sparkle at the cursor
//! * `C` fires the confetti volley, `M` toggles the music flag
//! * mouse wheel is the scroll trigger
//! * `Escape` quits

use std::sync::Arc;

use glam::Vec2;
use tracing::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::canvas::PixelCanvas;
use crate::card::Card;
use crate::clock::FrameClock;
use crate::error::{CardError, GpuError, WishError};
use crate::simulation::{Fireworks, DEFAULT_SURFACE};
use crate::triggers::Triggers;
use crate::wishes::WishJar;

/// Fullscreen blit of the canvas texture.
const BLIT_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    // One oversized triangle covering the viewport.
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 3.0, -1.0),
        vec2<f32>(-1.0,  3.0),
    );
    let pos = positions[vertex_index];

    var out: VertexOutput;
    out.clip_position = vec4<f32>(pos, 0.0, 1.0);
    out.uv = vec2<f32>(pos.x * 0.5 + 0.5, 0.5 - pos.y * 0.5);
    return out;
}

@group(0) @binding(0)
var canvas_tex: texture_2d<f32>;

@group(0) @binding(1)
var canvas_sampler: sampler;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return textureSample(canvas_tex, canvas_sampler, in.uv);
}
"#;

const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// GPU state for presenting the CPU canvas.
pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    canvas_texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

impl GpuState {
    pub async fn new(window: Arc<Window>) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Canvas Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let canvas_texture = create_canvas_texture(&device, config.width, config.height);
        let bind_group =
            create_canvas_bind_group(&device, &bind_group_layout, &canvas_texture, &sampler);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(BLIT_SHADER.into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Blit Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Blit Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            bind_group_layout,
            sampler,
            canvas_texture,
            bind_group,
        })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.canvas_texture =
                create_canvas_texture(&self.device, self.config.width, self.config.height);
            self.bind_group = create_canvas_bind_group(
                &self.device,
                &self.bind_group_layout,
                &self.canvas_texture,
                &self.sampler,
            );
        }
    }

    /// Upload the canvas bytes and blit them to the window.
    pub fn render(&mut self, canvas: &PixelCanvas) -> Result<(), wgpu::SurfaceError> {
        if canvas.width() == self.config.width && canvas.height() == self.config.height {
            self.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &self.canvas_texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                canvas.bytes(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(canvas.width() * 4),
                    rows_per_image: Some(canvas.height()),
                },
                wgpu::Extent3d {
                    width: canvas.width(),
                    height: canvas.height(),
                    depth_or_array_layers: 1,
                },
            );
        } else {
            // Resize events land before the canvas catches up; skip one frame.
            warn!("canvas size lags the surface, skipping upload");
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Blit Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Blit Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_canvas_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Canvas Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: CANVAS_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    })
}

fn create_canvas_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    texture: &wgpu::Texture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Canvas Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// The card application: simulation, triggers, card state, presenter.
pub struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    sim: Fireworks,
    canvas: PixelCanvas,
    triggers: Triggers,
    clock: FrameClock,
    card: Card,
    wishes: WishJar,
    cursor: Vec2,
}

impl App {
    pub fn new(card: Card, wishes: WishJar, seed: Option<u64>) -> Self {
        let (width, height) = DEFAULT_SURFACE;
        let mut sim = Fireworks::new(width, height);
        let mut triggers = Triggers::new();
        if let Some(seed) = seed {
            sim = sim.with_seed(seed);
            triggers = triggers.with_seed(seed);
        }

        Self {
            window: None,
            gpu: None,
            sim,
            canvas: PixelCanvas::new(width, height),
            triggers,
            clock: FrameClock::new(),
            card,
            wishes,
            cursor: Vec2::ZERO,
        }
    }

    /// Store a wish and fire the celebration volley if it was accepted.
    pub fn add_wish(&mut self, name: &str, text: &str) -> Result<bool, WishError> {
        let added = self.wishes.add(name, text)?;
        if added {
            self.triggers.wish_volley();
        }
        Ok(added)
    }

    fn reveal_card(&mut self) {
        if self.card.reveal() {
            info!("card revealed, launch timers started");
            self.triggers.start();
        }
    }

    fn frame(&mut self) {
        let (elapsed, _) = self.clock.update();
        for request in self.triggers.update(elapsed, self.card.is_visible()) {
            match request.target {
                Some(target) => self.sim.spawn_launch_at(target),
                None => self.sim.spawn_launch(),
            }
        }
        self.sim.tick(&mut self.canvas);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let (width, height) = DEFAULT_SURFACE;
            let window_attrs = Window::default_attributes()
                .with_title(self.card.greeting.headline())
                .with_inner_size(winit::dpi::LogicalSize::new(width, height));

            let window = match event_loop.create_window(window_attrs) {
                Ok(window) => Arc::new(window),
                Err(err) => {
                    error!("failed to create window: {err}");
                    event_loop.exit();
                    return;
                }
            };
            self.window = Some(window.clone());

            match pollster::block_on(GpuState::new(window.clone())) {
                Ok(gpu) => {
                    let size = window.inner_size();
                    self.canvas.resize(size.width.max(1), size.height.max(1));
                    self.sim.resize(size.width, size.height);
                    self.gpu = Some(gpu);
                    window.request_redraw();
                }
                Err(err) => {
                    error!("{err}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.triggers.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                self.canvas
                    .resize(physical_size.width.max(1), physical_size.height.max(1));
                self.sim.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left && state == ElementState::Pressed {
                    if self.card.is_visible() {
                        self.triggers.celebrate_at(self.cursor);
                    } else {
                        self.reveal_card();
                    }
                }
            }
            WindowEvent::MouseWheel { .. } => {
                self.triggers.on_scroll();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Enter) => self.reveal_card(),
                        PhysicalKey::Code(KeyCode::KeyC) => self.triggers.confetti_volley(),
                        PhysicalKey::Code(KeyCode::KeyS) => self.triggers.sparkle_at(self.cursor),
                        PhysicalKey::Code(KeyCode::KeyM) => {
                            let playing = self.card.toggle_music();
                            info!(playing, "music toggled");
                        }
                        PhysicalKey::Code(KeyCode::Escape) => {
                            self.triggers.stop();
                            event_loop.exit();
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(gpu) = &mut self.gpu {
                    match gpu.render(&self.canvas) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                            let size = winit::dpi::PhysicalSize {
                                width: gpu.config.width,
                                height: gpu.config.height,
                            };
                            gpu.resize(size);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
                        Err(e) => error!("render error: {e:?}"),
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Run the card application. Blocks until the window closes.
pub fn run(mut app: App) -> Result<(), CardError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run_app(&mut app)?;
    Ok(())
}
