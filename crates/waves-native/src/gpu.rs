use crate::color;
use std::ops::Range;
use waves_core::{RecordingSurface, WavesConfig};

const LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
const INITIAL_VERTEX_CAPACITY: usize = 4096;

type Vertex = [f32; 2];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    resolution: [f32; 2],
    _pad: [f32; 2],
    color: [f32; 4],
}

/// Flatten recorded polylines into one vertex list. Returns the vertex range
/// of every line that has at least one segment.
fn pack_strips(lines: &RecordingSurface, vertices: &mut Vec<Vertex>) -> Vec<Range<u32>> {
    vertices.clear();
    let mut strips = Vec::with_capacity(lines.lines.len());
    for line in &lines.lines {
        let start = vertices.len() as u32;
        vertices.extend(line.points.iter().map(|p| p.to_array()));
        let strip = start..vertices.len() as u32;
        if strip.len() > 1 {
            strips.push(strip);
        }
    }
    strips
}

/// Line and clear colors for the target format. A transparent background
/// clears to white, like an unstyled page behind the web canvas.
fn palette(waves: &WavesConfig, srgb_target: bool) -> ([f32; 4], wgpu::Color) {
    let mut line = color::css_color_or(&waves.line_color, [0.0, 0.0, 0.0, 1.0]);
    let mut background = color::css_color_or(&waves.background_color, [1.0; 4]);
    if background[3] == 0.0 {
        background = [1.0; 4];
    }
    if srgb_target {
        line = color::to_linear(line);
        background = color::to_linear(background);
    }
    let [r, g, b, a] = background.map(f64::from);
    (line, wgpu::Color { r, g, b, a })
}

/// The `LineStrip` pipeline and the single uniform block it reads.
struct LinePipeline {
    pipeline: wgpu::RenderPipeline,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl LinePipeline {
    fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("lines_shader"),
            source: wgpu::ShaderSource::Wgsl(LINES_WGSL.into()),
        });
        let uniforms = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lines_uniforms"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("lines_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("lines_bg"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.as_entire_binding(),
            }],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        };
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("lines_pipeline"),
            layout: Some(
                &device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("lines_pl"),
                    bind_group_layouts: &[&layout],
                    push_constant_ranges: &[],
                }),
            ),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            cache: None,
            multiview: None,
        });
        Self {
            pipeline,
            uniforms,
            bind_group,
        }
    }
}

/// Growable vertex buffer holding this frame's strips.
struct StripBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
}

impl StripBuffer {
    fn with_capacity(device: &wgpu::Device, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("lines_vb"),
            size: (std::mem::size_of::<Vertex>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self { buffer, capacity }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[Vertex]) {
        if vertices.len() > self.capacity {
            *self = Self::with_capacity(device, vertices.len().next_power_of_two());
            log::debug!("[gpu] vertex buffer grown to {}", self.capacity);
        }
        if !vertices.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(vertices));
        }
    }
}

/// Surface, device and queue for one window.
async fn connect(
    window: &winit::window::Window,
) -> anyhow::Result<(wgpu::Surface<'_>, wgpu::Device, wgpu::Queue, wgpu::SurfaceConfiguration)> {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(window)?;
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            compatible_surface: Some(&surface),
            ..Default::default()
        })
        .await
        .ok_or_else(|| anyhow::anyhow!("no GPU adapter for this window"))?;
    let (device, queue) = adapter
        .request_device(&wgpu::DeviceDescriptor::default(), None)
        .await?;

    let size = window.inner_size();
    let config = surface
        .get_default_config(&adapter, size.width.max(1), size.height.max(1))
        .ok_or_else(|| anyhow::anyhow!("surface is not supported by the adapter"))?;
    surface.configure(&device, &config);
    Ok((surface, device, queue, config))
}

pub struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    lines: LinePipeline,
    strips: StripBuffer,
    vertices: Vec<Vertex>,
    line_color: [f32; 4],
    clear_color: wgpu::Color,
}

impl<'w> GpuState<'w> {
    pub async fn new(
        window: &'w winit::window::Window,
        waves: &WavesConfig,
    ) -> anyhow::Result<Self> {
        let (surface, device, queue, config) = connect(window).await?;
        let (line_color, clear_color) = palette(waves, config.format.is_srgb());
        log::info!(
            "[gpu] surface {}x{} format {:?}",
            config.width,
            config.height,
            config.format
        );
        Ok(Self {
            lines: LinePipeline::new(&device, config.format),
            strips: StripBuffer::with_capacity(&device, INITIAL_VERTEX_CAPACITY),
            vertices: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            window,
            surface,
            device,
            queue,
            config,
            line_color,
            clear_color,
        })
    }

    #[inline]
    pub fn window(&self) -> &'w winit::window::Window {
        self.window
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    pub fn reconfigure(&mut self) {
        self.resize(self.window.inner_size());
    }

    /// Upload the recorded polylines and draw each as a line strip.
    pub fn render(&mut self, recorded: &RecordingSurface) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());

        let uniforms = Uniforms {
            resolution: [self.config.width as f32, self.config.height as f32],
            _pad: [0.0; 2],
            color: self.line_color,
        };
        self.queue
            .write_buffer(&self.lines.uniforms, 0, bytemuck::bytes_of(&uniforms));
        let strips = pack_strips(recorded, &mut self.vertices);
        self.strips.upload(&self.device, &self.queue, &self.vertices);

        let mut encoder = self.device.create_command_encoder(&Default::default());
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lines_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                ..Default::default()
            });
            pass.set_pipeline(&self.lines.pipeline);
            pass.set_bind_group(0, &self.lines.bind_group, &[]);
            pass.set_vertex_buffer(0, self.strips.buffer.slice(..));
            for strip in strips {
                pass.draw(strip, 0..1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
