use glam::Mat4;
use starfield_core::{point_size_px, Camera, Color, SceneRenderer, StarScene, Viewport};
use wgpu::util::DeviceExt;

mod helpers;
mod targets;
use targets::DepthTarget;

pub static STARFIELD_WGSL: &str = include_str!("../shaders/starfield.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniforms {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    fog_color: [f32; 4],
    viewport: [f32; 2],
    fog_density: f32,
    _pad: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LayerUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4], // x = point size in buffer pixels at unit depth
}

// Uniform storage for one layer's material and rotation
struct LayerGpu {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    layers: Vec<LayerGpu>,
    // Geometry: one quad, and the particle field uploaded once and shared by all layers
    quad_vb: wgpu::Buffer,
    particles_vb: wgpu::Buffer,
    particle_count: u32,
    depth: DepthTarget,

    width: u32,
    height: u32,
    css_height: f32,
    pixel_ratio: f32,
    // sRGB swapchains expect linear values; authored colors are sRGB
    linearize: bool,
}

impl<'a> GpuState<'a> {
    /// Create a renderer for `scene` on `target`, sized to `viewport` at the
    /// given device pixel ratio.
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        viewport: Viewport,
        pixel_ratio: f32,
        scene: &StarScene,
    ) -> anyhow::Result<Self> {
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no texture formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let (width, height) =
            viewport.physical_size_within(pixel_ratio, device.limits().max_texture_dimension_2d);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = DepthTarget::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("starfield_shader"),
            source: wgpu::ShaderSource::Wgsl(STARFIELD_WGSL.into()),
        });

        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[helpers::uniform_layout_entry(
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let layer_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("layer_bgl"),
            entries: &[helpers::uniform_layout_entry(
                wgpu::ShaderStages::VERTEX_FRAGMENT,
            )],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points_pl"),
            bind_group_layouts: &[&globals_bgl, &layer_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_points_pipeline(&device, &pipeline_layout, &shader, format);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals_uniforms"),
            size: std::mem::size_of::<GlobalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let layers = (0..scene.layers().len())
            .map(|i| {
                let buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("layer_uniforms_{}", i)),
                    size: std::mem::size_of::<LayerUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("layer_bg_{}", i)),
                    layout: &layer_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                LayerGpu { buffer, bind_group }
            })
            .collect::<Vec<_>>();

        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vb"),
            contents: bytemuck::cast_slice(&helpers::QUAD_CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let positions = scene.field().positions();
        let padding = [0.0f32; 3];
        let particles_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particles_vb"),
            contents: if positions.is_empty() {
                bytemuck::cast_slice(&padding)
            } else {
                bytemuck::cast_slice(positions)
            },
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::info!(
            "[gpu] {}x{} px (ratio {:.2}), format {:?}, {} particles, {} layers",
            width,
            height,
            pixel_ratio,
            format,
            positions.len(),
            layers.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            globals_bind_group,
            layers,
            quad_vb,
            particles_vb,
            particle_count: positions.len() as u32,
            depth,
            width,
            height,
            css_height: viewport.height(),
            pixel_ratio,
            linearize: format.is_srgb(),
        })
    }

    #[inline]
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Takes effect on the next resize.
    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            self.pixel_ratio = pixel_ratio;
        }
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let max_dim = self.device.limits().max_texture_dimension_2d;
        let (width, height) = (width.min(max_dim), height.min(max_dim));
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth.recreate(&self.device, self.width, self.height);
    }

    fn output_color(&self, c: Color) -> Color {
        if self.linearize {
            c.to_linear()
        } else {
            c
        }
    }

    fn write_uniforms(&self, scene: &StarScene, camera: &Camera) {
        let fog = self.output_color(scene.fog.color).to_array();
        let globals = GlobalUniforms {
            view: camera.view_matrix().to_cols_array_2d(),
            proj: camera.projection_matrix().to_cols_array_2d(),
            fog_color: [fog[0], fog[1], fog[2], 1.0],
            viewport: [self.width as f32, self.height as f32],
            fog_density: scene.fog.density,
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        for (gpu, layer) in self.layers.iter().zip(scene.layers()) {
            let c = self.output_color(layer.color).to_array();
            let model: Mat4 = layer.model_matrix();
            let u = LayerUniforms {
                model: model.to_cols_array_2d(),
                color: [c[0], c[1], c[2], 1.0],
                params: [
                    point_size_px(layer.point_size(), self.pixel_ratio, self.css_height, 1.0),
                    0.0,
                    0.0,
                    0.0,
                ],
            };
            self.queue.write_buffer(&gpu.buffer, 0, bytemuck::bytes_of(&u));
        }
    }

    pub fn render(&mut self, scene: &StarScene, camera: &Camera) -> Result<(), wgpu::SurfaceError> {
        self.write_uniforms(scene, camera);

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Skip this frame; the next one draws into the fresh swapchain
                log::debug!("[gpu] surface lost/outdated, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let bg = self.output_color(scene.background);
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("starfield_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if self.particle_count > 0 {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
                rpass.set_vertex_buffer(1, self.particles_vb.slice(..));
                for gpu in &self.layers {
                    rpass.set_bind_group(1, &gpu.bind_group, &[]);
                    rpass.draw(0..helpers::QUAD_CORNERS.len() as u32, 0..self.particle_count);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl<'a> SceneRenderer for GpuState<'a> {
    type Error = wgpu::SurfaceError;

    fn resize(&mut self, viewport: Viewport) {
        self.css_height = viewport.height();
        let (w, h) = viewport
            .physical_size_within(self.pixel_ratio, self.device.limits().max_texture_dimension_2d);
        self.resize_if_needed(w, h);
    }

    fn render(&mut self, scene: &StarScene, camera: &Camera) -> Result<(), Self::Error> {
        GpuState::render(self, scene, camera)
    }
}
