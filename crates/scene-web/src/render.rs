mod pipeline;

use fnv::FnvHashMap;
use glam::Mat4;
use pipeline::{create_line_resources, LineUniforms, SegmentInstance};
use scene_core::{Camera, Material, RenderBackend, SceneGraph, StrandId};
use web_sys as web;
use wgpu;

const INSTANCE_SIZE: u64 = std::mem::size_of::<SegmentInstance>() as u64;

/// GPU copy of one strand. Re-uploaded only when its points, world
/// transform or material change.
struct StrandGpu {
    buffer: wgpu::Buffer,
    capacity: u32,
    segments: u32,
    world: Mat4,
    material: Material,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    canvas: web::HtmlCanvasElement,

    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    strands: FnvHashMap<StrandId, StrandGpu>,
    // graph generation the cached buffers belong to
    generation: u64,
    draw_list: Vec<StrandId>,
    scratch: Vec<SegmentInstance>,

    width: u32,
    height: u32,
    released: bool,
}

impl GpuState {
    pub async fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                    memory_hints: wgpu::MemoryHints::MemoryUsage,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        // colors are authored as sRGB hex values; write them unconverted
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
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

        let lines = create_line_resources(&device, format);
        log::info!(
            "[gpu] ready {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            canvas,
            pipeline: lines.pipeline,
            uniform_buffer: lines.uniform_buffer,
            bind_group: lines.bind_group,
            strands: FnvHashMap::default(),
            generation: 0,
            draw_list: Vec::new(),
            scratch: Vec::new(),
            width,
            height,
            released: false,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn drop_strand_buffers(&mut self) {
        for (_, gpu) in self.strands.drain() {
            gpu.buffer.destroy();
        }
    }

    /// Bring every rendered strand's GPU copy up to date and record the
    /// draw order.
    fn sync_strands(&mut self, graph: &mut SceneGraph) -> anyhow::Result<()> {
        if graph.generation() != self.generation {
            log::debug!(
                "[gpu] graph generation {} -> {}; dropping {} buffers",
                self.generation,
                graph.generation(),
                self.strands.len()
            );
            self.drop_strand_buffers();
            self.generation = graph.generation();
        }

        let visible: Vec<(StrandId, Mat4)> = graph
            .strands()
            .filter(|(_, s)| graph.is_rendered(s.node))
            .filter_map(|(id, s)| graph.world_matrix(s.node).ok().map(|m| (id, m)))
            .collect();

        self.draw_list.clear();
        for (id, world) in visible {
            let strand = graph.strand_mut(id)?;
            let stale = match self.strands.get(&id) {
                Some(gpu) => {
                    strand.buffer.is_dirty() || gpu.world != world || gpu.material != strand.material
                }
                None => true,
            };
            if stale {
                let color = strand.material.rgba();
                let width = strand.material.width;
                self.scratch.clear();
                self.scratch
                    .extend(strand.buffer.points().windows(2).map(|pair| SegmentInstance {
                        a: world.transform_point3(pair[0]).to_array(),
                        b: world.transform_point3(pair[1]).to_array(),
                        color,
                        width,
                    }));
                let segments = self.scratch.len() as u32;
                self.upload(id, segments, world, strand.material);
                strand.buffer.mark_clean();
            }
            if self.strands.get(&id).is_some_and(|gpu| gpu.segments > 0) {
                self.draw_list.push(id);
            }
        }
        Ok(())
    }

    fn upload(&mut self, id: StrandId, segments: u32, world: Mat4, material: Material) {
        let bytes = bytemuck::cast_slice::<SegmentInstance, u8>(&self.scratch);
        match self.strands.get_mut(&id) {
            Some(gpu) if gpu.capacity >= segments => {
                if !bytes.is_empty() {
                    self.queue.write_buffer(&gpu.buffer, 0, bytes);
                }
                gpu.segments = segments;
                gpu.world = world;
                gpu.material = material;
            }
            _ => {
                let capacity = segments.max(1);
                let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("strand_segments"),
                    size: capacity as u64 * INSTANCE_SIZE,
                    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                if !bytes.is_empty() {
                    self.queue.write_buffer(&buffer, 0, bytes);
                }
                let fresh = StrandGpu {
                    buffer,
                    capacity,
                    segments,
                    world,
                    material,
                };
                if let Some(old) = self.strands.insert(id, fresh) {
                    old.buffer.destroy();
                }
            }
        }
    }

    pub fn render(&mut self, graph: &mut SceneGraph, camera: &Camera) -> anyhow::Result<()> {
        if self.released {
            return Ok(());
        }
        self.resize_if_needed(self.canvas.width(), self.canvas.height());
        self.sync_strands(graph)?;

        let uniforms = LineUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            viewport: [
                (self.canvas.client_width() as f32).max(1.0),
                (self.canvas.client_height() as f32).max(1.0),
            ],
            _pad: [0.0; 2],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(anyhow::anyhow!("surface error: {e:?}")),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lines_encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lines_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            for id in &self.draw_list {
                let Some(gpu) = self.strands.get(id) else {
                    continue;
                };
                rpass.set_vertex_buffer(0, gpu.buffer.slice(..gpu.segments as u64 * INSTANCE_SIZE));
                rpass.draw(0..6, 0..gpu.segments);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl RenderBackend for GpuState {
    type Error = anyhow::Error;

    fn draw(&mut self, graph: &mut SceneGraph, camera: &Camera) -> anyhow::Result<()> {
        self.render(graph, camera)
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        let count = self.strands.len();
        self.drop_strand_buffers();
        self.uniform_buffer.destroy();
        self.draw_list.clear();
        log::info!("[gpu] released {} strand buffers", count);
    }
}
