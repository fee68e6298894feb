mod light_panel;
mod lines;
mod overlay;

use std::sync::Arc;

use anyhow::Context;
use lantern_core::{Camera, CameraUniform, LightSet};
use wgpu::util::DeviceExt;
use winit::{event::WindowEvent, window::Window};

use lines::{GizmoBuffer, LineMesh};
use overlay::Overlay;

const CLEAR_COLOUR: wgpu::Color = wgpu::Color { r: 0.05, g: 0.06, b: 0.08, a: 1.0 };

pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

//
// ──────────────────────────────────────────────────────────────
//   Renderer: surface, camera uniform, line pass and egui pass
// ──────────────────────────────────────────────────────────────
//

pub struct Renderer
{
  window: Arc<Window>,
  surface: wgpu::Surface<'static>,
  device: wgpu::Device,
  queue: wgpu::Queue,
  config: wgpu::SurfaceConfiguration,
  depth_view: wgpu::TextureView,

  camera_buffer: wgpu::Buffer,
  camera_bind_group: wgpu::BindGroup,

  line_pipeline: wgpu::RenderPipeline,
  scenery: LineMesh,
  gizmos: GizmoBuffer,

  overlay: Overlay,
}

impl Renderer
{
  pub async fn new(window: Arc<Window>) -> anyhow::Result<Self>
  {
    let size = window.inner_size();
    let instance = wgpu::Instance::default();

    let surface = instance.create_surface(window.clone()).context("failed to create surface")?;

    let adapter = instance
      .request_adapter(&wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        compatible_surface: Some(&surface),
        force_fallback_adapter: false,
      })
      .await
      .context("no compatible GPU adapter")?;

    log::info!("adapter: {}", adapter.get_info().name);

    let (device, queue) = adapter
      .request_device(&wgpu::DeviceDescriptor { label: Some("Lantern Device"), ..Default::default() })
      .await
      .context("failed to create device")?;

    let config = surface
      .get_default_config(&adapter, size.width.max(1), size.height.max(1))
      .context("surface is not supported by the adapter")?;
    surface.configure(&device, &config);

    let depth_view = create_depth_view(&device, &config);
    let (camera_buffer, camera_bgl, camera_bind_group) = create_camera_resources(&device);

    let line_pipeline = lines::create_line_pipeline(&device, config.format, &camera_bgl);
    let scenery = LineMesh::scenery(&device);
    let gizmos = GizmoBuffer::create(&device);

    let overlay = Overlay::new(&device, config.format, &window);

    Ok(Self {
      window,
      surface,
      device,
      queue,
      config,
      depth_view,
      camera_buffer,
      camera_bind_group,
      line_pipeline,
      scenery,
      gizmos,
      overlay,
    })
  }

  pub fn handle_gui_event(&mut self, window: &Window, event: &WindowEvent) -> bool
  {
    self.overlay.handle_event(window, event)
  }

  pub fn resize(&mut self, width: u32, height: u32)
  {
    if width == 0 || height == 0
    {
      return;
    }

    self.config.width = width;
    self.config.height = height;
    self.surface.configure(&self.device, &self.config);
    self.depth_view = create_depth_view(&self.device, &self.config);
  }

  pub fn render(&mut self, camera: &mut Camera, lights: &mut LightSet, show_gizmos: &mut bool) -> anyhow::Result<()>
  {
    let frame = match self.surface.get_current_texture()
    {
      Ok(frame) => frame,
      Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) =>
      {
        self.surface.configure(&self.device, &self.config);
        return Ok(());
      }
      Err(err) => return Err(err).context("failed to acquire surface texture"),
    };

    let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    // The panel may move lights, so gizmos are built after it runs.
    let window = self.window.clone();
    let full_output = self.overlay.build(&window, |ctx| light_panel::show(ctx, lights, show_gizmos));

    let uniform = CameraUniform::from_camera(camera);
    self.queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&uniform));

    let gizmo_vertices = if *show_gizmos { lights.debug_lines() } else { Vec::new() };
    self.gizmos.upload(&self.device, &self.queue, &gizmo_vertices);

    let mut encoder =
      self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Frame Encoder") });

    {
      let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Line Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view: &view,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Clear(CLEAR_COLOUR), store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
          view: &self.depth_view,
          depth_ops: Some(wgpu::Operations { load: wgpu::LoadOp::Clear(1.0), store: wgpu::StoreOp::Store }),
          stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
      });

      pass.set_pipeline(&self.line_pipeline);
      pass.set_bind_group(0, &self.camera_bind_group, &[]);

      pass.set_vertex_buffer(0, self.scenery.vertex_buffer.slice(..));
      pass.draw(0..self.scenery.vertex_count, 0..1);

      if self.gizmos.vertex_count > 0
      {
        pass.set_vertex_buffer(0, self.gizmos.vertex_buffer.slice(..));
        pass.draw(0..self.gizmos.vertex_count, 0..1);
      }
    }

    self.overlay.paint(&self.device, &self.queue, &mut encoder, &window, &view, full_output);

    self.queue.submit(Some(encoder.finish()));
    frame.present();
    Ok(())
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Camera uniform
// ──────────────────────────────────────────────────────────────
//

fn create_camera_resources(device: &wgpu::Device) -> (wgpu::Buffer, wgpu::BindGroupLayout, wgpu::BindGroup)
{
  let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
    label: Some("Camera Uniform Buffer"),
    contents: bytemuck::bytes_of(&CameraUniform::default()),
    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
  });

  let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
    label: Some("Camera Bind Group Layout"),
    entries: &[wgpu::BindGroupLayoutEntry {
      binding: 0,
      visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
      ty: wgpu::BindingType::Buffer {
        ty: wgpu::BufferBindingType::Uniform,
        has_dynamic_offset: false,
        min_binding_size: None,
      },
      count: None,
    }],
  });

  let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
    label: Some("Camera Bind Group"),
    layout: &layout,
    entries: &[wgpu::BindGroupEntry { binding: 0, resource: buffer.as_entire_binding() }],
  });

  (buffer, layout, bind_group)
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView
{
  let texture = device.create_texture(&wgpu::TextureDescriptor {
    label: Some("Lantern Depth"),
    size: wgpu::Extent3d { width: config.width.max(1), height: config.height.max(1), depth_or_array_layers: 1 },
    mip_level_count: 1,
    sample_count: 1,
    dimension: wgpu::TextureDimension::D2,
    format: DEPTH_FORMAT,
    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    view_formats: &[],
  });

  texture.create_view(&wgpu::TextureViewDescriptor::default())
}
