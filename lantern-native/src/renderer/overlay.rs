use egui_wgpu::{RendererOptions, ScreenDescriptor};
use winit::{event::WindowEvent, window::Window};

//
// ──────────────────────────────────────────────────────────────
//   Overlay: egui drawn on top of the scene, no depth
// ──────────────────────────────────────────────────────────────
//

pub struct Overlay
{
  context: egui::Context,
  winit_state: egui_winit::State,
  painter: egui_wgpu::Renderer,
}

impl Overlay
{
  pub fn new(device: &wgpu::Device, output_format: wgpu::TextureFormat, window: &Window) -> Self
  {
    let context = egui::Context::default();
    let winit_state = egui_winit::State::new(
      context.clone(),
      egui::viewport::ViewportId::ROOT,
      window,
      Some(window.scale_factor() as f32),
      None,
      None,
    );

    let options = RendererOptions {
      depth_stencil_format: None,
      msaa_samples: 1,
      predictable_texture_filtering: false,
      dithering: true,
    };
    let painter = egui_wgpu::Renderer::new(device, output_format, options);

    Self { context, winit_state, painter }
  }

  /// True when egui keeps the event (pointer over a window, focused widget).
  pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> bool
  {
    self.winit_state.on_window_event(window, event).consumed
  }

  pub fn build(&mut self, window: &Window, build_ui: impl FnMut(&egui::Context)) -> egui::FullOutput
  {
    let raw_input = self.winit_state.take_egui_input(window);
    let output = self.context.run(raw_input, build_ui);
    self.winit_state.handle_platform_output(window, output.platform_output.clone());
    output
  }

  pub fn paint(
    &mut self,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    encoder: &mut wgpu::CommandEncoder,
    window: &Window,
    target: &wgpu::TextureView,
    output: egui::FullOutput,
  )
  {
    let size = window.inner_size();
    let screen = ScreenDescriptor {
      size_in_pixels: [size.width, size.height],
      pixels_per_point: window.scale_factor() as f32,
    };

    for (id, delta) in &output.textures_delta.set
    {
      self.painter.update_texture(device, queue, *id, delta);
    }

    let primitives = self.context.tessellate(output.shapes, screen.pixels_per_point);
    let callback_buffers = self.painter.update_buffers(device, queue, encoder, &primitives, &screen);
    if !callback_buffers.is_empty()
    {
      queue.submit(callback_buffers);
    }

    let mut pass = encoder
      .begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Overlay Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
          view: target,
          resolve_target: None,
          ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
          depth_slice: None,
        })],
        ..Default::default()
      })
      .forget_lifetime();
    self.painter.render(&mut pass, &primitives, &screen);
    drop(pass);

    for id in &output.textures_delta.free
    {
      self.painter.free_texture(id);
    }
  }
}
