use glam::Vec3;
use lantern_core::light::debug::{make_vertex, DebugVertex};
use wgpu::util::DeviceExt;

use super::DEPTH_FORMAT;

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const AXIS_LENGTH: f32 = 5.0;
const GRID_HALF_SIZE: i32 = 10;

const COL_X_POS: Vec3 = Vec3::new(1.0, 0.2, 0.2);
const COL_Y_POS: Vec3 = Vec3::new(0.2, 1.0, 0.2);
const COL_Z_POS: Vec3 = Vec3::new(0.2, 0.4, 1.0);

const COL_GRID: Vec3 = Vec3::new(0.35, 0.35, 0.35);

// Initial gizmo capacity in vertices; grows on demand.
const GIZMO_CAPACITY: usize = 4096;

//
// ──────────────────────────────────────────────────────────────
//   Static scenery: ground grid on XZ plus world axes
// ──────────────────────────────────────────────────────────────
//

pub struct LineMesh
{
  pub vertex_buffer: wgpu::Buffer,
  pub vertex_count: u32,
}

impl LineMesh
{
  pub fn scenery(device: &wgpu::Device) -> Self
  {
    let mut vertices = Vec::new();
    push_grid(&mut vertices);
    push_axes(&mut vertices);

    let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
      label: Some("Scenery Vertex Buffer"),
      contents: bytemuck::cast_slice(&vertices),
      usage: wgpu::BufferUsages::VERTEX,
    });

    Self { vertex_buffer, vertex_count: vertices.len() as u32 }
  }
}

fn push_grid(verts: &mut Vec<DebugVertex>)
{
  let extent = GRID_HALF_SIZE as f32;

  for i in -GRID_HALF_SIZE..=GRID_HALF_SIZE
  {
    // The axes cover the centre lines.
    if i == 0
    {
      continue;
    }

    let t = i as f32;
    verts.push(make_vertex(Vec3::new(t, 0.0, -extent), COL_GRID));
    verts.push(make_vertex(Vec3::new(t, 0.0, extent), COL_GRID));
    verts.push(make_vertex(Vec3::new(-extent, 0.0, t), COL_GRID));
    verts.push(make_vertex(Vec3::new(extent, 0.0, t), COL_GRID));
  }
}

fn push_axes(verts: &mut Vec<DebugVertex>)
{
  for (axis, colour) in [(Vec3::X, COL_X_POS), (Vec3::Y, COL_Y_POS), (Vec3::Z, COL_Z_POS)]
  {
    verts.push(make_vertex(Vec3::ZERO, colour));
    verts.push(make_vertex(axis * AXIS_LENGTH, colour));
    verts.push(make_vertex(Vec3::ZERO, colour * 0.3));
    verts.push(make_vertex(-axis * AXIS_LENGTH, colour * 0.3));
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Light gizmos: rebuilt every frame from the light set
// ──────────────────────────────────────────────────────────────
//

pub struct GizmoBuffer
{
  pub vertex_buffer: wgpu::Buffer,
  pub vertex_count: u32,
  capacity: usize,
}

impl GizmoBuffer
{
  pub fn create(device: &wgpu::Device) -> Self
  {
    Self { vertex_buffer: create_gizmo_buffer(device, GIZMO_CAPACITY), vertex_count: 0, capacity: GIZMO_CAPACITY }
  }

  pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, vertices: &[DebugVertex])
  {
    if vertices.len() > self.capacity
    {
      self.capacity = vertices.len().next_power_of_two();
      self.vertex_buffer = create_gizmo_buffer(device, self.capacity);
      log::debug!("gizmo buffer grown to {} vertices", self.capacity);
    }

    if !vertices.is_empty()
    {
      queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }
    self.vertex_count = vertices.len() as u32;
  }
}

fn create_gizmo_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer
{
  device.create_buffer(&wgpu::BufferDescriptor {
    label: Some("Gizmo Vertex Buffer"),
    size: (capacity * std::mem::size_of::<DebugVertex>()) as u64,
    usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    mapped_at_creation: false,
  })
}

//
// ──────────────────────────────────────────────────────────────
//   Pipeline
// ──────────────────────────────────────────────────────────────
//

pub fn create_line_pipeline(
  device: &wgpu::Device,
  format: wgpu::TextureFormat,
  camera_bgl: &wgpu::BindGroupLayout,
) -> wgpu::RenderPipeline
{
  let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
    label: Some("Line Shader"),
    source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/lines.wgsl").into()),
  });

  let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
    label: Some("Line Pipeline Layout"),
    bind_group_layouts: &[camera_bgl],
    push_constant_ranges: &[],
  });

  device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
    label: Some("Line Pipeline"),
    layout: Some(&layout),
    vertex: wgpu::VertexState {
      module: &shader,
      entry_point: Some("vs_main"),
      buffers: &[wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<DebugVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![
          0 => Float32x3,  // position
          1 => Float32x3,  // colour
        ],
      }],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    },
    fragment: Some(wgpu::FragmentState {
      module: &shader,
      entry_point: Some("fs_main"),
      targets: &[Some(wgpu::ColorTargetState {
        format,
        blend: Some(wgpu::BlendState::REPLACE),
        write_mask: wgpu::ColorWrites::ALL,
      })],
      compilation_options: wgpu::PipelineCompilationOptions::default(),
    }),
    primitive: wgpu::PrimitiveState {
      topology: wgpu::PrimitiveTopology::LineList,
      strip_index_format: None,
      front_face: wgpu::FrontFace::Ccw,
      cull_mode: None,
      unclipped_depth: false,
      polygon_mode: wgpu::PolygonMode::Fill,
      conservative: false,
    },
    depth_stencil: Some(wgpu::DepthStencilState {
      format: DEPTH_FORMAT,
      depth_write_enabled: true,
      depth_compare: wgpu::CompareFunction::LessEqual,
      stencil: wgpu::StencilState::default(),
      bias: wgpu::DepthBiasState::default(),
    }),
    multisample: wgpu::MultisampleState::default(),
    multiview: None,
    cache: None,
  })
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn grid_skips_centre_lines_and_stays_on_ground()
  {
    let mut verts = Vec::new();
    push_grid(&mut verts);

    assert_eq!(verts.len(), (GRID_HALF_SIZE as usize * 2) * 4);
    assert!(verts.iter().all(|v| v[1] == 0.0));
  }

  #[test]
  fn axes_have_positive_and_dimmed_negative_arms()
  {
    let mut verts = Vec::new();
    push_axes(&mut verts);

    assert_eq!(verts.len(), 12);
    assert_eq!(verts[1][0], AXIS_LENGTH);
    assert_eq!(verts[3][0], -AXIS_LENGTH);
    assert!(verts[2][3] < verts[0][3]);
  }
}
