use super::Camera;

//
// ──────────────────────────────────────────────────────────────
//   Camera Uniform (GPU side)
//
//   WGSL layout (lines.wgsl):
//     view_proj : mat4x4<f32>   → 64 bytes
//     view      : mat4x4<f32>   → 64 bytes
//     proj      : mat4x4<f32>   → 64 bytes
//     position  : vec3<f32>     → 12 bytes (+4 pad)
//   Total: 208 bytes
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform
{
  pub view_proj: [[f32; 4]; 4],
  pub view: [[f32; 4]; 4],
  pub proj: [[f32; 4]; 4],
  pub position: [f32; 3],
  pub _pad: f32,
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<CameraUniform>() == 208);

impl CameraUniform
{
  /// Snapshot of the camera after its `update` for this frame.
  pub fn from_camera(camera: &mut Camera) -> Self
  {
    Self {
      view_proj: camera.view_projection().to_cols_array_2d(),
      view: camera.view_matrix().to_cols_array_2d(),
      proj: camera.projection_matrix().to_cols_array_2d(),
      position: camera.position().to_array(),
      _pad: 0.0,
    }
  }
}
