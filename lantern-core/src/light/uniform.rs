use super::{DirectionalLight, LightSource, PointLight, SpotLight};

//
// ──────────────────────────────────────────────────────────────
//   Light Uniforms (GPU side, 16-byte aligned vec3 slots)
//
//   Exactly what shading consumes: colour × intensity, world
//   position, 1 / range², direction and the spot falloff pair.
// ──────────────────────────────────────────────────────────────
//

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightUniform
{
  pub direction: [f32; 3],
  pub _pad0: f32,
  pub colour: [f32; 3],
  pub _pad1: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform
{
  pub position: [f32; 3],
  pub inv_range_sq: f32,
  pub colour: [f32; 3],
  pub _pad: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightUniform
{
  pub position: [f32; 3],
  pub inv_range_sq: f32,
  pub colour: [f32; 3],
  pub _pad0: f32,
  pub direction: [f32; 3],
  pub _pad1: f32,
  pub angles: [f32; 2], // (scale, offset)
  pub _pad2: [f32; 2],
}

// Catch CPU/GPU layout mismatches at compile time
const _: () = assert!(std::mem::size_of::<DirectionalLightUniform>() == 32);
const _: () = assert!(std::mem::size_of::<PointLightUniform>() == 32);
const _: () = assert!(std::mem::size_of::<SpotLightUniform>() == 64);

impl From<&DirectionalLight> for DirectionalLightUniform
{
  fn from(light: &DirectionalLight) -> Self
  {
    Self {
      direction: light.direction().to_array(),
      _pad0: 0.0,
      colour: light.colour_intensified().to_array(),
      _pad1: 0.0,
    }
  }
}

impl From<&PointLight> for PointLightUniform
{
  fn from(light: &PointLight) -> Self
  {
    Self {
      position: light.position().to_array(),
      inv_range_sq: light.inverse_squared_range(),
      colour: light.colour_intensified().to_array(),
      _pad: 0.0,
    }
  }
}

impl From<&SpotLight> for SpotLightUniform
{
  fn from(light: &SpotLight) -> Self
  {
    Self {
      position: light.position().to_array(),
      inv_range_sq: light.inverse_squared_range(),
      colour: light.colour_intensified().to_array(),
      _pad0: 0.0,
      direction: light.direction().to_array(),
      _pad1: 0.0,
      angles: light.calculated_angles().to_array(),
      _pad2: [0.0; 2],
    }
  }
}
