use glam::{Mat4, Vec2, Vec3};

use super::point::{inverse_squared_range, DEFAULT_RANGE};
use super::{Directional, LightCommon, LightKind, LightSource, Positional};

// Keeps the falloff scale finite when inner and outer cones coincide.
const MIN_COS_RANGE: f32 = 0.001;

//
// ──────────────────────────────────────────────────────────────
//   Spot light
//
//   Input angles are full cone widths in degrees (inner, outer).
//   Shading receives a linear falloff over cos(angle):
//     scale  = 1 / max(cos(inner/2) - cos(outer/2), 0.001)
//     offset = -cos(outer/2) * scale
//     factor = saturate(dot(-L, dir) * scale + offset)
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug)]
pub struct SpotLight
{
  common: LightCommon,
  positional: Positional,
  directional: Directional,
  range: f32,
  angles: Vec2,
}

impl SpotLight
{
  pub fn new(name: impl Into<String>) -> Self
  {
    Self {
      common: LightCommon::new(name),
      positional: Positional::default(),
      directional: Directional::default(),
      range: DEFAULT_RANGE,
      angles: Vec2::ZERO,
    }
  }

  // ── Cone ────────────────────────────────────────────────────

  pub fn set_input_angles(&mut self, inner: f32, outer: f32)
  {
    self.angles = Vec2::new(inner, outer);
  }

  pub fn set_inner_angle(&mut self, inner: f32)
  {
    self.angles.x = inner;
  }

  pub fn set_outer_angle(&mut self, outer: f32)
  {
    self.angles.y = outer;
  }

  /// (inner, outer) in degrees. Not for shading; see `calculated_angles()`.
  pub fn input_angles(&self) -> Vec2
  {
    self.angles
  }

  pub fn inner_angle(&self) -> f32
  {
    self.angles.x
  }

  pub fn outer_angle(&self) -> f32
  {
    self.angles.y
  }

  pub fn angles_mut(&mut self) -> &mut Vec2
  {
    &mut self.angles
  }

  /// (scale, offset) falloff coefficients for shading.
  pub fn calculated_angles(&self) -> Vec2
  {
    let inner_cos = (self.angles.x.to_radians() * 0.5).cos();
    let outer_cos = (self.angles.y.to_radians() * 0.5).cos();
    let scale = 1.0 / (inner_cos - outer_cos).max(MIN_COS_RANGE);

    Vec2::new(scale, -outer_cos * scale)
  }

  // ── Range ───────────────────────────────────────────────────

  pub fn set_range(&mut self, range: f32)
  {
    self.range = range;
  }

  pub fn range(&self) -> f32
  {
    self.range
  }

  pub fn range_mut(&mut self) -> &mut f32
  {
    &mut self.range
  }

  pub fn inverse_squared_range(&self) -> f32
  {
    inverse_squared_range(self.range)
  }

  // ── Placement ───────────────────────────────────────────────

  pub fn set_position(&mut self, position: Vec3)
  {
    self.positional.set_position(position);
  }

  pub fn position(&self) -> Vec3
  {
    self.positional.position()
  }

  pub fn set_parent_model_matrix(&mut self, parent: Mat4)
  {
    self.positional.set_parent_model_matrix(parent);
  }

  pub fn transform_matrix(&self) -> Mat4
  {
    self.positional.transform_matrix()
  }

  pub fn set_direction(&mut self, direction: Vec3)
  {
    self.directional.set_direction(direction);
  }

  /// World-space direction: the local direction carried through the light's transform,
  /// so it turns with any attached parent. Parent scale is not divided out.
  pub fn direction(&self) -> Vec3
  {
    self.transform_matrix().transform_vector3(self.directional.direction())
  }

  /// Direction before the transform is applied.
  pub fn local_direction(&self) -> Vec3
  {
    self.directional.direction()
  }

  pub fn positional(&self) -> &Positional
  {
    &self.positional
  }

  pub fn positional_mut(&mut self) -> &mut Positional
  {
    &mut self.positional
  }

  pub fn directional(&self) -> &Directional
  {
    &self.directional
  }

  pub fn directional_mut(&mut self) -> &mut Directional
  {
    &mut self.directional
  }
}

impl LightSource for SpotLight
{
  fn kind(&self) -> LightKind
  {
    LightKind::Spot
  }

  fn common(&self) -> &LightCommon
  {
    &self.common
  }

  fn common_mut(&mut self) -> &mut LightCommon
  {
    &mut self.common
  }
}
