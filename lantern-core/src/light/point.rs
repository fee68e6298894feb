use glam::{Mat4, Vec3};

use super::{LightCommon, LightKind, LightSource, Positional};

pub const DEFAULT_RANGE: f32 = 5.0;

// Keeps 1 / range² finite for a zero range.
const MIN_RANGE_SQUARED: f32 = 0.0001;

#[derive(Clone, Debug)]
pub struct PointLight
{
  common: LightCommon,
  positional: Positional,
  range: f32,
}

impl PointLight
{
  pub fn new(name: impl Into<String>) -> Self
  {
    Self { common: LightCommon::new(name), positional: Positional::default(), range: DEFAULT_RANGE }
  }

  pub fn set_range(&mut self, range: f32)
  {
    self.range = range;
  }

  /// Raw range. Shading wants `inverse_squared_range()`.
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

  pub fn positional(&self) -> &Positional
  {
    &self.positional
  }

  pub fn positional_mut(&mut self) -> &mut Positional
  {
    &mut self.positional
  }
}

impl LightSource for PointLight
{
  fn kind(&self) -> LightKind
  {
    LightKind::Point
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

pub(crate) fn inverse_squared_range(range: f32) -> f32
{
  1.0 / (range * range).max(MIN_RANGE_SQUARED)
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn zero_range_is_floored()
  {
    let mut light = PointLight::new("lamp");
    light.set_range(0.0);

    let inv = light.inverse_squared_range();
    assert!(inv.is_finite());
    assert!((inv - 10_000.0).abs() < 1e-2);
  }

  #[test]
  fn inverse_squared_range_of_regular_range()
  {
    let mut light = PointLight::new("lamp");
    light.set_range(0.8);

    assert!((light.inverse_squared_range() - 1.0 / 0.64).abs() < 1e-5);
  }

  #[test]
  fn default_range()
  {
    assert_eq!(PointLight::new("lamp").range(), DEFAULT_RANGE);
  }

  #[test]
  fn position_follows_parent()
  {
    let mut light = PointLight::new("lantern");
    light.set_position(Vec3::new(0.0, 1.0, 0.0));
    light.set_parent_model_matrix(Mat4::from_translation(Vec3::new(2.0, 0.0, 0.0)));

    assert_eq!(light.position(), Vec3::new(2.0, 1.0, 0.0));
  }
}
