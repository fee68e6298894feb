use glam::Vec3;

use super::{Directional, LightCommon, LightKind, LightSource};

/// Light arriving from infinitely far away along a single world-space direction.
#[derive(Clone, Debug)]
pub struct DirectionalLight
{
  common: LightCommon,
  directional: Directional,
}

impl DirectionalLight
{
  pub fn new(name: impl Into<String>) -> Self
  {
    Self { common: LightCommon::new(name), directional: Directional::default() }
  }

  pub fn set_direction(&mut self, direction: Vec3)
  {
    self.directional.set_direction(direction);
  }

  /// World-space direction; never transformed.
  pub fn direction(&self) -> Vec3
  {
    self.directional.direction()
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

impl LightSource for DirectionalLight
{
  fn kind(&self) -> LightKind
  {
    LightKind::Directional
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
