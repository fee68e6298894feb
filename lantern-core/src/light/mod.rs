pub mod debug;

mod capability;
mod directional;
mod point;
mod set;
mod spot;
mod uniform;

pub use capability::{Directional, Positional};
pub use directional::DirectionalLight;
pub use point::{PointLight, DEFAULT_RANGE};
pub use set::{LightId, LightSet};
pub use spot::SpotLight;
pub use uniform::{DirectionalLightUniform, PointLightUniform, SpotLightUniform};

use glam::Vec3;

//
// ──────────────────────────────────────────────────────────────
//   Lights
//
//   Each light kind embeds the capabilities it has by value:
//     DirectionalLight = common + Directional
//     PointLight       = common + Positional + range
//     SpotLight        = common + Positional + Directional + range + cone angles
// ──────────────────────────────────────────────────────────────
//

/// Discriminant shared with the shading code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum LightKind
{
  Directional = 0,
  Point = 1,
  Spot = 2,
}

/// Properties every light carries.
#[derive(Clone, Debug, PartialEq)]
pub struct LightCommon
{
  name: String,
  colour: Vec3,
  intensity: f32,
}

impl LightCommon
{
  pub fn new(name: impl Into<String>) -> Self
  {
    Self { name: name.into(), colour: Vec3::ONE, intensity: 1.0 }
  }
}

pub trait LightSource
{
  fn kind(&self) -> LightKind;
  fn common(&self) -> &LightCommon;
  fn common_mut(&mut self) -> &mut LightCommon;

  fn name(&self) -> &str
  {
    &self.common().name
  }

  fn colour(&self) -> Vec3
  {
    self.common().colour
  }

  fn set_colour(&mut self, colour: Vec3)
  {
    self.common_mut().colour = colour;
  }

  fn intensity(&self) -> f32
  {
    self.common().intensity
  }

  fn set_intensity(&mut self, intensity: f32)
  {
    self.common_mut().intensity = intensity;
  }

  /// Colour scaled by intensity, as consumed by shading.
  fn colour_intensified(&self) -> Vec3
  {
    self.common().colour * self.common().intensity
  }
}

#[derive(Clone, Debug)]
pub enum Light
{
  Directional(DirectionalLight),
  Point(PointLight),
  Spot(SpotLight),
}

impl LightSource for Light
{
  fn kind(&self) -> LightKind
  {
    match self
    {
      Light::Directional(_) => LightKind::Directional,
      Light::Point(_) => LightKind::Point,
      Light::Spot(_) => LightKind::Spot,
    }
  }

  fn common(&self) -> &LightCommon
  {
    match self
    {
      Light::Directional(l) => l.common(),
      Light::Point(l) => l.common(),
      Light::Spot(l) => l.common(),
    }
  }

  fn common_mut(&mut self) -> &mut LightCommon
  {
    match self
    {
      Light::Directional(l) => l.common_mut(),
      Light::Point(l) => l.common_mut(),
      Light::Spot(l) => l.common_mut(),
    }
  }
}

impl From<DirectionalLight> for Light
{
  fn from(light: DirectionalLight) -> Self
  {
    Light::Directional(light)
  }
}

impl From<PointLight> for Light
{
  fn from(light: PointLight) -> Self
  {
    Light::Point(light)
  }
}

impl From<SpotLight> for Light
{
  fn from(light: SpotLight) -> Self
  {
    Light::Spot(light)
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  #[test]
  fn defaults_are_white_unit_intensity()
  {
    let light = Light::from(PointLight::new("lamp"));

    assert_eq!(light.name(), "lamp");
    assert_eq!(light.colour(), Vec3::ONE);
    assert_eq!(light.intensity(), 1.0);
    assert_eq!(light.kind(), LightKind::Point);
  }

  #[test]
  fn colour_is_scaled_by_intensity()
  {
    let mut light = Light::from(SpotLight::new("torch"));
    light.set_colour(Vec3::new(1.0, 0.5, 0.1));
    light.set_intensity(2.5);

    assert!(light.colour_intensified().abs_diff_eq(Vec3::new(2.5, 1.25, 0.25), 1e-6));
  }

  #[test]
  fn kinds_keep_shader_discriminants()
  {
    assert_eq!(LightKind::Directional as u32, 0);
    assert_eq!(LightKind::Point as u32, 1);
    assert_eq!(LightKind::Spot as u32, 2);
  }
}
