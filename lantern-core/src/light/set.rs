use super::debug::{self, DebugVertex};
use super::{DirectionalLight, Light, LightSource, PointLight, SpotLight};

//
// ──────────────────────────────────────────────────────────────
//   LightSet: owns every light in the scene
//
//   Lights are created through the set so the debug overlay and
//   the light panel see all of them. Handles stay valid until
//   `clear()`.
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LightId(usize);

#[derive(Clone, Debug, Default)]
pub struct LightSet
{
  lights: Vec<Light>,
}

impl LightSet
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn create_directional_light(&mut self, name: impl Into<String>) -> LightId
  {
    self.insert(DirectionalLight::new(name))
  }

  pub fn create_point_light(&mut self, name: impl Into<String>) -> LightId
  {
    self.insert(PointLight::new(name))
  }

  pub fn create_spot_light(&mut self, name: impl Into<String>) -> LightId
  {
    self.insert(SpotLight::new(name))
  }

  pub fn insert(&mut self, light: impl Into<Light>) -> LightId
  {
    let light = light.into();
    log::info!("light created: {} ({:?})", light.name(), light.kind());

    self.lights.push(light);
    LightId(self.lights.len() - 1)
  }

  pub fn get(&self, id: LightId) -> Option<&Light>
  {
    self.lights.get(id.0)
  }

  pub fn get_mut(&mut self, id: LightId) -> Option<&mut Light>
  {
    self.lights.get_mut(id.0)
  }

  pub fn directional(&self, id: LightId) -> Option<&DirectionalLight>
  {
    match self.get(id)
    {
      Some(Light::Directional(l)) => Some(l),
      _ => None,
    }
  }

  pub fn directional_mut(&mut self, id: LightId) -> Option<&mut DirectionalLight>
  {
    match self.get_mut(id)
    {
      Some(Light::Directional(l)) => Some(l),
      _ => None,
    }
  }

  pub fn point(&self, id: LightId) -> Option<&PointLight>
  {
    match self.get(id)
    {
      Some(Light::Point(l)) => Some(l),
      _ => None,
    }
  }

  pub fn point_mut(&mut self, id: LightId) -> Option<&mut PointLight>
  {
    match self.get_mut(id)
    {
      Some(Light::Point(l)) => Some(l),
      _ => None,
    }
  }

  pub fn spot(&self, id: LightId) -> Option<&SpotLight>
  {
    match self.get(id)
    {
      Some(Light::Spot(l)) => Some(l),
      _ => None,
    }
  }

  pub fn spot_mut(&mut self, id: LightId) -> Option<&mut SpotLight>
  {
    match self.get_mut(id)
    {
      Some(Light::Spot(l)) => Some(l),
      _ => None,
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (LightId, &Light)>
  {
    self.lights.iter().enumerate().map(|(i, l)| (LightId(i), l))
  }

  pub fn iter_mut(&mut self) -> impl Iterator<Item = (LightId, &mut Light)>
  {
    self.lights.iter_mut().enumerate().map(|(i, l)| (LightId(i), l))
  }

  pub fn len(&self) -> usize
  {
    self.lights.len()
  }

  pub fn is_empty(&self) -> bool
  {
    self.lights.is_empty()
  }

  pub fn clear(&mut self)
  {
    self.lights.clear();
  }

  /// Line-list gizmos for every light, in world space.
  pub fn debug_lines(&self) -> Vec<DebugVertex>
  {
    let mut verts = Vec::new();
    for light in &self.lights
    {
      debug::push_light(&mut verts, light);
    }
    verts
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::light::LightKind;
  use glam::Vec3;

  #[test]
  fn factories_return_typed_handles()
  {
    let mut lights = LightSet::new();
    let sun = lights.create_directional_light("sun");
    let lamp = lights.create_point_light("lamp");
    let torch = lights.create_spot_light("torch");

    assert_eq!(lights.len(), 3);
    assert!(lights.directional(sun).is_some());
    assert!(lights.point(lamp).is_some());
    assert!(lights.spot(torch).is_some());

    assert!(lights.point(sun).is_none());
    assert!(lights.spot(lamp).is_none());
  }

  #[test]
  fn mutations_through_handles_persist()
  {
    let mut lights = LightSet::new();
    let lamp = lights.create_point_light("lamp");

    if let Some(light) = lights.point_mut(lamp)
    {
      light.set_position(Vec3::new(1.0, 2.0, 3.0));
      light.set_range(0.9);
    }

    let light = lights.point(lamp).unwrap();
    assert_eq!(light.position(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(light.range(), 0.9);
  }

  #[test]
  fn iteration_preserves_creation_order()
  {
    let mut lights = LightSet::new();
    lights.create_spot_light("a");
    lights.create_directional_light("b");

    let kinds: Vec<_> = lights.iter().map(|(_, l)| l.kind()).collect();
    assert_eq!(kinds, vec![LightKind::Spot, LightKind::Directional]);
  }

  #[test]
  fn clear_empties_the_set()
  {
    let mut lights = LightSet::new();
    let id = lights.create_point_light("lamp");
    lights.clear();

    assert!(lights.is_empty());
    assert!(lights.get(id).is_none());
    assert!(lights.debug_lines().is_empty());
  }
}
