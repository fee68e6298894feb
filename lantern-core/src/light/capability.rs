use glam::{Mat4, Vec3};

//
// ──────────────────────────────────────────────────────────────
//   Positional capability
//
//   transform = parent * translate(position)
//
//   Recomputed on every read. Light counts are small and the
//   debug panel edits `position` in place, so there is no dirty
//   flag to fall out of sync.
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq)]
pub struct Positional
{
  position: Vec3,
  rotation: Vec3,
  parent: Mat4,
}

impl Default for Positional
{
  fn default() -> Self
  {
    Self { position: Vec3::ZERO, rotation: Vec3::ZERO, parent: Mat4::IDENTITY }
  }
}

impl Positional
{
  pub fn set_position(&mut self, position: Vec3)
  {
    self.position = position;
  }

  /// Position relative to the parent.
  pub fn local_position(&self) -> Vec3
  {
    self.position
  }

  pub fn local_position_mut(&mut self) -> &mut Vec3
  {
    &mut self.position
  }

  /// Stored for tooling; not part of the transform.
  pub fn rotation(&self) -> Vec3
  {
    self.rotation
  }

  pub fn set_rotation(&mut self, rotation: Vec3)
  {
    self.rotation = rotation;
  }

  pub fn set_parent_model_matrix(&mut self, parent: Mat4)
  {
    self.parent = parent;
  }

  pub fn parent_model_matrix(&self) -> Mat4
  {
    self.parent
  }

  /// Local-to-world transform. Most callers want `position()` instead.
  pub fn transform_matrix(&self) -> Mat4
  {
    self.parent * Mat4::from_translation(self.position)
  }

  /// World-space position.
  pub fn position(&self) -> Vec3
  {
    self.transform_matrix().w_axis.truncate()
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Directional capability
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq)]
pub struct Directional
{
  direction: Vec3,
}

impl Default for Directional
{
  fn default() -> Self
  {
    Self { direction: Vec3::Z }
  }
}

impl Directional
{
  /// Stores the normalised direction. A zero vector has no direction and is ignored.
  pub fn set_direction(&mut self, direction: Vec3)
  {
    let normalized = direction.normalize_or_zero();
    if normalized != Vec3::ZERO
    {
      self.direction = normalized;
    }
  }

  /// Normalised on every read; the stored vector may have been edited in place.
  pub fn direction(&self) -> Vec3
  {
    self.direction.normalize_or_zero()
  }

  /// Raw access for editors. Reads through `direction()` renormalise.
  pub fn direction_mut(&mut self) -> &mut Vec3
  {
    &mut self.direction
  }
}
