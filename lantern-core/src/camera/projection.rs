use glam::Mat4;
use serde::{Deserialize, Serialize};

//
// ──────────────────────────────────────────────────────────────
//   Projection (right-handed, depth range [0, 1])
//
//   The matrix is derived lazily: setters only mark it dirty,
//   `matrix()` recomputes on the next read. Setters for a field
//   the current kind ignores (fov in ortho, ortho size in
//   perspective) leave the cache alone.
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind
{
  Orthographic,
  Perspective,
}

pub const DEFAULT_FOV: f32 = 60.0;
pub const DEFAULT_ORTHO_SIZE: f32 = 5.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 400.0;

#[derive(Clone, Debug)]
pub struct Projection
{
  kind: Option<ProjectionKind>,

  fov: f32,
  ortho_size: f32,
  z_near: f32,
  z_far: f32,
  viewport_width: u32,
  viewport_height: u32,

  matrix: Mat4,
  dirty: bool,
}

impl Default for Projection
{
  fn default() -> Self
  {
    Self::new()
  }
}

impl Projection
{
  pub fn new() -> Self
  {
    Self {
      kind: None,
      fov: DEFAULT_FOV,
      ortho_size: DEFAULT_ORTHO_SIZE,
      z_near: DEFAULT_NEAR,
      z_far: DEFAULT_FAR,
      viewport_width: 0,
      viewport_height: 0,
      matrix: Mat4::IDENTITY,
      dirty: true,
    }
  }

  /// Current projection matrix, recomputed first if any relevant field changed.
  pub fn matrix(&mut self) -> Mat4
  {
    if self.dirty
    {
      self.recalc();
    }

    self.matrix
  }

  pub fn is_dirty(&self) -> bool
  {
    self.dirty
  }

  pub fn kind(&self) -> Option<ProjectionKind>
  {
    self.kind
  }

  pub fn field_of_view(&self) -> f32
  {
    self.fov
  }

  pub fn ortho_size(&self) -> f32
  {
    self.ortho_size
  }

  pub fn near_clip(&self) -> f32
  {
    self.z_near
  }

  pub fn far_clip(&self) -> f32
  {
    self.z_far
  }

  pub fn viewport_size(&self) -> (u32, u32)
  {
    (self.viewport_width, self.viewport_height)
  }

  pub fn set_field_of_view(&mut self, fov_degrees: f32)
  {
    self.fov = fov_degrees;

    if self.kind == Some(ProjectionKind::Perspective)
    {
      self.dirty = true;
    }
  }

  /// Half-height of the orthographic volume.
  pub fn set_ortho_size(&mut self, ortho_size: f32)
  {
    self.ortho_size = ortho_size;

    if self.kind == Some(ProjectionKind::Orthographic)
    {
      self.dirty = true;
    }
  }

  pub fn set_near_clip(&mut self, z_near: f32)
  {
    self.z_near = z_near;
    self.dirty = true;
  }

  pub fn set_far_clip(&mut self, z_far: f32)
  {
    self.z_far = z_far;
    self.dirty = true;
  }

  pub fn set_viewport_size(&mut self, width: u32, height: u32)
  {
    self.viewport_width = width;
    self.viewport_height = height;
    self.dirty = true;
  }

  pub fn set_kind(&mut self, kind: ProjectionKind)
  {
    if self.kind == Some(kind)
    {
      return;
    }

    self.kind = Some(kind);
    self.dirty = true;
  }

  fn recalc(&mut self)
  {
    // Before the first resize there is no aspect ratio; keep the stale matrix
    // and stay dirty so the first real viewport size is picked up.
    if self.viewport_height == 0
    {
      log::debug!("projection recompute skipped: viewport height is zero");
      return;
    }

    let aspect = self.viewport_width as f32 / self.viewport_height as f32;

    self.matrix = match self.kind
    {
      Some(ProjectionKind::Perspective) => perspective(self.fov, aspect, self.z_near, self.z_far),
      Some(ProjectionKind::Orthographic) | None =>
      {
        orthographic(self.ortho_size, aspect, self.z_near, self.z_far)
      }
    };
    self.dirty = false;

    log::debug!(
      "projection recomputed: {:?} {}x{} near={} far={}",
      self.kind,
      self.viewport_width,
      self.viewport_height,
      self.z_near,
      self.z_far
    );
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Matrix builders
// ──────────────────────────────────────────────────────────────
//

fn perspective(fov_degrees: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4
{
  Mat4::perspective_rh(fov_degrees.to_radians(), aspect, z_near, z_far)
}

fn orthographic(ortho_size: f32, aspect: f32, z_near: f32, z_far: f32) -> Mat4
{
  let half_width = aspect * ortho_size;
  Mat4::orthographic_rh(-half_width, half_width, -ortho_size, ortho_size, z_near, z_far)
}
