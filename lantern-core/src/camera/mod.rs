mod flying;
mod orbit;
mod projection;
mod uniform;

pub use flying::{FlyingControl, FlyingNavigation, DEFAULT_MOVE_SPEED};
pub use orbit::{OrbitControl, OrbitNavigation, DEFAULT_ZOOM};
pub use projection::{Projection, ProjectionKind};
pub use uniform::CameraUniform;

use glam::{Mat4, Vec3};

use crate::input::InputSource;

//
// ──────────────────────────────────────────────────────────────
//   Camera (right-handed, Y-up)
//
//   Shared state for every navigation mode:
//     world     = mode-specific composition of position/orientation
//     view      = inverse(world)
//     view_proj = projection * view
//
//   The triple is only rebuilt inside `update`, and only when the
//   pose (or the projection) has been marked dirty since the last
//   frame.
// ──────────────────────────────────────────────────────────────
//

/// Position plus the dirty flag every pose mutation must raise.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pose
{
  pub position: Vec3,
  pub dirty: bool,
}

#[derive(Clone, Debug)]
pub enum Navigation
{
  Flying(FlyingNavigation),
  Orbit(OrbitNavigation),
}

pub struct Camera
{
  pose: Pose,

  world: Mat4,
  view: Mat4,
  view_proj: Mat4,

  input_enabled: bool,
  projection: Projection,
  navigation: Navigation,
}

//
// ──────────────────────────────────────────────────────────────
//   Public API
// ──────────────────────────────────────────────────────────────
//

impl Camera
{
  /// Free-look camera driven by mouse-look and WASD/QE.
  pub fn flying() -> Self
  {
    Self::with_navigation(Navigation::Flying(FlyingNavigation::default()))
  }

  /// Camera orbiting the world origin, dragged with the mouse and zoomed with the wheel.
  pub fn orbit() -> Self
  {
    Self::with_navigation(Navigation::Orbit(OrbitNavigation::default()))
  }

  pub fn with_navigation(navigation: Navigation) -> Self
  {
    let mut projection = Projection::new();
    projection.set_kind(ProjectionKind::Perspective);

    Self {
      pose: Pose { position: Vec3::ZERO, dirty: true },
      world: Mat4::IDENTITY,
      view: Mat4::IDENTITY,
      view_proj: Mat4::IDENTITY,
      input_enabled: true,
      projection,
      navigation,
    }
  }

  /// Per-frame entry point. Must run once per frame before the matrices are read.
  pub fn update(&mut self, delta_time: f32, input: &dyn InputSource)
  {
    if self.input_enabled
    {
      match &mut self.navigation
      {
        Navigation::Flying(nav) => nav.update(&mut self.pose, input, delta_time),
        Navigation::Orbit(nav) => nav.update(&mut self.pose, input),
      }
    }

    if self.pose.dirty
    {
      self.world = match &self.navigation
      {
        Navigation::Flying(nav) => nav.compose_world(&self.pose),
        Navigation::Orbit(nav) => nav.compose_world(&mut self.pose),
      };
      self.view = self.world.inverse();
    }

    if self.pose.dirty || self.projection.is_dirty()
    {
      self.view_proj = self.projection.matrix() * self.view;
      self.pose.dirty = false;
    }
  }

  pub fn navigation(&self) -> &Navigation
  {
    &self.navigation
  }

  pub fn flying_mut(&mut self) -> Option<FlyingControl<'_>>
  {
    match &mut self.navigation
    {
      Navigation::Flying(nav) => Some(FlyingControl::new(nav, &mut self.pose)),
      Navigation::Orbit(_) => None,
    }
  }

  pub fn orbit_mut(&mut self) -> Option<OrbitControl<'_>>
  {
    match &mut self.navigation
    {
      Navigation::Orbit(nav) => Some(OrbitControl::new(nav, &mut self.pose)),
      Navigation::Flying(_) => None,
    }
  }

  // ── Transforms ──────────────────────────────────────────────

  pub fn projection_matrix(&mut self) -> Mat4
  {
    self.projection.matrix()
  }

  pub fn world_matrix(&self) -> Mat4
  {
    self.world
  }

  pub fn view_matrix(&self) -> Mat4
  {
    self.view
  }

  pub fn view_projection(&self) -> Mat4
  {
    self.view_proj
  }

  pub fn position(&self) -> Vec3
  {
    self.pose.position
  }

  pub fn set_position(&mut self, position: Vec3)
  {
    self.pose.position = position;
    self.pose.dirty = true;
  }

  pub fn is_dirty(&self) -> bool
  {
    self.pose.dirty
  }

  // ── Projection ──────────────────────────────────────────────

  pub fn projection(&self) -> &Projection
  {
    &self.projection
  }

  pub fn projection_kind(&self) -> Option<ProjectionKind>
  {
    self.projection.kind()
  }

  pub fn near_clip(&self) -> f32
  {
    self.projection.near_clip()
  }

  pub fn far_clip(&self) -> f32
  {
    self.projection.far_clip()
  }

  pub fn field_of_view(&self) -> f32
  {
    self.projection.field_of_view()
  }

  pub fn ortho_size(&self) -> f32
  {
    self.projection.ortho_size()
  }

  pub fn set_projection_kind(&mut self, kind: ProjectionKind)
  {
    self.projection.set_kind(kind);
  }

  pub fn set_field_of_view(&mut self, fov_degrees: f32)
  {
    self.projection.set_field_of_view(fov_degrees);
  }

  pub fn set_ortho_size(&mut self, ortho_size: f32)
  {
    self.projection.set_ortho_size(ortho_size);
  }

  pub fn set_near_clip(&mut self, z_near: f32)
  {
    self.projection.set_near_clip(z_near);
  }

  pub fn set_far_clip(&mut self, z_far: f32)
  {
    self.projection.set_far_clip(z_far);
  }

  pub fn set_viewport_size(&mut self, width: u32, height: u32)
  {
    self.projection.set_viewport_size(width, height);
    self.pose.dirty = true;
  }

  // ── Input ───────────────────────────────────────────────────

  pub fn enable_input(&mut self, enable: bool)
  {
    self.input_enabled = enable;
  }

  pub fn is_input_enabled(&self) -> bool
  {
    self.input_enabled
  }

  pub fn on_left_mouse_down(&mut self)
  {
    if !self.input_enabled
    {
      return;
    }

    match &mut self.navigation
    {
      Navigation::Flying(nav) => nav.on_left_mouse_down(),
      Navigation::Orbit(nav) => nav.on_left_mouse_down(),
    }
  }

  pub fn on_left_mouse_up(&mut self)
  {
    if !self.input_enabled
    {
      return;
    }

    match &mut self.navigation
    {
      Navigation::Flying(nav) => nav.on_left_mouse_up(),
      Navigation::Orbit(nav) => nav.cancel_input(),
    }
  }

  pub fn on_mouse_scrolled(&mut self, x_offset: f32, y_offset: f32)
  {
    if !self.input_enabled
    {
      return;
    }

    if let Some(mut orbit) = self.orbit_mut()
    {
      orbit.on_mouse_scrolled(x_offset, y_offset);
    }
  }

  /// Ends any drag capture in progress (focus loss, Escape).
  pub fn cancel_input(&mut self)
  {
    match &mut self.navigation
    {
      Navigation::Flying(nav) => nav.cancel_input(),
      Navigation::Orbit(nav) => nav.cancel_input(),
    }
  }

  pub fn is_capturing(&self) -> bool
  {
    match &self.navigation
    {
      Navigation::Flying(nav) => nav.is_capturing(),
      Navigation::Orbit(nav) => nav.is_capturing(),
    }
  }

  /// Whether the host should hide and lock the OS cursor after a button press.
  pub fn should_consume_cursor(&self) -> bool
  {
    if !self.input_enabled
    {
      return false;
    }

    match &self.navigation
    {
      Navigation::Flying(_) | Navigation::Orbit(_) => true,
    }
  }

  /// Whether the host should show and unlock the OS cursor after a button release.
  pub fn should_release_cursor(&self) -> bool
  {
    if !self.input_enabled
    {
      return true;
    }

    match &self.navigation
    {
      Navigation::Flying(_) => false,
      Navigation::Orbit(_) => true,
    }
  }
}
