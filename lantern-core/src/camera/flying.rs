use glam::{Mat4, Vec2, Vec3};

use super::Pose;
use crate::input::{InputSource, Key};

//
// ──────────────────────────────────────────────────────────────
//   Flying navigation
//
//   world = translate(position) * orient
//
//   `orient` is rotation-only. Left-multiplying rotates in world
//   space (yaw about +Y), right-multiplying rotates in the
//   camera's local space (pitch about local +X).
// ──────────────────────────────────────────────────────────────
//

const LOOK_SENSITIVITY: f32 = 0.1; // degrees per pixel
const BOOST_FACTOR: f32 = 4.0;
pub const DEFAULT_MOVE_SPEED: f32 = 4.0; // units per second

#[derive(Clone, Debug)]
pub struct FlyingNavigation
{
  orient: Mat4,
  last_cursor: Vec2,
  capture_mouse: bool,
  move_speed: f32,
}

impl Default for FlyingNavigation
{
  fn default() -> Self
  {
    Self {
      orient: Mat4::IDENTITY,
      last_cursor: Vec2::ZERO,
      capture_mouse: false,
      move_speed: DEFAULT_MOVE_SPEED,
    }
  }
}

impl FlyingNavigation
{
  pub fn orientation(&self) -> Mat4
  {
    self.orient
  }

  pub fn move_speed(&self) -> f32
  {
    self.move_speed
  }

  pub fn is_capturing(&self) -> bool
  {
    self.capture_mouse
  }

  pub(crate) fn compose_world(&self, pose: &Pose) -> Mat4
  {
    Mat4::from_translation(pose.position) * self.orient
  }

  pub(crate) fn on_left_mouse_down(&mut self)
  {
    self.capture_mouse = true;
    log::trace!("flying camera: cursor captured");
  }

  /// Capture outlives the button; only `cancel_input` ends it.
  pub(crate) fn on_left_mouse_up(&mut self) {}

  pub(crate) fn cancel_input(&mut self)
  {
    self.capture_mouse = false;
    log::trace!("flying camera: capture cancelled");
  }

  pub(crate) fn update(&mut self, pose: &mut Pose, input: &dyn InputSource, delta_time: f32)
  {
    let mouse = input.mouse_position();

    if !self.capture_mouse
    {
      // Keep tracking so the first captured frame does not jump.
      self.last_cursor = mouse;
      return;
    }

    let offset = self.last_cursor - mouse;
    self.last_cursor = mouse;

    let mut control = FlyingControl::new(self, pose);
    control.rotate(offset.x * LOOK_SENSITIVITY, Vec3::Y);
    control.rotate_local(offset.y * -LOOK_SENSITIVITY, Vec3::X);

    let step = movement_step(input, control.nav.move_speed) * delta_time;
    control.translate_local(Vec3::new(step.x, 0.0, step.z));
    control.translate(Vec3::new(0.0, step.y, 0.0));
  }
}

/// Unscaled-by-time movement for the keys currently held.
/// X/Z are camera-local, Y is world-space.
fn movement_step(input: &dyn InputSource, base_speed: f32) -> Vec3
{
  let mut speed = base_speed;
  if input.is_key_held(Key::Boost)
  {
    speed *= BOOST_FACTOR;
  }

  let mut step = Vec3::ZERO;

  if input.is_key_held(Key::Left)
  {
    step.x -= speed;
  }
  if input.is_key_held(Key::Right)
  {
    step.x += speed;
  }
  if input.is_key_held(Key::Forward)
  {
    step.z -= speed;
  }
  if input.is_key_held(Key::Back)
  {
    step.z += speed;
  }
  if input.is_key_held(Key::Up)
  {
    step.y += speed;
  }
  if input.is_key_held(Key::Down)
  {
    step.y -= speed;
  }

  step
}

//
// ──────────────────────────────────────────────────────────────
//   FlyingControl: borrowed handle for direct manipulation
// ──────────────────────────────────────────────────────────────
//

pub struct FlyingControl<'a>
{
  nav: &'a mut FlyingNavigation,
  pose: &'a mut Pose,
}

impl<'a> FlyingControl<'a>
{
  pub(crate) fn new(nav: &'a mut FlyingNavigation, pose: &'a mut Pose) -> Self
  {
    Self { nav, pose }
  }

  /// World-space translation.
  pub fn translate(&mut self, offset: Vec3)
  {
    self.pose.position += offset;
    self.pose.dirty = true;
  }

  /// Translation expressed in the camera's local axes.
  pub fn translate_local(&mut self, offset: Vec3)
  {
    self.pose.position += self.nav.orient.transform_vector3(offset);
    self.pose.dirty = true;
  }

  /// Rotation about a world-space axis.
  pub fn rotate(&mut self, angle_degrees: f32, axis: Vec3)
  {
    self.nav.orient = rotation(angle_degrees, axis) * self.nav.orient;
    self.pose.dirty = true;
  }

  /// Rotation about an axis in the camera's local space.
  pub fn rotate_local(&mut self, angle_degrees: f32, axis: Vec3)
  {
    self.nav.orient = self.nav.orient * rotation(angle_degrees, axis);
    self.pose.dirty = true;
  }

  /// Reorients the camera to face `target` from its current position.
  pub fn look_at_point(&mut self, target: Vec3)
  {
    let dir = (target - self.pose.position).normalize_or_zero();
    if dir == Vec3::ZERO
    {
      return;
    }

    // Y-up breaks down when looking straight up or down.
    let up = if dir.cross(Vec3::Y).length_squared() < 1e-8 { Vec3::Z } else { Vec3::Y };

    // look_to is a pure rotation here, so its inverse is its transpose.
    self.nav.orient = Mat4::look_to_rh(Vec3::ZERO, dir, up).transpose();
    self.pose.dirty = true;
  }

  pub fn set_move_speed(&mut self, units_per_second: f32)
  {
    self.nav.move_speed = units_per_second;
  }

  pub fn move_speed(&self) -> f32
  {
    self.nav.move_speed
  }

  pub fn orientation(&self) -> Mat4
  {
    self.nav.orient
  }

  /// World-space direction the camera looks along (local -Z).
  pub fn forward(&self) -> Vec3
  {
    self.nav.orient.transform_vector3(Vec3::NEG_Z)
  }
}

fn rotation(angle_degrees: f32, axis: Vec3) -> Mat4
{
  Mat4::from_axis_angle(axis.normalize(), angle_degrees.to_radians())
}
