use glam::{Mat4, Vec3};
use lantern_core::camera::DEFAULT_MOVE_SPEED;
use lantern_core::{Camera, InputState, Key};

const EPS: f32 = 1e-4;

fn viewport(camera: &mut Camera, input: &mut InputState)
{
  camera.set_viewport_size(1024, 768);
  input.set_viewport_height(768);
}

fn assert_inverse_law(camera: &Camera)
{
  let product = camera.view_matrix() * camera.world_matrix();
  assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5), "view * world = {product:?}");

  let product = camera.world_matrix() * camera.view_matrix();
  assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5), "world * view = {product:?}");
}

#[test]
fn flying_camera_looks_at_target_and_moves_forward()
{
  let mut input = InputState::new();
  let mut camera = Camera::flying();
  viewport(&mut camera, &mut input);

  camera.set_position(Vec3::new(0.0, 3.0, 5.0));
  let forward = {
    let mut flying = camera.flying_mut().expect("flying camera");
    flying.look_at_point(Vec3::new(0.0, 2.0, 0.0));
    flying.forward()
  };

  let expected = (Vec3::new(0.0, 2.0, 0.0) - Vec3::new(0.0, 3.0, 5.0)).normalize();
  assert!(forward.abs_diff_eq(expected, EPS));

  // Sync the cursor, then capture without moving the mouse.
  input.set_cursor_position(512.0, 384.0);
  camera.update(1.0 / 60.0, &input);
  camera.on_left_mouse_down();

  input.set_key_held(Key::Forward, true);
  camera.update(1.0 / 60.0, &input);

  let moved = Vec3::new(0.0, 3.0, 5.0) + expected * (DEFAULT_MOVE_SPEED / 60.0);
  assert!(camera.position().abs_diff_eq(moved, EPS), "position = {:?}", camera.position());
  assert_inverse_law(&camera);
}

#[test]
fn orbit_camera_moves_on_fixed_radius_arc()
{
  let input = InputState::new();
  let mut camera = Camera::orbit();
  {
    let mut orbit = camera.orbit_mut().expect("orbit camera");
    orbit.set_zoom(5.0);
    orbit.set_height(0.0);
  }
  camera.update(1.0 / 60.0, &input);

  assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));

  camera.orbit_mut().expect("orbit camera").add_yaw(30.0);
  camera.update(1.0 / 60.0, &input);

  let position = camera.position();
  let (sin, cos) = 30f32.to_radians().sin_cos();
  assert!((position.length() - 5.0).abs() < EPS);
  assert!(position.abs_diff_eq(Vec3::new(0.0, 5.0 * sin, 5.0 * cos), EPS), "position = {position:?}");
  assert_inverse_law(&camera);
}

#[test]
fn orbit_yaw_and_zoom_stay_in_range_under_any_input()
{
  let input = InputState::new();
  let mut camera = Camera::orbit();

  for (yaw, zoom) in [(500.0, -3.0), (-1000.0, 400.0), (45.0, 0.5), (-89.0, 19.9)]
  {
    {
      let mut orbit = camera.orbit_mut().expect("orbit camera");
      orbit.add_yaw(yaw);
      orbit.set_zoom(zoom);
    }
    camera.update(0.016, &input);

    let orbit = camera.orbit_mut().expect("orbit camera");
    assert!((-90.0..=90.0).contains(&orbit.yaw()));
    assert!((1.0..=20.0).contains(&orbit.zoom()));
  }
}

#[test]
fn inverse_law_holds_across_input_sequences()
{
  let mut input = InputState::new();
  let mut camera = Camera::flying();
  viewport(&mut camera, &mut input);
  camera.set_position(Vec3::new(2.0, 1.0, -4.0));

  input.set_cursor_position(100.0, 100.0);
  camera.update(0.016, &input);
  camera.on_left_mouse_down();

  let path = [(140.0, 90.0), (180.0, 200.0), (60.0, 10.0), (300.0, 400.0)];
  let keys = [Key::Forward, Key::Left, Key::Up, Key::Boost];

  for ((x, y), key) in path.into_iter().zip(keys)
  {
    input.set_cursor_position(x, y);
    input.set_key_held(key, true);
    camera.update(0.016, &input);
    assert_inverse_law(&camera);
  }

  let mut orbit = Camera::orbit();
  orbit.set_viewport_size(1024, 768);
  orbit.on_left_mouse_down();
  for (x, y) in path
  {
    input.set_cursor_position(x, y);
    orbit.update(0.016, &input);
    assert_inverse_law(&orbit);
  }
}

#[test]
fn view_projection_is_projection_times_view()
{
  let mut input = InputState::new();
  let mut camera = Camera::orbit();
  viewport(&mut camera, &mut input);
  camera.orbit_mut().expect("orbit camera").add_pitch_yaw(35.0, -20.0);
  camera.update(0.016, &input);

  let expected = camera.projection_matrix() * camera.view_matrix();
  assert!(camera.view_projection().abs_diff_eq(expected, 1e-5));
}

#[test]
fn escape_style_cancel_stops_flying_navigation()
{
  let mut input = InputState::new();
  let mut camera = Camera::flying();
  viewport(&mut camera, &mut input);
  camera.update(0.016, &input);
  camera.on_left_mouse_down();

  camera.cancel_input();
  input.set_key_held(Key::Forward, true);
  camera.update(1.0, &input);

  assert_eq!(camera.position(), Vec3::ZERO);
}

#[test]
fn wheel_event_zooms_orbit_camera_through_input_state()
{
  use winit::dpi::{PhysicalPosition, PhysicalSize};
  use winit::event::{DeviceId, MouseScrollDelta, TouchPhase, WindowEvent};

  let mut input = InputState::new();
  input.handle_event(&WindowEvent::Resized(PhysicalSize::new(800, 600)));
  input.handle_event(&WindowEvent::MouseWheel {
    device_id: DeviceId::dummy(),
    delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 80.0)),
    phase: TouchPhase::Moved,
  });

  let mut camera = Camera::orbit();
  camera.set_viewport_size(800, 600);

  let scroll = input.scroll();
  camera.on_mouse_scrolled(scroll.x, scroll.y);
  camera.update(0.016, &input);
  input.end_frame();

  assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-5));
}
