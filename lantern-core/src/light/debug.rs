use std::f32::consts::TAU;

use glam::{Mat4, Quat, Vec3};

use super::{DirectionalLight, Light, LightSource, PointLight, SpotLight};

//
// ──────────────────────────────────────────────────────────────
//   Constants
// ──────────────────────────────────────────────────────────────
//

const MARKER_ARM: f32 = 0.15;
const SPHERE_SLICES: usize = 64;
const CONE_SLICES: usize = 24;
const INNER_CONE_SHADE: f32 = 0.6;

const ARROW_LENGTH: f32 = 1.8;
const ARROW_TIP: f32 = 0.25;

//
// ──────────────────────────────────────────────────────────────
//   Vertex layout: [x, y, z,  r, g, b]  (matches lines shader)
// ──────────────────────────────────────────────────────────────
//

pub type DebugVertex = [f32; 6];

pub fn make_vertex(pos: Vec3, col: Vec3) -> DebugVertex
{
  [pos.x, pos.y, pos.z, col.x, col.y, col.z]
}

/// Rotation carrying +Z onto `direction`; gizmos are modelled along +Z.
pub fn rotation_from_direction(direction: Vec3) -> Mat4
{
  let dir = direction.normalize_or_zero();
  if dir == Vec3::ZERO
  {
    return Mat4::IDENTITY;
  }

  // from_rotation_arc picks a perpendicular axis when `dir` is -Z.
  Mat4::from_quat(Quat::from_rotation_arc(Vec3::Z, dir))
}

//
// ──────────────────────────────────────────────────────────────
//   Per-light gizmos
// ──────────────────────────────────────────────────────────────
//

pub fn push_light(verts: &mut Vec<DebugVertex>, light: &Light)
{
  match light
  {
    Light::Directional(l) => push_directional(verts, l),
    Light::Point(l) => push_point(verts, l),
    Light::Spot(l) => push_spot(verts, l),
  }
}

/// Arrow at the origin pointing along the light direction.
pub fn push_directional(verts: &mut Vec<DebugVertex>, light: &DirectionalLight)
{
  let rot = rotation_from_direction(light.direction());
  let col = light.colour();

  push_line(verts, rot, Vec3::new(0.0, 0.0, -ARROW_LENGTH), Vec3::ZERO, col);

  for side in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y]
  {
    let back = side * ARROW_TIP + Vec3::new(0.0, 0.0, -ARROW_TIP);
    push_line(verts, rot, back, Vec3::ZERO, col);
  }
}

/// Marker at the light plus a wire sphere the size of its range.
pub fn push_point(verts: &mut Vec<DebugVertex>, light: &PointLight)
{
  let transform = light.transform_matrix();
  let col = light.colour();

  push_cross(verts, transform, col);
  push_wire_sphere(verts, transform * Mat4::from_scale(Vec3::splat(light.range())), col);
}

/// Marker plus outer and inner cones, both reaching out to the range.
pub fn push_spot(verts: &mut Vec<DebugVertex>, light: &SpotLight)
{
  let transform = light.transform_matrix();
  let cone = transform * rotation_from_direction(light.local_direction());
  let col = light.colour();
  let range = light.range();

  push_cross(verts, transform, col);
  push_cone(verts, cone, light.outer_angle(), range, col);
  push_cone(
    verts,
    cone,
    light.inner_angle().min(light.outer_angle()),
    range,
    col * INNER_CONE_SHADE,
  );
}

//
// ──────────────────────────────────────────────────────────────
//   Geometry helpers
// ──────────────────────────────────────────────────────────────
//

fn push_line(verts: &mut Vec<DebugVertex>, transform: Mat4, a: Vec3, b: Vec3, col: Vec3)
{
  verts.push(make_vertex(transform.transform_point3(a), col));
  verts.push(make_vertex(transform.transform_point3(b), col));
}

fn push_cross(verts: &mut Vec<DebugVertex>, transform: Mat4, col: Vec3)
{
  for axis in [Vec3::X, Vec3::Y, Vec3::Z]
  {
    push_line(verts, transform, -axis * MARKER_ARM, axis * MARKER_ARM, col);
  }
}

/// Three unit great circles (XY, XZ, YZ) under `transform`.
fn push_wire_sphere(verts: &mut Vec<DebugVertex>, transform: Mat4, col: Vec3)
{
  for i in 0..SPHERE_SLICES
  {
    let (y0, x0) = (TAU * i as f32 / SPHERE_SLICES as f32).sin_cos();
    let (y1, x1) = (TAU * (i + 1) as f32 / SPHERE_SLICES as f32).sin_cos();

    push_line(verts, transform, Vec3::new(x0, y0, 0.0), Vec3::new(x1, y1, 0.0), col);
    push_line(verts, transform, Vec3::new(x0, 0.0, y0), Vec3::new(x1, 0.0, y1), col);
    push_line(verts, transform, Vec3::new(0.0, y0, x0), Vec3::new(0.0, y1, x1), col);
  }
}

/// Cone with its apex at the origin opening along +Z; `angle` is the full width in degrees.
fn push_cone(verts: &mut Vec<DebugVertex>, transform: Mat4, angle: f32, range: f32, col: Vec3)
{
  let radius = (angle.to_radians() * 0.5).sin() * range;

  for i in 0..CONE_SLICES
  {
    let (y0, x0) = (TAU * i as f32 / CONE_SLICES as f32).sin_cos();
    let (y1, x1) = (TAU * (i + 1) as f32 / CONE_SLICES as f32).sin_cos();

    let rim0 = Vec3::new(x0 * radius, y0 * radius, range);
    let rim1 = Vec3::new(x1 * radius, y1 * radius, range);

    push_line(verts, transform, Vec3::ZERO, rim0, col);
    push_line(verts, transform, rim0, rim1, col);
  }
}

#[cfg(test)]
mod tests
{
  use super::*;

  const EPS: f32 = 1e-5;

  fn position(v: &DebugVertex) -> Vec3
  {
    Vec3::new(v[0], v[1], v[2])
  }

  #[test]
  fn rotation_maps_z_onto_direction()
  {
    for dir in [Vec3::X, Vec3::new(0.0, -1.0, -1.0), Vec3::Y, Vec3::Z]
    {
      let rotated = rotation_from_direction(dir).transform_vector3(Vec3::Z);
      assert!(rotated.abs_diff_eq(dir.normalize(), EPS), "{dir:?} -> {rotated:?}");
    }
  }

  #[test]
  fn rotation_handles_opposite_direction()
  {
    let rot = rotation_from_direction(Vec3::NEG_Z);

    assert!(rot.is_finite());
    assert!(rot.transform_vector3(Vec3::Z).abs_diff_eq(Vec3::NEG_Z, EPS));
  }

  #[test]
  fn point_sphere_reaches_range()
  {
    let mut light = PointLight::new("lamp");
    light.set_position(Vec3::new(1.0, 2.0, 3.0));
    light.set_range(2.5);
    light.set_colour(Vec3::new(1.0, 1.0, 0.1));

    let mut verts = Vec::new();
    push_point(&mut verts, &light);

    assert_eq!(verts.len(), 6 + SPHERE_SLICES * 6);
    for v in &verts[6..]
    {
      let dist = (position(v) - light.position()).length();
      assert!((dist - 2.5).abs() < 1e-4);
      assert_eq!(&v[3..], &[1.0, 1.0, 0.1]);
    }
  }

  #[test]
  fn spot_cones_open_along_direction()
  {
    let mut light = SpotLight::new("torch");
    light.set_direction(Vec3::NEG_Y);
    light.set_input_angles(20.0, 60.0);
    light.set_range(4.0);

    let mut verts = Vec::new();
    push_spot(&mut verts, &light);

    assert_eq!(verts.len(), 6 + 2 * CONE_SLICES * 4);

    // First outer-cone rim vertex sits at range along the axis, offset by the cone radius.
    let rim = position(&verts[7]);
    let outer_radius = 30f32.to_radians().sin() * 4.0;
    assert!((rim.y + 4.0).abs() < 1e-4);
    assert!((Vec3::new(rim.x, 0.0, rim.z).length() - outer_radius).abs() < 1e-4);
  }

  #[test]
  fn inner_cone_is_shaded_and_capped_by_outer()
  {
    let mut light = SpotLight::new("torch");
    light.set_input_angles(80.0, 40.0);
    light.set_range(1.0);

    let mut verts = Vec::new();
    push_spot(&mut verts, &light);

    let inner_start = 6 + CONE_SLICES * 4;
    let outer_rim = position(&verts[7]);
    let inner_rim = position(&verts[inner_start + 1]);

    assert!(outer_rim.abs_diff_eq(inner_rim, EPS));
    assert!((verts[inner_start][3] - INNER_CONE_SHADE).abs() < EPS);
  }

  #[test]
  fn directional_arrow_points_along_direction()
  {
    let mut light = DirectionalLight::new("sun");
    light.set_direction(Vec3::new(0.0, -1.0, 0.0));

    let mut verts = Vec::new();
    push_directional(&mut verts, &light);

    assert_eq!(verts.len(), 10);
    assert!(position(&verts[0]).abs_diff_eq(Vec3::new(0.0, ARROW_LENGTH, 0.0), EPS));
    assert!(position(&verts[1]).abs_diff_eq(Vec3::ZERO, EPS));
  }
}
