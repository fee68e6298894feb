use glam::Vec3;
use lantern_core::light::{PointLightUniform, SpotLightUniform};
use lantern_core::{InputState, LightSource, Navigation, SceneConfig};

#[test]
fn village_scene_builds_expected_camera_and_lights()
{
  let config = SceneConfig::default();

  let mut camera = config.build_camera();
  camera.set_viewport_size(1024, 768);
  camera.update(0.0, &InputState::new());

  assert!(matches!(camera.navigation(), Navigation::Flying(_)));
  assert_eq!(camera.position(), Vec3::new(0.0, 3.0, 5.0));
  assert_eq!(camera.far_clip(), 1000.0);

  let lights = config.build_lights();
  let names: Vec<_> = lights.iter().map(|(_, l)| l.name().to_owned()).collect();
  assert_eq!(names[0], "Directional_Light");
  assert_eq!(names[5], "Rainbow_Point_Light");
}

#[test]
fn scene_file_round_trips_through_disk()
{
  let json = r#"{
    "camera": {
      "navigation": { "mode": "orbit", "zoom": 12.0, "height": 1.5 },
      "projection": { "kind": "orthographic", "ortho_size": 8.0 }
    },
    "lights": [
      { "type": "point", "name": "lamp", "position": [1, 2, 3], "range": 0.0, "intensity": 2.0 },
      { "type": "spot", "name": "torch", "position": [0, 5, 0], "direction": [0, -1, 0],
        "range": 6.0, "inner_angle": 30.0, "outer_angle": 30.0 }
    ]
  }"#;

  let path = std::env::temp_dir().join(format!("lantern-scene-{}.json", std::process::id()));
  std::fs::write(&path, json).expect("write scene");
  let config = SceneConfig::load(&path).expect("load scene");
  std::fs::remove_file(&path).ok();

  let mut camera = config.build_camera();
  camera.set_viewport_size(800, 800);
  camera.update(0.0, &InputState::new());
  assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 1.5, 12.0), 1e-5));
  assert_eq!(camera.ortho_size(), 8.0);

  let lights = config.build_lights();
  let ids: Vec<_> = lights.iter().map(|(id, _)| id).collect();

  let lamp = PointLightUniform::from(lights.point(ids[0]).expect("point light"));
  assert!((lamp.inv_range_sq - 10_000.0).abs() < 1e-2);
  assert_eq!(lamp.colour, [2.0, 2.0, 2.0]);

  let torch = SpotLightUniform::from(lights.spot(ids[1]).expect("spot light"));
  assert!(torch.angles[0].is_finite());
  assert!((torch.angles[0] - 1000.0).abs() < 1e-2);
}

#[test]
fn debug_lines_cover_every_light()
{
  let lights = SceneConfig::default().build_lights();
  let verts = lights.debug_lines();

  assert!(!verts.is_empty());
  assert_eq!(verts.len() % 2, 0);
  assert!(verts.iter().all(|v| v.iter().all(|c| c.is_finite())));
}

#[test]
fn shipped_village_scene_parses()
{
  let json = include_str!("../../lantern-native/scenes/village.json");
  let config = SceneConfig::from_json_str(json).expect("village scene parses");

  assert_eq!(config.lights.len(), 7);

  let lights = config.build_lights();
  let spots: Vec<_> = lights.iter().filter_map(|(id, _)| lights.spot(id)).collect();
  assert_eq!(spots.len(), 1);
  assert_eq!(spots[0].input_angles(), glam::Vec2::new(25.0, 40.0));
}
