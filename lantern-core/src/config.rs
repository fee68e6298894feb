use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, ProjectionKind};
use crate::light::{DirectionalLight, LightSet, LightSource, PointLight, SpotLight};

//
// ──────────────────────────────────────────────────────────────
//   Errors
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, thiserror::Error)]
pub enum ConfigError
{
  #[error("failed to read scene file {path}")]
  Io
  {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse scene description")]
  Parse(#[from] serde_json::Error),

  #[error("invalid scene description: {0}")]
  Invalid(String),
}

//
// ──────────────────────────────────────────────────────────────
//   Scene description (JSON)
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig
{
  pub camera: CameraConfig,
  pub lights: Vec<LightConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig
{
  pub navigation: NavigationConfig,
  pub projection: ProjectionConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NavigationConfig
{
  Flying
  {
    #[serde(default = "default_flying_position")]
    position: Vec3,
    #[serde(default = "default_look_at")]
    look_at: Vec3,
    #[serde(default = "default_move_speed")]
    move_speed: f32,
  },
  Orbit
  {
    #[serde(default = "default_zoom")]
    zoom: f32,
    #[serde(default)]
    height: f32,
    #[serde(default)]
    pitch: f32,
    #[serde(default)]
    yaw: f32,
  },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig
{
  pub kind: ProjectionKind,
  pub field_of_view: f32,
  pub ortho_size: f32,
  pub near_clip: f32,
  pub far_clip: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightConfig
{
  Directional
  {
    name: String,
    #[serde(default = "default_colour")]
    colour: Vec3,
    #[serde(default = "default_intensity")]
    intensity: f32,
    direction: Vec3,
  },
  Point
  {
    name: String,
    #[serde(default = "default_colour")]
    colour: Vec3,
    #[serde(default = "default_intensity")]
    intensity: f32,
    position: Vec3,
    #[serde(default = "default_range")]
    range: f32,
  },
  Spot
  {
    name: String,
    #[serde(default = "default_colour")]
    colour: Vec3,
    #[serde(default = "default_intensity")]
    intensity: f32,
    position: Vec3,
    direction: Vec3,
    #[serde(default = "default_range")]
    range: f32,
    inner_angle: f32,
    outer_angle: f32,
  },
}

//
// ──────────────────────────────────────────────────────────────
//   Defaults
// ──────────────────────────────────────────────────────────────
//

fn default_flying_position() -> Vec3
{
  Vec3::new(0.0, 3.0, 5.0)
}

fn default_look_at() -> Vec3
{
  Vec3::new(0.0, 2.0, 0.0)
}

fn default_move_speed() -> f32
{
  crate::camera::DEFAULT_MOVE_SPEED
}

fn default_zoom() -> f32
{
  crate::camera::DEFAULT_ZOOM
}

fn default_colour() -> Vec3
{
  Vec3::ONE
}

fn default_intensity() -> f32
{
  1.0
}

fn default_range() -> f32
{
  crate::light::DEFAULT_RANGE
}

impl Default for NavigationConfig
{
  fn default() -> Self
  {
    NavigationConfig::Flying {
      position: default_flying_position(),
      look_at: default_look_at(),
      move_speed: default_move_speed(),
    }
  }
}

impl NavigationConfig
{
  pub fn default_orbit() -> Self
  {
    NavigationConfig::Orbit { zoom: default_zoom(), height: 0.0, pitch: 0.0, yaw: 0.0 }
  }
}

impl Default for ProjectionConfig
{
  fn default() -> Self
  {
    Self {
      kind: ProjectionKind::Perspective,
      field_of_view: 60.0,
      ortho_size: 5.0,
      near_clip: 0.1,
      far_clip: 1000.0,
    }
  }
}

impl Default for SceneConfig
{
  /// The village scene: moonlight plus a road lamp, three lanterns and a coloured fill light.
  fn default() -> Self
  {
    let point = |name: &str, colour: [f32; 3], intensity: f32, position: [f32; 3], range: f32| {
      LightConfig::Point {
        name: name.to_owned(),
        colour: Vec3::from(colour),
        intensity,
        position: Vec3::from(position),
        range,
      }
    };

    Self {
      camera: CameraConfig::default(),
      lights: vec![
        LightConfig::Directional {
          name: "Directional_Light".to_owned(),
          colour: Vec3::ONE,
          intensity: 1.0,
          direction: Vec3::new(0.0, -1.0, -1.0),
        },
        point("Roadlamp_Point_Light", [1.0, 1.0, 1.0], 1.5, [-8.0, 6.5, 0.0], 0.9),
        point("Lantern_Point_Light_01", [1.0, 1.0, 0.1], 2.5, [1.9, 5.4, -3.5], 0.8),
        point("Lantern_Point_Light_02", [1.0, 1.0, 0.1], 2.5, [9.0, 5.6, -5.1], 0.8),
        point("Lantern_Point_Light_03", [1.0, 1.0, 0.1], 2.5, [5.2, 4.9, 1.0], 0.8),
        point("Rainbow_Point_Light", [1.0, 0.0, 0.0], 1.0, [-3.0, 2.0, 4.8], 10.0),
      ],
    }
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Loading
// ──────────────────────────────────────────────────────────────
//

impl SceneConfig
{
  pub fn from_json_str(json: &str) -> Result<Self, ConfigError>
  {
    let config: SceneConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
  }

  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError>
  {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path)
      .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;

    let config = Self::from_json_str(&json)?;
    log::info!("scene loaded from {} ({} lights)", path.display(), config.lights.len());
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError>
  {
    let proj = &self.camera.projection;

    if proj.near_clip <= 0.0 || proj.near_clip >= proj.far_clip
    {
      return Err(ConfigError::Invalid(format!(
        "clip planes must satisfy 0 < near < far (near={}, far={})",
        proj.near_clip, proj.far_clip
      )));
    }

    if proj.field_of_view <= 0.0 || proj.field_of_view >= 180.0
    {
      return Err(ConfigError::Invalid(format!(
        "field of view must be within (0, 180) degrees, got {}",
        proj.field_of_view
      )));
    }

    if proj.ortho_size <= 0.0
    {
      return Err(ConfigError::Invalid(format!("ortho size must be positive, got {}", proj.ortho_size)));
    }

    for light in &self.lights
    {
      match light
      {
        LightConfig::Point { name, range, .. } | LightConfig::Spot { name, range, .. } if *range < 0.0 =>
        {
          return Err(ConfigError::Invalid(format!("light {name}: range must not be negative")));
        }
        _ =>
        {}
      }
    }

    Ok(())
  }

  /// Camera in its configured mode. The viewport size is left to the host.
  pub fn build_camera(&self) -> Camera
  {
    self.camera.build()
  }

  pub fn build_lights(&self) -> LightSet
  {
    let mut lights = LightSet::new();
    for light in &self.lights
    {
      light.add_to(&mut lights);
    }
    lights
  }
}

impl CameraConfig
{
  pub fn build(&self) -> Camera
  {
    let mut camera = match &self.navigation
    {
      NavigationConfig::Flying { position, look_at, move_speed } =>
      {
        let mut camera = Camera::flying();
        camera.set_position(*position);
        if let Some(mut flying) = camera.flying_mut()
        {
          flying.set_move_speed(*move_speed);
          flying.look_at_point(*look_at);
        }
        camera
      }

      NavigationConfig::Orbit { zoom, height, pitch, yaw } =>
      {
        let mut camera = Camera::orbit();
        if let Some(mut orbit) = camera.orbit_mut()
        {
          orbit.set_zoom(*zoom);
          orbit.set_height(*height);
          orbit.add_pitch_yaw(*pitch, *yaw);
        }
        camera
      }
    };

    let proj = &self.projection;
    camera.set_projection_kind(proj.kind);
    camera.set_field_of_view(proj.field_of_view);
    camera.set_ortho_size(proj.ortho_size);
    camera.set_near_clip(proj.near_clip);
    camera.set_far_clip(proj.far_clip);
    camera
  }
}

impl LightConfig
{
  fn add_to(&self, lights: &mut LightSet)
  {
    match self
    {
      LightConfig::Directional { name, colour, intensity, direction } =>
      {
        let mut light = DirectionalLight::new(name.as_str());
        light.set_colour(*colour);
        light.set_intensity(*intensity);
        light.set_direction(*direction);
        lights.insert(light);
      }

      LightConfig::Point { name, colour, intensity, position, range } =>
      {
        let mut light = PointLight::new(name.as_str());
        light.set_colour(*colour);
        light.set_intensity(*intensity);
        light.set_position(*position);
        light.set_range(*range);
        lights.insert(light);
      }

      LightConfig::Spot { name, colour, intensity, position, direction, range, inner_angle, outer_angle } =>
      {
        let mut light = SpotLight::new(name.as_str());
        light.set_colour(*colour);
        light.set_intensity(*intensity);
        light.set_position(*position);
        light.set_direction(*direction);
        light.set_range(*range);
        light.set_input_angles(*inner_angle, *outer_angle);
        lights.insert(light);
      }
    }
  }
}

#[cfg(test)]
mod tests
{
  use super::*;
  use crate::camera::Navigation;

  #[test]
  fn empty_object_yields_default_scene()
  {
    let config = SceneConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SceneConfig::default());
  }

  #[test]
  fn default_scene_has_village_lights()
  {
    let lights = SceneConfig::default().build_lights();
    assert_eq!(lights.len(), 6);
  }

  #[test]
  fn orbit_mode_is_selected_by_tag()
  {
    let json = r#"{ "camera": { "navigation": { "mode": "orbit", "zoom": 8.0, "yaw": 20.0 } } }"#;
    let config = SceneConfig::from_json_str(json).unwrap();

    let camera = config.build_camera();
    match camera.navigation()
    {
      Navigation::Orbit(orbit) =>
      {
        assert_eq!(orbit.zoom(), 8.0);
        assert_eq!(orbit.yaw(), 20.0);
        assert_eq!(orbit.height(), 0.0);
      }
      Navigation::Flying(_) => panic!("expected orbit navigation"),
    }
  }

  #[test]
  fn inverted_clip_planes_are_rejected()
  {
    let json = r#"{ "camera": { "projection": { "near_clip": 10.0, "far_clip": 1.0 } } }"#;
    let err = SceneConfig::from_json_str(json).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn negative_range_is_rejected()
  {
    let json = r#"{ "lights": [ { "type": "point", "name": "bad", "position": [0, 0, 0], "range": -1.0 } ] }"#;
    let err = SceneConfig::from_json_str(json).unwrap_err();

    assert!(matches!(err, ConfigError::Invalid(_)));
  }

  #[test]
  fn malformed_json_is_a_parse_error()
  {
    let err = SceneConfig::from_json_str("{ lights: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
  }

  #[test]
  fn missing_file_is_an_io_error()
  {
    let err = SceneConfig::load("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
  }

  #[test]
  fn spot_light_from_json()
  {
    let json = r#"{ "lights": [ {
      "type": "spot", "name": "torch",
      "position": [0, 4, 0], "direction": [0, -2, 0],
      "inner_angle": 10.0, "outer_angle": 45.0
    } ] }"#;
    let lights = SceneConfig::from_json_str(json).unwrap().build_lights();

    let (id, _) = lights.iter().next().unwrap();
    let spot = lights.spot(id).unwrap();
    assert_eq!(spot.input_angles().to_array(), [10.0, 45.0]);
    assert_eq!(spot.local_direction(), Vec3::NEG_Y);
    assert_eq!(spot.range(), crate::light::DEFAULT_RANGE);
  }
}
