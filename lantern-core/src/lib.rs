//! Camera transforms, projections and the light model behind the Lantern viewer.
//!
//! Conventions: right-handed, Y-up, column vectors, clip-space depth in [0, 1].
//! All angles crossing the public API are in degrees.

pub mod camera;
pub mod config;
pub mod input;
pub mod light;

pub use camera::{Camera, CameraUniform, Navigation, ProjectionKind};
pub use config::{ConfigError, SceneConfig};
pub use input::{InputSource, InputState, Key};
pub use light::{Light, LightId, LightKind, LightSet, LightSource};
