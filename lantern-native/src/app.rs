use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use glam::Vec2;
use lantern_core::config::{CameraConfig, NavigationConfig};
use lantern_core::{Camera, InputState, LightSet, Navigation, SceneConfig};
use winit::{
  application::ApplicationHandler,
  dpi::PhysicalPosition,
  event::{ElementState, WindowEvent},
  event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
  keyboard::{KeyCode, PhysicalKey},
  window::{CursorGrabMode, Window, WindowId},
};

use crate::renderer::Renderer;

pub fn run() -> anyhow::Result<()>
{
  let scene = load_scene()?;
  let event_loop = EventLoop::new().context("failed to create event loop")?;
  let mut app = LanternApp::new(scene);

  event_loop.run_app(&mut app).context("event loop failed")?;
  Ok(())
}

fn load_scene() -> anyhow::Result<SceneConfig>
{
  match std::env::args().nth(1)
  {
    Some(path) => SceneConfig::load(&path).with_context(|| format!("failed to load scene {path}")),
    None =>
    {
      log::info!("no scene file given, using the built-in village scene");
      Ok(SceneConfig::default())
    }
  }
}

struct LanternApp
{
  scene: SceneConfig,
  window: Option<Arc<Window>>,
  renderer: Option<Renderer>,

  camera: Camera,
  lights: LightSet,
  input: InputState,

  cursor_captured: bool,
  show_gizmos: bool,
  last_frame: Instant,
}

impl LanternApp
{
  fn new(scene: SceneConfig) -> Self
  {
    let camera = scene.build_camera();
    let lights = scene.build_lights();

    Self {
      scene,
      window: None,
      renderer: None,
      camera,
      lights,
      input: InputState::new(),
      cursor_captured: false,
      show_gizmos: true,
      last_frame: Instant::now(),
    }
  }

  fn init_window_and_renderer(&mut self, event_loop: &ActiveEventLoop)
  {
    if self.window.is_some()
    {
      return;
    }

    let attrs = Window::default_attributes().with_title("Lantern");
    let window = match event_loop.create_window(attrs)
    {
      Ok(w) => Arc::new(w),
      Err(err) =>
      {
        log::error!("failed to create window: {err}");
        event_loop.exit();
        return;
      }
    };

    let size = window.inner_size();
    self.camera.set_viewport_size(size.width, size.height);
    self.input.set_viewport_height(size.height);

    match pollster::block_on(Renderer::new(window.clone()))
    {
      Ok(renderer) => self.renderer = Some(renderer),
      Err(err) =>
      {
        log::error!("{err:#}");
        event_loop.exit();
        return;
      }
    }

    self.window = Some(window);
    self.last_frame = Instant::now();
  }

  fn handle_window_event(&mut self, elwt: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    let window = match &self.window
    {
      Some(w) if w.id() == window_id => w.clone(),
      _ => return,
    };

    let gui_consumed = match &mut self.renderer
    {
      Some(renderer) => renderer.handle_gui_event(&window, &event),
      None => false,
    };

    let to_scene = reaches_scene(routing(&event), gui_consumed);
    if to_scene
    {
      self.input.handle_event(&event);
    }

    match event
    {
      WindowEvent::CloseRequested =>
      {
        elwt.exit();
      }

      WindowEvent::Resized(size) =>
      {
        if size.width == 0 || size.height == 0
        {
          return;
        }

        if let Some(renderer) = &mut self.renderer
        {
          renderer.resize(size.width, size.height);
        }

        self.camera.set_viewport_size(size.width, size.height);
        window.request_redraw();
      }

      WindowEvent::Focused(false) =>
      {
        self.camera.cancel_input();
        self.release_cursor(&window);
      }

      WindowEvent::KeyboardInput { event, .. }
        if to_scene && event.state == ElementState::Pressed && !event.repeat =>
      {
        match event.physical_key
        {
          PhysicalKey::Code(KeyCode::Escape) => self.on_escape(elwt, &window),
          PhysicalKey::Code(KeyCode::Tab) => self.toggle_navigation(&window),
          PhysicalKey::Code(KeyCode::F2) => self.show_gizmos = !self.show_gizmos,
          _ =>
          {}
        }
      }

      WindowEvent::RedrawRequested =>
      {
        self.frame(&window);
      }

      _ =>
      {}
    }
  }

  fn frame(&mut self, window: &Window)
  {
    let now = Instant::now();
    let delta_time = (now - self.last_frame).as_secs_f32();
    self.last_frame = now;

    self.forward_pointer_input(window);
    self.camera.update(delta_time, &self.input);

    if let Some(renderer) = &mut self.renderer
    {
      if let Err(err) = renderer.render(&mut self.camera, &mut self.lights, &mut self.show_gizmos)
      {
        log::warn!("frame skipped: {err:#}");
      }
    }

    self.input.end_frame();
  }

  /// Button edges and wheel movement go to the camera, then the cursor policy is applied.
  fn forward_pointer_input(&mut self, window: &Window)
  {
    if self.input.take_left_pressed()
    {
      self.camera.on_left_mouse_down();
      if self.camera.should_consume_cursor()
      {
        self.capture_cursor(window);
      }
    }

    if self.input.take_left_released()
    {
      self.camera.on_left_mouse_up();
      if self.camera.should_release_cursor()
      {
        self.release_cursor(window);
      }
    }

    let scroll = self.input.scroll();
    if scroll != Vec2::ZERO
    {
      self.camera.on_mouse_scrolled(scroll.x, scroll.y);
    }
  }

  fn on_escape(&mut self, elwt: &ActiveEventLoop, window: &Window)
  {
    if !self.cursor_captured
    {
      elwt.exit();
      return;
    }

    self.release_cursor(window);

    let size = window.inner_size();
    let centre = PhysicalPosition::new(size.width / 2, size.height / 2);
    if let Err(err) = window.set_cursor_position(centre)
    {
      log::debug!("cursor could not be recentred: {err}");
    }

    self.camera.cancel_input();
  }

  /// Tab swaps flying and orbit navigation, keeping the scene's projection settings.
  fn toggle_navigation(&mut self, window: &Window)
  {
    let want_orbit = matches!(self.camera.navigation(), Navigation::Flying(_));
    let scene_is_orbit = matches!(self.scene.camera.navigation, NavigationConfig::Orbit { .. });

    let navigation = if want_orbit == scene_is_orbit
    {
      self.scene.camera.navigation.clone()
    }
    else if want_orbit
    {
      NavigationConfig::default_orbit()
    }
    else
    {
      NavigationConfig::default()
    };

    let config = CameraConfig { navigation, projection: self.scene.camera.projection.clone() };
    let (width, height) = self.camera.projection().viewport_size();

    self.release_cursor(window);
    self.camera = config.build();
    self.camera.set_viewport_size(width, height);

    log::info!("navigation: {}", if want_orbit { "orbit" } else { "flying" });
  }

  fn capture_cursor(&mut self, window: &Window)
  {
    if self.cursor_captured
    {
      return;
    }

    let grabbed = window
      .set_cursor_grab(CursorGrabMode::Confined)
      .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(err) = grabbed
    {
      log::warn!("cursor grab unavailable: {err}");
    }

    window.set_cursor_visible(false);
    self.cursor_captured = true;
    log::trace!("cursor captured");
  }

  fn release_cursor(&mut self, window: &Window)
  {
    if !self.cursor_captured
    {
      return;
    }

    if let Err(err) = window.set_cursor_grab(CursorGrabMode::None)
    {
      log::warn!("cursor release failed: {err}");
    }

    window.set_cursor_visible(true);
    self.cursor_captured = false;
    log::trace!("cursor released");
  }
}

//
// ──────────────────────────────────────────────────────────────
//   Event routing between the egui overlay and the scene
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Routing
{
  Pointer,
  KeyPress,
  KeyRelease,
  Other,
}

fn routing(event: &WindowEvent) -> Routing
{
  match event
  {
    WindowEvent::MouseInput { .. } | WindowEvent::MouseWheel { .. } => Routing::Pointer,
    WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => Routing::KeyPress,
    WindowEvent::KeyboardInput { .. } => Routing::KeyRelease,
    _ => Routing::Other,
  }
}

/// Presses egui kept stay out of the camera and the shortcuts.
/// Releases always pass so a key held before egui took focus cannot stick.
fn reaches_scene(routing: Routing, gui_consumed: bool) -> bool
{
  match routing
  {
    Routing::Pointer | Routing::KeyPress => !gui_consumed,
    Routing::KeyRelease | Routing::Other => true,
  }
}

impl ApplicationHandler for LanternApp
{
  fn resumed(&mut self, event_loop: &ActiveEventLoop)
  {
    event_loop.set_control_flow(ControlFlow::Wait);
    self.init_window_and_renderer(event_loop);
  }

  fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent)
  {
    self.handle_window_event(event_loop, window_id, event);
  }

  fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop)
  {
    if let Some(window) = &self.window
    {
      window.request_redraw();
    }
  }
}
