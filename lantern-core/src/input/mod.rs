use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

//
// ──────────────────────────────────────────────────────────────
//   Keys polled by the navigation modes
// ──────────────────────────────────────────────────────────────
//

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key
{
  Forward,
  Back,
  Left,
  Right,
  Up,
  Down,
  Boost,
}

impl Key
{
  fn from_code(code: KeyCode) -> Option<Self>
  {
    match code
    {
      KeyCode::KeyW => Some(Key::Forward),
      KeyCode::KeyS => Some(Key::Back),
      KeyCode::KeyA => Some(Key::Left),
      KeyCode::KeyD => Some(Key::Right),
      KeyCode::KeyQ => Some(Key::Up),
      KeyCode::KeyE => Some(Key::Down),
      KeyCode::ShiftLeft => Some(Key::Boost),
      _ => None,
    }
  }
}

/// Continuous input queried by the cameras during `update`.
///
/// Mouse positions are in pixels with the origin at the bottom-left of the viewport.
pub trait InputSource
{
  fn mouse_position(&self) -> Vec2;
  fn is_key_held(&self, key: Key) -> bool;
}

//
// ──────────────────────────────────────────────────────────────
//   InputState
// ──────────────────────────────────────────────────────────────
//

// Pixel scroll deltas are reported per pixel; treat this many as one wheel line.
const PIXELS_PER_LINE: f32 = 40.0;

#[derive(Debug, Default)]
pub struct InputState
{
  mouse: Vec2,
  viewport_height: f32,
  held: HashSet<Key>,

  left_pressed: bool,
  left_released: bool,
  scroll: Vec2,
}

impl InputState
{
  pub fn new() -> Self
  {
    Self::default()
  }

  pub fn handle_event(&mut self, event: &WindowEvent)
  {
    match event
    {
      WindowEvent::Resized(size) =>
      {
        self.set_viewport_height(size.height);
      }

      WindowEvent::CursorMoved { position, .. } =>
      {
        self.set_cursor_position(position.x as f32, position.y as f32);
      }

      WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => match state
      {
        ElementState::Pressed => self.left_pressed = true,
        ElementState::Released => self.left_released = true,
      },

      WindowEvent::MouseWheel { delta, .. } => match delta
      {
        MouseScrollDelta::LineDelta(x, y) => self.scroll += Vec2::new(*x, *y),
        MouseScrollDelta::PixelDelta(p) =>
        {
          self.scroll += Vec2::new(p.x as f32, p.y as f32) / PIXELS_PER_LINE;
        }
      },

      WindowEvent::KeyboardInput { event, .. } =>
      {
        if let PhysicalKey::Code(code) = event.physical_key
        {
          if let Some(key) = Key::from_code(code)
          {
            self.set_key_held(key, event.state == ElementState::Pressed);
          }
        }
      }

      WindowEvent::Focused(false) =>
      {
        self.held.clear();
      }

      _ =>
      {}
    }
  }

  pub fn set_viewport_height(&mut self, height: u32)
  {
    self.viewport_height = height as f32;
  }

  /// Takes window coordinates (origin top-left) and stores them y-flipped.
  pub fn set_cursor_position(&mut self, x: f32, y: f32)
  {
    self.mouse = Vec2::new(x, self.viewport_height - y);
  }

  pub fn set_key_held(&mut self, key: Key, held: bool)
  {
    if held
    {
      self.held.insert(key);
    }
    else
    {
      self.held.remove(&key);
    }
  }

  /// Returns true once per left-button press since the last call.
  pub fn take_left_pressed(&mut self) -> bool
  {
    std::mem::take(&mut self.left_pressed)
  }

  /// Returns true once per left-button release since the last call.
  pub fn take_left_released(&mut self) -> bool
  {
    std::mem::take(&mut self.left_released)
  }

  /// Wheel movement accumulated this frame, in lines.
  pub fn scroll(&self) -> Vec2
  {
    self.scroll
  }

  pub fn end_frame(&mut self)
  {
    self.left_pressed = false;
    self.left_released = false;
    self.scroll = Vec2::ZERO;
  }
}

impl InputSource for InputState
{
  fn mouse_position(&self) -> Vec2
  {
    self.mouse
  }

  fn is_key_held(&self, key: Key) -> bool
  {
    self.held.contains(&key)
  }
}
