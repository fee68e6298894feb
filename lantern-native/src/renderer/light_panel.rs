use std::ops::RangeInclusive;

use glam::Vec3;
use lantern_core::light::{DirectionalLight, PointLight, SpotLight};
use lantern_core::{Light, LightSet, LightSource};

//
// ──────────────────────────────────────────────────────────────
//   Light panel: one collapsible section per light
// ──────────────────────────────────────────────────────────────
//

pub fn show(ctx: &egui::Context, lights: &mut LightSet, show_gizmos: &mut bool)
{
  egui::Window::new("Lights").default_width(280.0).show(ctx, |ui| {
    ui.checkbox(show_gizmos, "Show gizmos (F2)");
    ui.label("Tab: switch navigation   Esc: release cursor");
    ui.separator();

    egui::ScrollArea::vertical().show(ui, |ui| {
      for (id, light) in lights.iter_mut()
      {
        let title = format!("{} ({})", light.name(), kind_label(light));

        ui.push_id(id, |ui| {
          egui::CollapsingHeader::new(title).default_open(false).show(ui, |ui| match light
          {
            Light::Directional(l) => directional_controls(ui, l),
            Light::Point(l) => point_controls(ui, l),
            Light::Spot(l) => spot_controls(ui, l),
          });
        });
      }
    });
  });
}

fn kind_label(light: &Light) -> &'static str
{
  match light
  {
    Light::Directional(_) => "directional",
    Light::Point(_) => "point",
    Light::Spot(_) => "spot",
  }
}

fn directional_controls(ui: &mut egui::Ui, light: &mut DirectionalLight)
{
  colour_edit(ui, light);
  intensity_slider(ui, light, 0.1..=2.0);

  // Edited in place; the direction is re-normalized when read.
  vec3_drag(ui, "Direction", light.directional_mut().direction_mut(), -1.0..=1.0);
}

fn point_controls(ui: &mut egui::Ui, light: &mut PointLight)
{
  colour_edit(ui, light);
  vec3_drag(ui, "Position", light.positional_mut().local_position_mut(), -10.0..=10.0);
  ui.add(egui::Slider::new(light.range_mut(), 0.0..=10.0).text("Range"));
  intensity_slider(ui, light, 0.0..=10.0);
}

fn spot_controls(ui: &mut egui::Ui, light: &mut SpotLight)
{
  colour_edit(ui, light);
  intensity_slider(ui, light, 0.0..=10.0);
  vec3_drag(ui, "Position", light.positional_mut().local_position_mut(), -5.0..=5.0);

  let mut direction = light.local_direction();
  if vec3_drag(ui, "Direction", &mut direction, -1.0..=1.0)
  {
    light.set_direction(direction);
  }

  ui.add(egui::Slider::new(light.range_mut(), 0.0..=20.0).text("Range"));

  let angles = light.angles_mut();
  ui.add(egui::Slider::new(&mut angles.x, 0.0..=179.0).text("Inner angle"));
  ui.add(egui::Slider::new(&mut angles.y, 0.0..=179.0).text("Outer angle"));
}

//
// ──────────────────────────────────────────────────────────────
//   Shared widgets
// ──────────────────────────────────────────────────────────────
//

fn colour_edit<L: LightSource>(ui: &mut egui::Ui, light: &mut L)
{
  let mut rgb = light.colour().to_array();

  ui.horizontal(|ui| {
    ui.label("Colour");
    if ui.color_edit_button_rgb(&mut rgb).changed()
    {
      light.set_colour(Vec3::from_array(rgb));
    }
  });
}

fn intensity_slider<L: LightSource>(ui: &mut egui::Ui, light: &mut L, range: RangeInclusive<f32>)
{
  let mut intensity = light.intensity();
  if ui.add(egui::Slider::new(&mut intensity, range).text("Intensity")).changed()
  {
    light.set_intensity(intensity);
  }
}

/// Three drag fields on one row. Returns true if any of them changed.
fn vec3_drag(ui: &mut egui::Ui, label: &str, value: &mut Vec3, range: RangeInclusive<f32>) -> bool
{
  let mut changed = false;

  ui.horizontal(|ui| {
    ui.label(label);
    for component in [&mut value.x, &mut value.y, &mut value.z]
    {
      changed |= ui.add(egui::DragValue::new(component).range(range.clone()).speed(0.05)).changed();
    }
  });

  changed
}
