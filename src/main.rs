use bevy::prelude::*;

mod camera;
mod clock;
mod visual;

use bevy::window::WindowResolution;
use camera::CameraPlugin;
use visual::ParticleDigitMaterialPlugin;
use visual::ui::PanelPlugin;

use crate::visual::plugin::ClockPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Particle Clock".into(),
            resolution: WindowResolution::new(1600, 900),
            resizable: true,
            // Web builds mount into this canvas and track its container
            canvas: Some("#particle-clock".into()),
            fit_canvas_to_parent: true,
            ..default()
        }),
        ..default()
    }))
    .add_plugins(CameraPlugin)
    .add_plugins(ParticleDigitMaterialPlugin)
    .add_plugins(ClockPlugin)
    .add_plugins(PanelPlugin);

    app.run();
}
