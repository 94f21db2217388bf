use bevy::prelude::*;

use crate::clock::{ClockController, ClockSettings};
use crate::visual::resize::debounce_window_resize;
use crate::visual::setup::{ClockSource, spawn_clock, teardown_clock};
use crate::visual::sync::{advance_clock, sync_clock_objects, tick_clock};

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClockSettings::embedded())
            .init_resource::<ClockSource>()
            .add_systems(Startup, spawn_clock)
            .add_systems(
                Update,
                (
                    // Poll the wall clock (1 Hz)
                    tick_clock,
                    // Fire due reveals, step fall/show tracks
                    advance_clock,
                    debounce_window_resize,
                    // Push uniforms, glyphs and visibility to the renderer
                    sync_clock_objects,
                )
                    .chain()
                    .run_if(resource_exists::<ClockController>),
            )
            .add_systems(
                Last,
                teardown_clock
                    .run_if(resource_exists::<ClockController>)
                    .run_if(on_message::<AppExit>),
            );
    }
}
