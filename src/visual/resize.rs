use bevy::prelude::*;
use bevy::window::WindowResized;

use crate::clock::ClockController;
use crate::clock::layout::centering_offset;

use super::setup::{ClockLayout, ClockRoot};

/// Collapses a burst of resize notifications into one, applied after the
/// window has been quiet for `delay` seconds.
#[derive(Resource, Debug, Clone)]
pub struct ResizeDebouncer {
    delay: f32,
    pending: Option<PendingResize>,
}

#[derive(Debug, Clone, Copy)]
struct PendingResize {
    width: f32,
    quiet_for: f32,
}

impl ResizeDebouncer {
    pub fn new(delay: f32) -> Self {
        Self {
            delay: delay.max(0.0),
            pending: None,
        }
    }

    /// Record a new width, restarting the quiet period
    pub fn push(&mut self, width: f32) {
        self.pending = Some(PendingResize {
            width,
            quiet_for: 0.0,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the latest width once the quiet period has elapsed
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        let pending = self.pending.as_mut()?;
        pending.quiet_for += dt;
        if pending.quiet_for >= self.delay {
            self.pending.take().map(|p| p.width)
        } else {
            None
        }
    }
}

/// System: Feed window resizes through the debouncer and rescale/re-center the clock
pub fn debounce_window_resize(
    time: Res<Time>,
    mut resized: MessageReader<WindowResized>,
    mut debouncer: ResMut<ResizeDebouncer>,
    mut controller: ResMut<ClockController>,
    layout: Res<ClockLayout>,
    mut roots: Query<&mut Transform, With<ClockRoot>>,
) {
    for event in resized.read() {
        debouncer.push(event.width);
    }
    if !debouncer.is_pending() {
        return;
    }

    let Some(width) = debouncer.tick(time.delta_secs()) else {
        return;
    };

    let scale = controller.on_resize(width);
    let offset = centering_offset(&layout.cells, scale);

    for mut transform in &mut roots {
        transform.scale = Vec3::splat(scale);
        // Only x is re-centered; y and z keep their placement
        transform.translation.x = offset;
    }

    info!("Clock resized: width={width}, scale={scale:.3}");
}
