use bevy::prelude::*;

use crate::clock::ClockController;
use crate::visual::glyphs::GlyphTextures;
use crate::visual::material::{ParticleDigitMaterial, ParticleDigitUniform};
use crate::visual::setup::{ClockObject, ClockSource, ClockTicker};

/// System: Poll the wall clock once per tick and start digit transitions
pub fn tick_clock(
    time: Res<Time>,
    source: Res<ClockSource>,
    mut ticker: ResMut<ClockTicker>,
    mut controller: ResMut<ClockController>,
) {
    if !ticker.0.tick(time.delta()).just_finished() {
        return;
    }

    for transition in controller.update_displayed_time(source.0.now()) {
        debug!(
            "🔢 position {}: slot {} falls, slot {} rises as {} at t={:.2}s",
            transition.position,
            transition.hidden,
            transition.revealed,
            transition.glyph.to_u8(),
            transition.reveal_at
        );
    }
}

/// System: Step reveals and animation tracks by the frame delta
pub fn advance_clock(time: Res<Time>, mut controller: ResMut<ClockController>) {
    controller.advance(time.delta_secs());
}

/// System: Copy controller state onto the slot entities and their materials
///
/// This is the only place the controller's uniforms reach the GPU.
pub fn sync_clock_objects(
    controller: Res<ClockController>,
    glyphs: Res<GlyphTextures>,
    mut materials: ResMut<Assets<ParticleDigitMaterial>>,
    mut objects: Query<(
        &ClockObject,
        &MeshMaterial3d<ParticleDigitMaterial>,
        &mut Visibility,
    )>,
) {
    for (object, material_handle, mut visibility) in &mut objects {
        let (uniforms, rendered, glyph) = match *object {
            ClockObject::Digit(index) => {
                let Some(slot) = controller.slot(index) else {
                    continue;
                };
                (&slot.uniforms, slot.rendered, slot.glyph.map(|d| glyphs.digit(d)))
            }
            ClockObject::Colon(index) => {
                let Some(colon) = controller.colons().get(index) else {
                    continue;
                };
                (&colon.uniforms, colon.rendered, None)
            }
        };

        let target = if rendered {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(target);

        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };
        material.data = ParticleDigitUniform::from(uniforms);
        if let Some(glyph) = glyph {
            if material.glyph != glyph {
                material.glyph = glyph;
            }
        }
    }
}
