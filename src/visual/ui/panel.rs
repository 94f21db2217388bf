//! Debug panel for live style tweaks.
//!
//! Every edit replaces the controller's style, which fans the values out to
//! all slot and colon uniforms. Nothing is persisted.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::clock::style::{FALL_DISTANCE_RANGE, PARTICLE_SIZE_RANGE};
use crate::clock::time_string::DIGIT_POSITIONS;
use crate::clock::{ClockController, ClockStyle, PairState, Rgb8};

pub struct PanelPlugin;

impl Plugin for PanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin::default()).add_systems(
            EguiPrimaryContextPass,
            clock_panel.run_if(resource_exists::<ClockController>),
        );
    }
}

/// System: Draw the panel and apply any edits
pub fn clock_panel(
    mut contexts: EguiContexts,
    mut controller: ResMut<ClockController>,
    mut clear_color: ResMut<ClearColor>,
) -> Result {
    let mut style = *controller.style();
    let mut changed = false;

    egui::Window::new("Particle Clock")
        .resizable(false)
        .default_width(240.0)
        .show(contexts.ctx_mut()?, |ui| {
            changed |= color_row(ui, "background", &mut style.background);
            changed |= color_row(ui, "color", &mut style.primary_color);
            changed |= color_row(ui, "final color", &mut style.secondary_color);
            changed |= ui
                .add(
                    egui::Slider::new(&mut style.particle_size, PARTICLE_SIZE_RANGE)
                        .logarithmic(true)
                        .text("particle size"),
                )
                .changed();
            changed |= ui
                .add(
                    egui::Slider::new(&mut style.fall_distance, FALL_DISTANCE_RANGE)
                        .text("fall distance"),
                )
                .changed();
            ui.separator();
            ui.label(format!("showing {}", controller.displayed()));
            ui.label(pair_summary(&controller));
            ui.label(format!(
                "scale {:.2}, t={:.1}s, {} reveals pending{}",
                controller.scale(),
                controller.elapsed(),
                controller.pending_reveals().len(),
                if controller.is_settled() { "" } else { ", animating" }
            ));
        });

    if changed {
        apply_panel_style(&mut controller, &mut clear_color, style);
    }
    Ok(())
}

/// Visible slot per position, `from>to` while a pair flips
fn pair_summary(controller: &ClockController) -> String {
    let pairs: Vec<String> = (0..DIGIT_POSITIONS)
        .map(|position| match controller.pair_state(position) {
            Some(PairState::Visible { slot }) => slot.to_string(),
            Some(PairState::Transitioning { from, to }) => format!("{from}>{to}"),
            Some(PairState::Hidden) | None => "-".to_string(),
        })
        .collect();
    format!("slots {}", pairs.join(" "))
}

fn color_row(ui: &mut egui::Ui, label: &str, color: &mut Rgb8) -> bool {
    ui.horizontal(|ui| {
        let changed = ui.color_edit_button_srgb(&mut color.0).changed();
        ui.label(label);
        changed
    })
    .inner
}

fn apply_panel_style(controller: &mut ClockController, clear_color: &mut ClearColor, style: ClockStyle) {
    let [r, g, b] = style.background.0;
    clear_color.0 = Color::srgb_u8(r, g, b);
    controller.set_style(style);
    debug!("Clock style updated: {:?}", controller.style());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockSettings;
    use crate::clock::time_string::ClockTime;

    #[test]
    fn test_pair_summary() {
        let mut controller = ClockController::new(&ClockSettings::default());
        assert_eq!(pair_summary(&controller), "slots - - - - - -");

        controller.update_displayed_time(ClockTime::new(12, 34, 56));
        assert_eq!(pair_summary(&controller), "slots 1>0 3>2 5>4 7>6 9>8 11>10");
    }
}
