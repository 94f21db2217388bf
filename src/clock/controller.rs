//! Digit clock controller.
//!
//! Owns the twelve digit slots and two colons, diffs the displayed `HHMMSS`
//! string once per tick and drives the fall-away / rise-in animations. Nothing
//! here touches the renderer; Bevy systems copy the resulting uniforms and
//! visibility flags onto entities every frame.

use bevy::prelude::Resource;

use super::digit::Digit;
use super::easing::Ease;
use super::error::{ClockError, Result};
use super::layout::ScaleRule;
use super::settings::{ClockSettings, TimingSettings};
use super::slots::{COLON_COUNT, ColonSlot, DigitSlot, SLOT_COUNT};
use super::style::{ClockStyle, apply_style};
use super::time_string::{ClockTime, SENTINEL, changed_positions};
use super::tween::{AnimationHandle, TrackStep, Tween};

/// Deferred half of a digit change. The glyph is bound to the slot when the
/// command fires, so a slot still falling keeps its old shape until then.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealCommand {
    pub slot: usize,
    pub glyph: Digit,
    pub reveal_at: f64,
}

/// One digit position switching from one slot to its partner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitTransition {
    pub position: usize,
    /// Slot that started falling away
    pub hidden: usize,
    /// Slot that will rise in with `glyph`
    pub revealed: usize,
    pub glyph: Digit,
    pub reveal_at: f64,
}

/// Where a digit pair is in its flip cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairState {
    /// Neither slot shown yet (before the first tick)
    Hidden,
    Visible { slot: usize },
    Transitioning { from: usize, to: usize },
}

#[derive(Resource, Debug)]
pub struct ClockController {
    slots: Vec<DigitSlot>,
    colons: [ColonSlot; COLON_COUNT],
    /// Last string handed to `update_displayed_time`, `None` before the first tick
    displayed: Option<String>,
    style: ClockStyle,
    timing: TimingSettings,
    scale_rule: ScaleRule,
    scale: f32,
    /// Seconds since the controller was created
    elapsed: f64,
    reveals: Vec<RevealCommand>,
    colon_reveal_at: Option<f64>,
}

impl ClockController {
    pub fn new(settings: &ClockSettings) -> Self {
        let timing = settings.timing;
        let style = settings.style();

        // Draw order equals slot index, later slots reveal slightly later
        let mut slots: Vec<DigitSlot> = (0..SLOT_COUNT)
            .map(|i| DigitSlot::new(i, i as f32 * timing.reveal_stagger))
            .collect();
        let mut colons: [ColonSlot; COLON_COUNT] = Default::default();

        for slot in &mut slots {
            apply_style(&mut slot.uniforms, &style);
        }
        for colon in &mut colons {
            apply_style(&mut colon.uniforms, &style);
        }

        Self {
            slots,
            colons,
            displayed: None,
            style,
            timing,
            scale_rule: settings.layout.scale_rule(),
            scale: 1.0,
            elapsed: 0.0,
            reveals: Vec::new(),
            colon_reveal_at: Some(timing.colon_reveal_delay as f64),
        }
    }

    // === Queries ===

    pub fn slots(&self) -> &[DigitSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&DigitSlot> {
        self.slots.get(index)
    }

    pub fn colons(&self) -> &[ColonSlot] {
        &self.colons
    }

    /// The `HHMMSS` string the slots are showing (or moving toward)
    pub fn displayed(&self) -> &str {
        self.displayed.as_deref().unwrap_or(SENTINEL)
    }

    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn pending_reveals(&self) -> &[RevealCommand] {
        &self.reveals
    }

    /// Whether any animation or reveal is still outstanding
    pub fn is_settled(&self) -> bool {
        self.reveals.is_empty()
            && self.colon_reveal_at.is_none()
            && self.slots.iter().all(|s| !s.is_animating())
            && self.colons.iter().all(|c| !c.show.is_running())
    }

    /// Flip state of one digit position, `None` past the last position
    pub fn pair_state(&self, position: usize) -> Option<PairState> {
        let even = self.slots.get(position * 2)?;
        let odd = self.slots.get(even.partner_index())?;

        let pending = self
            .reveals
            .iter()
            .rev()
            .find(|cmd| self.slots[cmd.slot].position() == position)
            .map(|cmd| cmd.slot);
        let incoming = pending.or(if even.is_visible {
            Some(even.index)
        } else if odd.is_visible {
            Some(odd.index)
        } else {
            None
        });

        let state = match incoming {
            None => PairState::Hidden,
            Some(to) => {
                let in_flight = pending.is_some() || even.is_animating() || odd.is_animating();
                if in_flight {
                    PairState::Transitioning {
                        from: self.slots[to].partner_index(),
                        to,
                    }
                } else {
                    PairState::Visible { slot: to }
                }
            }
        };
        Some(state)
    }

    // === Mutation ===

    /// Diff `now` against the displayed string and start a transition for
    /// every changed position. The first call transitions all six positions.
    /// Returns the transitions started.
    pub fn update_displayed_time(&mut self, now: ClockTime) -> Vec<DigitTransition> {
        let next = now.display_string();
        let mut transitions = Vec::new();

        for position in changed_positions(self.displayed.as_deref(), &next) {
            let Some(glyph) = next.chars().nth(position).and_then(Digit::from_char) else {
                log::warn!("unexpected character at position {position} in {next:?}");
                continue;
            };

            let even = &self.slots[position * 2];
            let active = if even.is_visible {
                even.index
            } else {
                even.partner_index()
            };
            let inactive = self.slots[active].partner_index();

            if let Err(err) = self.hide_slot(active) {
                log::warn!("skipping position {position}: {err}");
                continue;
            }

            let reveal_at = self.elapsed
                + self.timing.reveal_base_delay as f64
                + self.slots[inactive].reveal_delay as f64;
            self.queue_reveal(RevealCommand {
                slot: inactive,
                glyph,
                reveal_at,
            });

            transitions.push(DigitTransition {
                position,
                hidden: active,
                revealed: inactive,
                glyph,
                reveal_at,
            });
        }

        if !transitions.is_empty() {
            log::debug!(
                "clock {} -> {} ({} digit transitions)",
                self.displayed(),
                next,
                transitions.len()
            );
        }
        self.displayed = Some(next);
        transitions
    }

    /// Start the fall-away animation on a digit slot. The slot stays
    /// rendered until the fall completes.
    pub fn hide_slot(&mut self, index: usize) -> Result<AnimationHandle> {
        let fall_duration = self.timing.fall_duration;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ClockError::SlotOutOfRange(index))?;

        slot.is_visible = false;
        slot.show.cancel();
        Ok(slot.fall.start(
            Tween::new(0.0, 1.0, fall_duration)
                .with_delay(slot.reveal_delay)
                .with_ease(Ease::InOutCubic),
        ))
    }

    /// Start the rise-in animation on a digit slot, cancelling any fall
    /// still in flight.
    pub fn show_slot(&mut self, index: usize) -> Result<AnimationHandle> {
        let show_duration = self.timing.show_duration;
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(ClockError::SlotOutOfRange(index))?;

        slot.is_visible = true;
        slot.rendered = true;

        // A fall still running would hide the object again when it completes
        slot.fall.cancel();
        slot.uniforms.fall_progress = 0.0;
        slot.uniforms.show_progress = 0.0;

        Ok(slot
            .show
            .start(Tween::new(0.0, 1.0, show_duration).with_ease(Ease::OutCubic)))
    }

    /// Recompute the root scale for a container width and push it into
    /// every uniform set. Returns the new scale.
    pub fn on_resize(&mut self, width: f32) -> f32 {
        self.scale = self.scale_rule.scale_for_width(width);
        for slot in &mut self.slots {
            slot.uniforms.scale = self.scale;
        }
        for colon in &mut self.colons {
            colon.uniforms.scale = self.scale;
        }
        self.scale
    }

    /// Replace the style and fan it out to every slot and colon
    pub fn set_style(&mut self, style: ClockStyle) {
        self.style = style.clamped();
        for slot in &mut self.slots {
            apply_style(&mut slot.uniforms, &self.style);
        }
        for colon in &mut self.colons {
            apply_style(&mut colon.uniforms, &self.style);
        }
    }

    /// Advance the controller clock: step every track, then fire due reveals.
    /// Animations started by a reveal begin moving on the following frame.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += dt as f64;

        let time = self.elapsed as f32;

        for slot in &mut self.slots {
            slot.uniforms.time = time;

            match slot.fall.step(dt) {
                TrackStep::Idle => {}
                TrackStep::Running(value) => slot.uniforms.fall_progress = value,
                TrackStep::Completed(_, _) => {
                    slot.rendered = false;
                    slot.uniforms.fall_progress = 0.0;
                }
            }

            match slot.show.step(dt) {
                TrackStep::Idle => {}
                TrackStep::Running(value) | TrackStep::Completed(_, value) => {
                    slot.uniforms.show_progress = value;
                }
            }
        }

        for colon in &mut self.colons {
            colon.uniforms.time = time;
            match colon.show.step(dt) {
                TrackStep::Idle => {}
                TrackStep::Running(value) | TrackStep::Completed(_, value) => {
                    colon.uniforms.show_progress = value;
                }
            }
        }

        self.fire_due_reveals();

        if self.colon_reveal_at.is_some_and(|at| at <= self.elapsed) {
            self.colon_reveal_at = None;
            self.reveal_colons();
        }
    }

    fn queue_reveal(&mut self, command: RevealCommand) {
        // A newer reveal for the same slot supersedes the pending one
        self.reveals.retain(|pending| pending.slot != command.slot);
        self.reveals.push(command);
    }

    fn fire_due_reveals(&mut self) {
        let now = self.elapsed;
        let (mut due, waiting): (Vec<_>, Vec<_>) = self
            .reveals
            .drain(..)
            .partition(|cmd| cmd.reveal_at <= now);
        self.reveals = waiting;

        due.sort_by(|a, b| a.reveal_at.total_cmp(&b.reveal_at));
        for command in due {
            match self.show_slot(command.slot) {
                Ok(_) => self.slots[command.slot].glyph = Some(command.glyph),
                Err(err) => log::warn!("dropping reveal: {err}"),
            }
        }
    }

    fn reveal_colons(&mut self) {
        let show_duration = self.timing.show_duration;
        for colon in &mut self.colons {
            colon.revealed = true;
            colon.rendered = true;
            colon.uniforms.show_progress = 0.0;
            colon
                .show
                .start(Tween::new(0.0, 1.0, show_duration).with_ease(Ease::OutCubic));
        }
        log::debug!("colons revealed");
    }
}
