//! Digit and colon particle objects as the controller sees them.

use super::digit::Digit;
use super::tween::AnimationTrack;

/// Twelve digit slots: two per digit position
pub const SLOT_COUNT: usize = 12;

/// Two colon separators (HH:MM:SS)
pub const COLON_COUNT: usize = 2;

/// Per-object shader parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlotUniforms {
    /// Seconds since the clock started
    pub time: f32,
    /// Root scale, so particle sizes follow the screen-space transform
    pub scale: f32,
    /// 0 = settled, 1 = fully fallen away
    pub fall_progress: f32,
    /// 0 = hidden, 1 = fully risen in
    pub show_progress: f32,
    pub particle_size: f32,
    pub fall_distance: f32,
    pub primary_color: [f32; 4],
    pub secondary_color: [f32; 4],
}

impl Default for SlotUniforms {
    fn default() -> Self {
        Self {
            time: 0.0,
            scale: 1.0,
            fall_progress: 0.0,
            show_progress: 0.0,
            particle_size: 0.02,
            fall_distance: 1.5,
            primary_color: [1.0; 4],
            secondary_color: [1.0; 4],
        }
    }
}

/// One of the twelve digit objects
#[derive(Clone, Debug)]
pub struct DigitSlot {
    pub index: usize,
    /// Glyph currently bound to the object's texture
    pub glyph: Option<Digit>,
    /// Logical visibility; flips as soon as a hide/show starts
    pub is_visible: bool,
    /// Whether the render object is drawn at all
    pub rendered: bool,
    /// Stagger derived from draw order, in seconds
    pub reveal_delay: f32,
    pub uniforms: SlotUniforms,
    pub(crate) fall: AnimationTrack,
    pub(crate) show: AnimationTrack,
}

impl DigitSlot {
    pub fn new(index: usize, reveal_delay: f32) -> Self {
        Self {
            index,
            glyph: None,
            is_visible: false,
            rendered: false,
            reveal_delay,
            uniforms: SlotUniforms::default(),
            fall: AnimationTrack::default(),
            show: AnimationTrack::default(),
        }
    }

    /// Digit position (0..6) this slot belongs to
    pub fn position(&self) -> usize {
        self.index / 2
    }

    /// The other slot of the pair
    pub fn partner_index(&self) -> usize {
        self.index ^ 1
    }

    pub fn is_animating(&self) -> bool {
        self.fall.is_running() || self.show.is_running()
    }
}

/// One of the two colon separators
#[derive(Clone, Debug, Default)]
pub struct ColonSlot {
    pub revealed: bool,
    pub rendered: bool,
    pub uniforms: SlotUniforms,
    pub(crate) show: AnimationTrack,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing() {
        let even = DigitSlot::new(4, 0.0);
        let odd = DigitSlot::new(5, 0.0);
        assert_eq!(even.position(), 2);
        assert_eq!(odd.position(), 2);
        assert_eq!(even.partner_index(), 5);
        assert_eq!(odd.partner_index(), 4);
    }

    #[test]
    fn test_new_slot_is_hidden() {
        let slot = DigitSlot::new(0, 0.1);
        assert!(!slot.is_visible);
        assert!(!slot.rendered);
        assert!(!slot.is_animating());
        assert_eq!(slot.glyph, None);
    }
}
