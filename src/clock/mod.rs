//! Renderer-independent clock logic: time strings, slot state, animation
//! tracks, layout and settings.

pub mod controller;
pub mod digit;
pub mod easing;
pub mod error;
pub mod layout;
pub mod settings;
pub mod slots;
pub mod style;
pub mod time_string;
pub mod tween;

pub use controller::{ClockController, PairState};
pub use digit::Digit;
pub use settings::ClockSettings;
pub use slots::SlotUniforms;
pub use style::{ClockStyle, Rgb8};
pub use time_string::{SystemClock, WallClock};
