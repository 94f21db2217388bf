pub mod clock;

pub use clock::{
    ClockLayout, ClockObject, ClockRoot, ClockSource, ClockTicker, spawn_clock, teardown_clock,
};
