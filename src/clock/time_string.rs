//! Wall-clock reading and the six-character `HHMMSS` display string.

use chrono::{Local, Timelike};

/// Number of digit positions shown by the clock (HH MM SS)
pub const DIGIT_POSITIONS: usize = 6;

/// Reported as the displayed string before the first tick
pub const SENTINEL: &str = "999999";

/// Hours, minutes and seconds of a local wall-clock reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl ClockTime {
    pub const fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Zero-padded `HHMMSS`, e.g. 03:07:09 -> `"030709"`
    pub fn display_string(&self) -> String {
        format!("{:02}{:02}{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Source of the current local time
pub trait WallClock: Send + Sync + 'static {
    fn now(&self) -> ClockTime;
}

/// Reads the host's local time zone through chrono
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> ClockTime {
        let now = Local::now();
        ClockTime::new(now.hour(), now.minute(), now.second())
    }
}

/// Always reports the same time
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub ClockTime);

#[cfg(test)]
impl WallClock for FixedClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}

/// Positions (0..6) whose character differs between `previous` and `current`.
///
/// With no previous string every position counts as changed, as do positions
/// missing from either string.
pub fn changed_positions(previous: Option<&str>, current: &str) -> Vec<usize> {
    let Some(previous) = previous else {
        return (0..DIGIT_POSITIONS).collect();
    };
    let prev: Vec<char> = previous.chars().collect();
    let curr: Vec<char> = current.chars().collect();

    (0..DIGIT_POSITIONS)
        .filter(|&i| prev.get(i) != curr.get(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_zero_pads() {
        assert_eq!(ClockTime::new(3, 7, 9).display_string(), "030709");
        assert_eq!(ClockTime::new(0, 0, 0).display_string(), "000000");
        assert_eq!(ClockTime::new(23, 59, 59).display_string(), "235959");
    }

    #[test]
    fn test_display_string_parses_back() {
        for (h, m, s) in [(0, 0, 0), (3, 7, 9), (12, 34, 56), (23, 59, 59)] {
            let text = ClockTime::new(h, m, s).display_string();
            assert_eq!(text.len(), 6);
            assert_eq!(text[0..2].parse::<u32>().unwrap(), h);
            assert_eq!(text[2..4].parse::<u32>().unwrap(), m);
            assert_eq!(text[4..6].parse::<u32>().unwrap(), s);
        }
    }

    #[test]
    fn test_midnight_rollover_changes_everything() {
        assert_eq!(
            changed_positions(Some("235959"), "000000"),
            vec![0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_first_tick_changes_everything() {
        // Nines must not match the "999999" placeholder
        for time in [
            ClockTime::new(0, 0, 0),
            ClockTime::new(19, 9, 59),
            ClockTime::new(9, 59, 59),
        ] {
            assert_eq!(
                changed_positions(None, &time.display_string()),
                vec![0, 1, 2, 3, 4, 5]
            );
        }
    }

    #[test]
    fn test_single_position_change() {
        assert_eq!(changed_positions(Some("123456"), "123457"), vec![5]);
        assert_eq!(changed_positions(Some("123459"), "123500"), vec![3, 4, 5]);
        assert!(changed_positions(Some("123456"), "123456").is_empty());
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(ClockTime::new(12, 34, 56));
        assert_eq!(clock.now().display_string(), "123456");
    }
}
