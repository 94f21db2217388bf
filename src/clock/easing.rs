// ============================================================================
// EASING FUNCTIONS for the fall-away / rise-in tracks
// ============================================================================

/// Ease-in-out cubic: slow at start and end, fast in the middle
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Ease-out cubic: fast at start, decelerates at end
/// Good for "arriving" animations
pub fn ease_out_cubic(t: f32) -> f32 {
    let x = 1.0 - t;
    1.0 - x * x * x
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
    #[default]
    Linear,
    OutCubic,
    InOutCubic,
}

impl Ease {
    /// Map linear progress (clamped to 0..=1) through the curve
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::OutCubic => ease_out_cubic(t),
            Ease::InOutCubic => ease_in_out_cubic(t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for ease in [Ease::Linear, Ease::OutCubic, Ease::InOutCubic] {
            assert!(ease.apply(0.0).abs() < 1e-6, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", ease);
        }
    }

    #[test]
    fn test_clamps_out_of_range() {
        assert_eq!(Ease::OutCubic.apply(-1.0), 0.0);
        assert_eq!(Ease::InOutCubic.apply(3.0), 1.0);
    }

    #[test]
    fn test_in_out_is_symmetric() {
        let a = Ease::InOutCubic.apply(0.25);
        let b = Ease::InOutCubic.apply(0.75);
        assert!((a + b - 1.0).abs() < 1e-5);
        assert!((Ease::InOutCubic.apply(0.5) - 0.5).abs() < 1e-6);
    }
}
