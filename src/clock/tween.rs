//! Animation tracks for a single animated uniform.
//!
//! A track holds at most one tween. Starting a new tween cancels the one in
//! flight and hands out a fresh [`AnimationHandle`], so a retriggered hide or
//! show always wins over the animation it replaces.

use super::easing::Ease;

/// Identifies one started animation on a track
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationHandle(pub u64);

/// Numeric animation from `from` to `to`
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Seconds, excluding `delay`
    pub duration: f32,
    /// Seconds before the value starts moving
    pub delay: f32,
    pub ease: Ease,
    elapsed: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease: Ease::Linear,
            elapsed: 0.0,
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Linear progress after the delay, 0..=1
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active < 0.0 {
            0.0
        } else if self.duration <= 0.0 {
            1.0
        } else {
            (active / self.duration).min(1.0)
        }
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.ease.apply(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration.max(0.0)
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }
}

/// Result of stepping a track by one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrackStep {
    /// No animation on the track
    Idle,
    /// Animation still running, value to write this frame
    Running(f32),
    /// Animation reached its end on this step, final value
    Completed(AnimationHandle, f32),
}

#[derive(Clone, Debug, Default)]
pub struct AnimationTrack {
    active: Option<(AnimationHandle, Tween)>,
    next_id: u64,
}

impl AnimationTrack {
    /// Cancel whatever is running and start `tween`
    pub fn start(&mut self, tween: Tween) -> AnimationHandle {
        if let Some((handle, _)) = self.cancel() {
            log::trace!("animation {:?} overwritten", handle);
        }
        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;
        self.active = Some((handle, tween));
        handle
    }

    /// Stop the running animation, returning it if there was one
    pub fn cancel(&mut self) -> Option<(AnimationHandle, Tween)> {
        self.active.take()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<AnimationHandle> {
        self.active.as_ref().map(|(handle, _)| *handle)
    }

    pub fn step(&mut self, dt: f32) -> TrackStep {
        let Some((handle, tween)) = self.active.as_mut() else {
            return TrackStep::Idle;
        };

        tween.advance(dt);
        let value = tween.value();

        if tween.is_finished() {
            let handle = *handle;
            self.active = None;
            TrackStep::Completed(handle, value)
        } else {
            TrackStep::Running(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_holds_start_value() {
        let mut track = AnimationTrack::default();
        track.start(Tween::new(0.0, 1.0, 1.0).with_delay(0.5));

        assert_eq!(track.step(0.25), TrackStep::Running(0.0));
        assert_eq!(track.step(0.25), TrackStep::Running(0.0));
        match track.step(0.5) {
            TrackStep::Running(v) => assert!((v - 0.5).abs() < 1e-5),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_completes_with_end_value() {
        let mut track = AnimationTrack::default();
        let handle = track.start(Tween::new(0.0, 1.0, 0.7).with_ease(Ease::OutCubic));

        assert!(matches!(track.step(0.5), TrackStep::Running(_)));
        assert_eq!(track.step(0.5), TrackStep::Completed(handle, 1.0));
        assert_eq!(track.step(0.5), TrackStep::Idle);
        assert!(!track.is_running());
    }

    #[test]
    fn test_restart_overwrites_in_flight() {
        let mut track = AnimationTrack::default();
        let first = track.start(Tween::new(0.0, 1.0, 1.0));
        track.step(0.9);

        let second = track.start(Tween::new(0.0, 1.0, 1.0));
        assert_ne!(first, second);
        assert_eq!(track.current(), Some(second));

        // The new tween starts from scratch
        match track.step(0.1) {
            TrackStep::Running(v) => assert!((v - 0.1).abs() < 1e-5),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut track = AnimationTrack::default();
        let handle = track.start(Tween::new(0.0, 1.0, 0.0));
        assert_eq!(track.step(0.0), TrackStep::Completed(handle, 1.0));
    }
}
