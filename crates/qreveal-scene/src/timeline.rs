//! Time-driven source of the global reveal progress.
//!
//! ```
//! use std::time::Duration;
//! use qreveal_scene::timeline::{RevealMode, RevealTimeline};
//!
//! let timeline = RevealTimeline::new(Duration::from_secs(2)).with_mode(RevealMode::PingPong);
//! assert_eq!(timeline.progress_at(Duration::from_secs(1)), 0.5);
//! assert_eq!(timeline.progress_at(Duration::from_secs(3)), 0.5);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::reveal::smoothstep;

/// How the timeline continues after one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealMode {
    /// Sweep once and hold the end value.
    Once,
    /// Jump back to the start after every sweep.
    Loop,
    /// Sweep forward, then backward, forever.
    #[default]
    PingPong,
}

/// Timing curve applied to each sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealEasing {
    #[default]
    Linear,
    /// Cubic ease-in-out.
    Smooth,
}

impl RevealEasing {
    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smooth => smoothstep(0.0, 1.0, t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTimeline {
    duration: Duration,
    mode: RevealMode,
    easing: RevealEasing,
    reverse: bool,
}

impl RevealTimeline {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            mode: RevealMode::default(),
            easing: RevealEasing::default(),
            reverse: false,
        }
    }

    pub fn with_mode(mut self, mode: RevealMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_easing(mut self, easing: RevealEasing) -> Self {
        self.easing = easing;
        self
    }

    /// Sweep from 1 down to 0 instead.
    pub fn reversed(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    /// Progress `elapsed` after the timeline started.
    pub fn progress_at(&self, elapsed: Duration) -> f32 {
        let linear = if self.duration.is_zero() {
            1.0
        } else {
            let sweeps = elapsed.as_secs_f64() / self.duration.as_secs_f64();
            match self.mode {
                RevealMode::Once => sweeps.min(1.0),
                RevealMode::Loop => sweeps.fract(),
                RevealMode::PingPong => {
                    let phase = sweeps % 2.0;
                    if phase <= 1.0 { phase } else { 2.0 - phase }
                }
            }
        };
        let eased = self.easing.evaluate(linear as f32);
        if self.reverse { 1.0 - eased } else { eased }
    }

    /// Whether the timeline has stopped changing.
    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.mode == RevealMode::Once && elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test_case(RevealMode::Once, 0, 0.0)]
    #[test_case(RevealMode::Once, 250, 0.25)]
    #[test_case(RevealMode::Once, 1000, 1.0)]
    #[test_case(RevealMode::Once, 4000, 1.0)]
    #[test_case(RevealMode::Loop, 1250, 0.25)]
    #[test_case(RevealMode::Loop, 2000, 0.0)]
    #[test_case(RevealMode::PingPong, 500, 0.5)]
    #[test_case(RevealMode::PingPong, 1000, 1.0)]
    #[test_case(RevealMode::PingPong, 1750, 0.25)]
    #[test_case(RevealMode::PingPong, 2000, 0.0)]
    fn linear_modes(mode: RevealMode, elapsed_ms: u64, expected: f32) {
        let t = RevealTimeline::new(ms(1000)).with_mode(mode);
        assert!((t.progress_at(ms(elapsed_ms)) - expected).abs() < 1e-6);
    }

    #[test]
    fn smooth_easing_keeps_endpoints() {
        let t = RevealTimeline::new(ms(1000))
            .with_mode(RevealMode::Once)
            .with_easing(RevealEasing::Smooth);
        assert_eq!(t.progress_at(ms(0)), 0.0);
        assert_eq!(t.progress_at(ms(500)), 0.5);
        assert_eq!(t.progress_at(ms(1000)), 1.0);
        assert!(t.progress_at(ms(100)) < 0.1);
    }

    #[test]
    fn reversed_runs_down() {
        let t = RevealTimeline::new(ms(1000)).with_mode(RevealMode::Once).reversed(true);
        assert_eq!(t.progress_at(ms(0)), 1.0);
        assert_eq!(t.progress_at(ms(1000)), 0.0);
    }

    #[test]
    fn zero_duration_jumps_to_the_end() {
        let t = RevealTimeline::new(Duration::ZERO);
        assert_eq!(t.progress_at(ms(0)), 1.0);
    }

    #[test]
    fn only_once_finishes() {
        let once = RevealTimeline::new(ms(100)).with_mode(RevealMode::Once);
        assert!(!once.is_finished(ms(99)));
        assert!(once.is_finished(ms(100)));
        let looping = RevealTimeline::new(ms(100)).with_mode(RevealMode::Loop);
        assert!(!looping.is_finished(ms(10_000)));
    }
}
