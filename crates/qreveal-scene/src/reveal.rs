//! Per-dot reveal curve.
//!
//! Every dot settles inside its own window of the global reveal progress.
//! The window is placed by the dot's surround count: sparse dots (edges,
//! isolated modules) move early, dots buried in dense clusters move last.

/// Surround count that maps to the end of the density curve.
pub const DENSITY_SPAN: f32 = 30.0;
/// Extra surround count between the two edges of a dot's window.
pub const SETTLE_SPREAD: f32 = 5.0;
/// Vertical travel, in modules, of a fully progressed dot.
pub const DEFAULT_OFFSET_SCALE: f32 = 12.5;

/// Cubic Hermite step between `e0` and `e1`. Either edge order is accepted;
/// equal edges degrade to a hard step at `e0`.
#[inline]
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    if e0 == e1 {
        return if x < e0 { 0.0 } else { 1.0 };
    }
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// The `(start, end)` edges of a dot's window, measured from the end of the
/// timeline: `start = 1 - smoothstep(0, 30, n)`, `end = 1 - smoothstep(0, 30, n + 5)`.
pub fn settle_window(surround_count: u8) -> (f32, f32) {
    let n = f32::from(surround_count);
    let start = 1.0 - smoothstep(0.0, DENSITY_SPAN, n);
    let end = 1.0 - smoothstep(0.0, DENSITY_SPAN, n + SETTLE_SPREAD);
    (start, end)
}

/// Progress of one dot for the global `reveal_progress` in `[0, 1]`.
///
/// 0 at the start of the timeline, exactly 1 at its end, non-decreasing in
/// between, and never behind a denser dot.
pub fn dot_progress(surround_count: u8, reveal_progress: f32) -> f32 {
    let (start, end) = settle_window(surround_count);
    // Edges are measured from the end, so the curve reads the remaining time.
    let remaining = 1.0 - reveal_progress.clamp(0.0, 1.0);
    smoothstep(start, end, remaining)
}

/// Presentation of one dot at a given progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotPose {
    /// Downward displacement in modules.
    pub offset_y: f32,
    pub opacity: f32,
}

impl DotPose {
    pub const REST: Self = Self {
        offset_y: 0.0,
        opacity: 1.0,
    };
}

/// Tunables of the reveal curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealParams {
    pub offset_scale: f32,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            offset_scale: DEFAULT_OFFSET_SCALE,
        }
    }
}

impl RevealParams {
    pub fn pose(&self, surround_count: u8, reveal_progress: f32) -> DotPose {
        let p = dot_progress(surround_count, reveal_progress);
        DotPose {
            offset_y: p * p * self.offset_scale,
            opacity: 1.0 - p,
        }
    }
}
