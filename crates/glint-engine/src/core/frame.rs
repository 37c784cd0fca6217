/// Frame-rate gate for the proximity classification pass.
///
/// Pointer-move sampling is keep-latest, but the host may drive `tick` faster
/// than the display refresh (high-rate mice, multiple rAF callers). The gate
/// accumulates elapsed time and opens at most once per minimum interval, so
/// classification runs once per animation frame regardless of tick rate.
pub struct FrameGate {
    /// Minimum interval between openings, in seconds.
    min_interval: f32,
    /// Accumulated time since the gate last opened.
    accumulator: f32,
}

impl FrameGate {
    pub fn new(min_interval: f32) -> Self {
        Self {
            min_interval,
            accumulator: 0.0,
        }
    }

    /// 60 Hz gate, matching the browser's nominal frame rate.
    pub fn per_frame() -> Self {
        Self::new(1.0 / 60.0)
    }

    /// Add elapsed time. Returns true if the gate opens for this tick.
    /// The residual folds back below one interval, so a long stall yields
    /// one opening, not a burst.
    pub fn ready(&mut self, dt: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.min_interval {
            self.accumulator = (self.accumulator - self.min_interval) % self.min_interval;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_on_exact_interval() {
        let mut gate = FrameGate::new(1.0 / 60.0);
        assert!(gate.ready(1.0 / 60.0));
    }

    #[test]
    fn holds_below_interval() {
        let mut gate = FrameGate::new(1.0 / 60.0);
        assert!(!gate.ready(0.008));
        assert!(gate.ready(0.010));
    }

    #[test]
    fn stall_yields_single_opening() {
        let mut gate = FrameGate::new(1.0 / 60.0);
        assert!(gate.ready(1.0)); // one second stall
        assert!(!gate.ready(0.0));
    }
}
