// pulse/scheduler.rs
//
// Attention-pulse timing for undiscovered markers. One timer record per
// mounted marker, all owned here so unmount has a single disposal path.

use std::collections::HashMap;

use crate::api::types::MarkerHandle;

/// Pulse durations and cadence, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct PulseTimings {
    /// One-shot pulse the first time a marker becomes visible.
    pub first_pulse: f32,
    /// Quiet gap between pulses while visible and undiscovered.
    pub interval: f32,
    /// Duration of each interval pulse.
    pub repeat_pulse: f32,
}

impl Default for PulseTimings {
    fn default() -> Self {
        Self {
            first_pulse: 2.0,
            interval: 5.0,
            repeat_pulse: 1.2,
        }
    }
}

/// Phase of a single marker's pulse state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePhase {
    /// Mounted, never seen. Waiting for first visibility.
    Dormant,
    /// Actively pulsing.
    Pulsing,
    /// Visible and undiscovered; counting down to the next pulse.
    Waiting,
}

#[derive(Debug, Clone, Copy)]
struct MarkerPulse {
    phase: PulsePhase,
    /// Seconds left in the current phase.
    remaining: f32,
    /// Duration of the pulse currently playing, for progress computation.
    duration: f32,
    /// The first-reveal pulse fired already. Survives visibility loss;
    /// re-entering visibility resumes only the interval cadence.
    has_seen: bool,
}

impl MarkerPulse {
    fn new() -> Self {
        Self {
            phase: PulsePhase::Dormant,
            remaining: 0.0,
            duration: 0.0,
            has_seen: false,
        }
    }
}

/// Owns every mounted marker's pulse timer.
///
/// `tick_marker` advances one marker by `dt` and returns the current pulse
/// progress in [0, 1] (zero when not pulsing). While the marker is not
/// visible the timer is paused, not reset. `remove` is the only disposal
/// path and must be called on unmount and on discovery.
#[derive(Debug, Default)]
pub struct PulseScheduler {
    timings: PulseTimings,
    markers: HashMap<MarkerHandle, MarkerPulse>,
}

impl PulseScheduler {
    pub fn new(timings: PulseTimings) -> Self {
        Self {
            timings,
            markers: HashMap::new(),
        }
    }

    /// Register a marker. Starts dormant.
    pub fn add(&mut self, handle: MarkerHandle) {
        self.markers.insert(handle, MarkerPulse::new());
    }

    /// Drop a marker's timer. Returns false if it was not registered.
    pub fn remove(&mut self, handle: MarkerHandle) -> bool {
        self.markers.remove(&handle).is_some()
    }

    /// Advance one marker. `visible` is "tier is not hidden, and undiscovered".
    pub fn tick_marker(&mut self, handle: MarkerHandle, dt: f32, visible: bool) -> f32 {
        let Some(pulse) = self.markers.get_mut(&handle) else {
            return 0.0;
        };

        if !visible {
            // Paused: no phase advances, no progress output.
            return 0.0;
        }

        match pulse.phase {
            PulsePhase::Dormant => {
                if pulse.has_seen {
                    pulse.phase = PulsePhase::Waiting;
                    pulse.remaining = self.timings.interval;
                } else {
                    pulse.has_seen = true;
                    pulse.phase = PulsePhase::Pulsing;
                    pulse.remaining = self.timings.first_pulse;
                    pulse.duration = self.timings.first_pulse;
                }
            }
            PulsePhase::Pulsing => {
                pulse.remaining -= dt;
                if pulse.remaining <= 0.0 {
                    pulse.phase = PulsePhase::Waiting;
                    pulse.remaining = self.timings.interval;
                }
            }
            PulsePhase::Waiting => {
                pulse.remaining -= dt;
                if pulse.remaining <= 0.0 {
                    pulse.phase = PulsePhase::Pulsing;
                    pulse.remaining = self.timings.repeat_pulse;
                    pulse.duration = self.timings.repeat_pulse;
                }
            }
        }

        match pulse.phase {
            PulsePhase::Pulsing if pulse.duration > 0.0 => {
                (1.0 - pulse.remaining / pulse.duration).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn phase(&self, handle: MarkerHandle) -> Option<PulsePhase> {
        self.markers.get(&handle).map(|p| p.phase)
    }

    pub fn is_pulsing(&self, handle: MarkerHandle) -> bool {
        self.phase(handle) == Some(PulsePhase::Pulsing)
    }

    /// Number of registered marker timers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
