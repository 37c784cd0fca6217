use std::collections::HashMap;

use crate::api::types::{EngineEvent, MarkerHandle};
use crate::catalog::definition::MarkerDefinition;
use crate::progress::store::{MarkFound, ProgressStore};

/// Auto-hide durations for the transient displays, in seconds.
#[derive(Debug, Clone, Copy)]
pub struct ControllerTimings {
    /// "Secret found!" acknowledgement lifetime.
    pub ack: f32,
    /// Floating hint label lifetime.
    pub hint: f32,
}

impl Default for ControllerTimings {
    fn default() -> Self {
        Self {
            ack: 1.6,
            hint: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct AckTimer {
    remaining: f32,
    duration: f32,
    bonus: bool,
}

#[derive(Debug, Clone, Copy)]
struct HintTimer {
    remaining: f32,
}

/// Converts activation events into `mark_found` commands and owns the
/// transient acknowledgement and hint timers.
///
/// Activation policy: a marker is activatable once it is mounted with a
/// painted bounding region, uniformly for every variant; the proximity tier
/// is a visibility nicety, never an access gate. The engine enforces the
/// mounted-and-painted precondition before calling in here.
#[derive(Debug, Default)]
pub struct DiscoveryController {
    timings: ControllerTimings,
    acks: HashMap<MarkerHandle, AckTimer>,
    hints: HashMap<MarkerHandle, HintTimer>,
}

impl DiscoveryController {
    pub fn new(timings: ControllerTimings) -> Self {
        Self {
            timings,
            acks: HashMap::new(),
            hints: HashMap::new(),
        }
    }

    /// Acknowledgement text for the UI toast.
    pub fn ack_text(bonus: bool) -> &'static str {
        if bonus {
            "Bonus secret found!"
        } else {
            "Secret found!"
        }
    }

    /// Handle an activation of `def` on a mounted marker. Returns true on a
    /// fresh discovery. A repeat activation is a no-op: no second
    /// acknowledgement, no events.
    pub fn handle_activation(
        &mut self,
        handle: MarkerHandle,
        def: &MarkerDefinition,
        store: &mut ProgressStore,
        total: u32,
        events: &mut Vec<EngineEvent>,
    ) -> bool {
        match store.mark_found(&def.id) {
            MarkFound::Newly { progress, .. } => {
                self.acks.insert(
                    handle,
                    AckTimer {
                        remaining: self.timings.ack,
                        duration: self.timings.ack,
                        bonus: def.is_bonus,
                    },
                );
                // A discovered marker has no hint to show.
                self.hints.remove(&handle);
                events.push(EngineEvent::Discovered {
                    handle: Some(handle),
                    id: def.id.clone(),
                    bonus: def.is_bonus,
                });
                events.push(EngineEvent::Progress {
                    found: progress,
                    total,
                });
                true
            }
            MarkFound::AlreadyFound => false,
        }
    }

    /// Show the hint for `def` if it is eligible: undiscovered and carrying
    /// hint text. Restarts the auto-hide timer on repeat hovers.
    pub fn show_hint(
        &mut self,
        handle: MarkerHandle,
        def: &MarkerDefinition,
        store: &ProgressStore,
    ) {
        if def.hint_text.is_none() || store.is_found(&def.id) {
            return;
        }
        self.hints.insert(
            handle,
            HintTimer {
                remaining: self.timings.hint,
            },
        );
    }

    /// Hide one marker's hint (mouse-leave, blur).
    pub fn hide_hint(&mut self, handle: MarkerHandle) {
        self.hints.remove(&handle);
    }

    /// Hide every hint (`Escape`).
    pub fn hide_all_hints(&mut self) {
        self.hints.clear();
    }

    /// Advance auto-hide timers.
    pub fn tick(&mut self, dt: f32) {
        self.acks.retain(|_, ack| {
            ack.remaining -= dt;
            ack.remaining > 0.0
        });
        self.hints.retain(|_, hint| {
            hint.remaining -= dt;
            hint.remaining > 0.0
        });
    }

    /// Cancel every timer owned by `handle`. Called on unmount.
    pub fn remove(&mut self, handle: MarkerHandle) {
        self.acks.remove(&handle);
        self.hints.remove(&handle);
    }

    pub fn ack_active(&self, handle: MarkerHandle) -> bool {
        self.acks.contains_key(&handle)
    }

    /// Whether the active ack is the bonus variant.
    pub fn ack_bonus(&self, handle: MarkerHandle) -> bool {
        self.acks.get(&handle).is_some_and(|a| a.bonus)
    }

    /// Remaining ack lifetime as a fraction in [0, 1]. Zero when inactive.
    pub fn ack_fraction(&self, handle: MarkerHandle) -> f32 {
        self.acks
            .get(&handle)
            .map(|a| (a.remaining / a.duration).clamp(0.0, 1.0))
            .unwrap_or(0.0)
    }

    pub fn hint_active(&self, handle: MarkerHandle) -> bool {
        self.hints.contains_key(&handle)
    }
}
