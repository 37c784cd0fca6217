use std::collections::HashMap;

use glam::Vec2;

use crate::api::types::{EngineEvent, MarkerHandle};
use crate::bridge::protocol::{tier_code, MarkerSnapshot, SnapshotBuffer};
use crate::catalog::registry::MarkerCatalog;
use crate::core::clock::Clock;
use crate::core::frame::FrameGate;
use crate::input::queue::{InputEvent, InputQueue};
use crate::interact::controller::{ControllerTimings, DiscoveryController};
use crate::progress::backend::ProgressBackend;
use crate::progress::store::{MarkFound, ProgressStore};
use crate::proximity::detector::{PolicyContext, ProximityDetector, Tier};
use crate::pulse::scheduler::{PulseScheduler, PulseTimings};
use crate::reward::manager::{RewardManager, RewardPhase};

/// Render opacity per tier. The touch fallback sits markers at a constant
/// low opacity because hover reveal is unavailable.
const NEAR_OPACITY: f32 = 1.0;
const TOUCH_NEAR_OPACITY: f32 = 0.3;
const FOUND_OPACITY: f32 = 0.55;

/// Whether signed-out visitors may discover markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInPolicy {
    /// Discovery is open to everyone.
    #[default]
    Open,
    /// Activation while signed out emits a `SignInPrompt` event instead of
    /// recording the discovery.
    RequireSignIn,
}

/// Configuration for the engine, provided by the embedding page.
/// All environment flags are threaded in here explicitly; the engine reads
/// no ambient global state.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Proximity radius in CSS pixels (default: 110).
    pub proximity_radius: f32,
    /// Hover is unavailable; use the constant-visibility fallback.
    pub touch_device: bool,
    /// Accessibility preference: suppress animated transitions.
    pub reduced_motion: bool,
    /// Developer/admin override: force every marker visible.
    pub debug_reveal: bool,
    /// Gates `reset`. Never set in production.
    pub debug_tools: bool,
    /// Discovery gating for signed-out visitors.
    pub sign_in_policy: SignInPolicy,
    /// Pulse durations and cadence.
    pub pulse: PulseTimings,
    /// Acknowledgement/hint auto-hide durations.
    pub timings: ControllerTimings,
    /// Seed for reward-message selection. Inject a fixed seed in tests.
    pub reward_seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            proximity_radius: 110.0,
            touch_device: false,
            reduced_motion: false,
            debug_reveal: false,
            debug_tools: false,
            sign_in_policy: SignInPolicy::Open,
            pulse: PulseTimings::default(),
            timings: ControllerTimings::default(),
            reward_seed: 42,
        }
    }
}

/// A marker currently present on the page.
struct MountedMarker {
    /// Catalog id backing this mount.
    id: String,
    detector: ProximityDetector,
}

/// The engine facade. Owns every component; the embedding UI talks only to
/// this type (and the input queue it exposes).
///
/// Per frame: push input events, call `tick(dt)`, read the snapshot buffer,
/// drain engine events.
pub struct DiscoveryEngine {
    config: EngineConfig,
    catalog: MarkerCatalog,
    store: ProgressStore,
    scheduler: PulseScheduler,
    controller: DiscoveryController,
    reward: RewardManager,
    input: InputQueue,
    markers: HashMap<MarkerHandle, MountedMarker>,
    /// Mount order; fixes snapshot ordering.
    order: Vec<MarkerHandle>,
    next_handle: u32,
    gate: FrameGate,
    /// Signed-in state, updatable mid-session.
    signed_in: bool,
    events: Vec<EngineEvent>,
    snapshot: SnapshotBuffer,
}

impl DiscoveryEngine {
    pub fn new(
        catalog: MarkerCatalog,
        backend: Box<dyn ProgressBackend>,
        clock: Box<dyn Clock>,
        config: EngineConfig,
    ) -> Self {
        let store = ProgressStore::new(catalog.all_ids().map(str::to_owned), backend, clock);
        let mut reward = RewardManager::new(config.reward_seed);
        // A reload after completion re-arms the notice: session flags are
        // in-memory, the persisted completion flag is not.
        reward.observe_completion(store.completed());
        Self {
            scheduler: PulseScheduler::new(config.pulse),
            controller: DiscoveryController::new(config.timings),
            reward,
            input: InputQueue::new(),
            markers: HashMap::new(),
            order: Vec::new(),
            next_handle: 1,
            gate: FrameGate::per_frame(),
            signed_in: false,
            events: Vec::new(),
            snapshot: SnapshotBuffer::with_capacity(catalog.total() as usize),
            config,
            catalog,
            store,
        }
    }

    // -- Mount lifecycle --

    /// Register a marker appearing on the page. Returns None (and logs) if
    /// the id is not in the catalog.
    pub fn mount(&mut self, id: &str) -> Option<MarkerHandle> {
        let Some(def) = self.catalog.lookup(id) else {
            log::warn!("mount refused: unknown marker id {id:?}");
            return None;
        };
        let radius = def.radius.unwrap_or(self.config.proximity_radius);
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(
            handle,
            MountedMarker {
                id: id.to_owned(),
                detector: ProximityDetector::new(radius),
            },
        );
        self.order.push(handle);
        self.scheduler.add(handle);
        Some(handle)
    }

    /// Remove a marker from the page, cancelling every timer it owns.
    pub fn unmount(&mut self, handle: MarkerHandle) {
        if self.markers.remove(&handle).is_none() {
            return;
        }
        self.order.retain(|h| *h != handle);
        self.scheduler.remove(handle);
        self.controller.remove(handle);
    }

    /// Number of mounted markers.
    pub fn mounted(&self) -> usize {
        self.markers.len()
    }

    // -- Input --

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    // -- Frame tick --

    /// Advance the engine by `dt` seconds: drain input, classify proximity
    /// (at most once per frame), advance pulse and auto-hide timers, watch
    /// for completion, and rebuild the snapshot buffer.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerMove { x, y } => {
                    let pointer = Vec2::new(x, y);
                    for marker in self.markers.values_mut() {
                        marker.detector.sample(pointer);
                    }
                }
                InputEvent::LayoutChange { marker, rect } => {
                    if let Some(m) = self.markers.get_mut(&marker) {
                        m.detector.set_rect(rect);
                    }
                }
                InputEvent::Activate { marker, .. } => self.apply_activation(marker),
                InputEvent::HoverEnter { marker }
                | InputEvent::FocusGained { marker }
                | InputEvent::LongPress { marker } => {
                    if let Some(m) = self.markers.get(&marker) {
                        if let Some(def) = self.catalog.lookup(&m.id) {
                            self.controller.show_hint(marker, def, &self.store);
                        }
                    }
                }
                InputEvent::HoverLeave { marker } | InputEvent::FocusLost { marker } => {
                    self.controller.hide_hint(marker);
                }
                InputEvent::Escape => self.controller.hide_all_hints(),
            }
        }

        let policy = self.policy();
        if self.gate.ready(dt) {
            for marker in self.markers.values_mut() {
                let found = self.store.is_found(&marker.id);
                marker.detector.classify(found, &policy);
            }
        }

        self.controller.tick(dt);

        // Completion notice: Pending -> Shown on the first frame after the
        // final discovery (or after a reload with completion persisted).
        if self.reward.phase() == RewardPhase::Pending && self.reward.mark_shown() {
            self.events.push(EngineEvent::CompletionReady);
        }

        self.build_snapshot(dt);
    }

    fn policy(&self) -> PolicyContext {
        PolicyContext {
            debug_reveal: self.config.debug_reveal,
            touch_device: self.config.touch_device,
            reduced_motion: self.config.reduced_motion,
        }
    }

    fn apply_activation(&mut self, handle: MarkerHandle) {
        let Some(marker) = self.markers.get(&handle) else {
            log::warn!("activation for unmounted marker {handle:?}");
            return;
        };
        // Activatable once the bounding region is actually painted.
        if marker.detector.rect().is_none() {
            return;
        }
        let Some(def) = self.catalog.lookup(&marker.id) else {
            log::warn!("activation references id absent from catalog: {:?}", marker.id);
            return;
        };
        if self.config.sign_in_policy == SignInPolicy::RequireSignIn && !self.signed_in {
            self.events.push(EngineEvent::SignInPrompt { handle });
            return;
        }
        let newly = self.controller.handle_activation(
            handle,
            def,
            &mut self.store,
            self.catalog.total(),
            &mut self.events,
        );
        if newly {
            // Found is terminal: stop pulsing for good.
            self.scheduler.remove(handle);
            self.reward.observe_completion(self.store.completed());
        }
    }

    fn build_snapshot(&mut self, dt: f32) {
        self.snapshot.clear();
        for &handle in &self.order {
            let Some(marker) = self.markers.get(&handle) else {
                continue;
            };
            let found = self.store.is_found(&marker.id);
            let tier = marker.detector.tier();
            let visible = tier != Tier::Hidden && !found;
            let intensity = self
                .catalog
                .lookup(&marker.id)
                .map(|def| def.style.pulse_intensity)
                .unwrap_or(1.0);
            let pulse = self.scheduler.tick_marker(handle, dt, visible) * intensity;
            let opacity = match tier {
                Tier::Hidden => 0.0,
                Tier::Near if self.config.touch_device => TOUCH_NEAR_OPACITY,
                Tier::Near => NEAR_OPACITY,
                Tier::Found if found => FOUND_OPACITY,
                // Debug reveal on an undiscovered marker.
                Tier::Found => NEAR_OPACITY,
            };
            self.snapshot.push(MarkerSnapshot {
                handle: handle.0 as f32,
                tier: tier_code(tier),
                opacity,
                pulse,
                animate: if marker.detector.animate() { 1.0 } else { 0.0 },
                ack: self.controller.ack_fraction(handle),
                hint: if self.controller.hint_active(handle) { 1.0 } else { 0.0 },
                _pad: 0.0,
            });
        }
    }

    // -- Progress queries and commands --

    pub fn is_found(&self, id: &str) -> bool {
        self.store.is_found(id)
    }

    /// Programmatic discovery, for collaborators that bypass the pointer
    /// path. Unknown ids are a logged no-op.
    pub fn mark_found(&mut self, id: &str) {
        let Some(def) = self.catalog.lookup(id) else {
            log::warn!("mark_found ignored: unknown marker id {id:?}");
            return;
        };
        let bonus = def.is_bonus;
        match self.store.mark_found(id) {
            MarkFound::Newly { progress, .. } => {
                let handle = self
                    .markers
                    .iter()
                    .find(|(_, m)| m.id == id)
                    .map(|(h, _)| *h);
                if let Some(handle) = handle {
                    self.scheduler.remove(handle);
                    self.controller.hide_hint(handle);
                }
                self.events.push(EngineEvent::Discovered {
                    handle,
                    id: id.to_owned(),
                    bonus,
                });
                self.events.push(EngineEvent::Progress {
                    found: progress,
                    total: self.catalog.total(),
                });
                self.reward.observe_completion(self.store.completed());
            }
            MarkFound::AlreadyFound => {}
        }
    }

    pub fn progress(&self) -> u32 {
        self.store.progress()
    }

    pub fn total(&self) -> u32 {
        self.catalog.total()
    }

    pub fn completed(&self) -> bool {
        self.store.completed()
    }

    /// Clear all progress. Only honored with `debug_tools` set; otherwise a
    /// logged no-op, so the command is never reachable in production.
    pub fn reset(&mut self) {
        if !self.config.debug_tools {
            log::warn!("reset ignored: debug tools disabled");
            return;
        }
        self.store.reset();
        self.reward = RewardManager::new(self.config.reward_seed);
    }

    // -- Reward / notices --

    pub fn reward_phase(&self) -> RewardPhase {
        self.reward.phase()
    }

    pub fn reward_message(&self) -> Option<&'static str> {
        self.reward.message()
    }

    pub fn dismiss_reward(&mut self) {
        self.reward.dismiss();
    }

    pub fn indicator_visible(&self) -> bool {
        self.reward.indicator_visible(self.store.progress())
    }

    pub fn dismiss_indicator(&mut self) {
        self.reward.dismiss_indicator();
    }

    // -- Rendering reads --

    pub fn tier(&self, handle: MarkerHandle) -> Option<Tier> {
        self.markers.get(&handle).map(|m| m.detector.tier())
    }

    pub fn snapshot_floats(&self) -> &[f32] {
        self.snapshot.as_floats()
    }

    pub fn snapshots(&self) -> &[MarkerSnapshot] {
        self.snapshot.snapshots()
    }

    /// Drain pending engine events for the UI layer.
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // -- Live environment updates --

    pub fn set_signed_in(&mut self, signed_in: bool) {
        self.signed_in = signed_in;
    }

    pub fn set_reduced_motion(&mut self, reduced_motion: bool) {
        self.config.reduced_motion = reduced_motion;
    }

    pub fn set_touch_device(&mut self, touch_device: bool) {
        self.config.touch_device = touch_device;
    }

    pub fn set_debug_reveal(&mut self, debug_reveal: bool) {
        self.config.debug_reveal = debug_reveal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ActivationSource;
    use crate::catalog::definition::MarkerDefinition;
    use crate::core::clock::FixedClock;
    use crate::progress::backend::MemoryBackend;
    use crate::proximity::rect::Rect;

    const FRAME: f32 = 1.0 / 60.0;

    fn def(id: &str) -> MarkerDefinition {
        MarkerDefinition {
            id: id.into(),
            display_name: id.into(),
            hint_text: Some(format!("hint for {id}")),
            is_bonus: false,
            style: Default::default(),
            radius: None,
            asset_ref: String::new(),
        }
    }

    fn catalog(ids: &[&str]) -> MarkerCatalog {
        MarkerCatalog::from_definitions(ids.iter().map(|id| def(id)).collect()).unwrap()
    }

    fn engine_with(ids: &[&str], backend: MemoryBackend, config: EngineConfig) -> DiscoveryEngine {
        DiscoveryEngine::new(
            catalog(ids),
            Box::new(backend),
            Box::new(FixedClock("2026-03-01T12:00:00.000Z".into())),
            config,
        )
    }

    fn engine(ids: &[&str]) -> DiscoveryEngine {
        engine_with(ids, MemoryBackend::new(), EngineConfig::default())
    }

    /// Mount a marker, paint it, and flush one frame.
    fn mount_painted(engine: &mut DiscoveryEngine, id: &str, x: f32, y: f32) -> MarkerHandle {
        let handle = engine.mount(id).unwrap();
        engine.push_input(InputEvent::LayoutChange {
            marker: handle,
            rect: Rect::from_xywh(x, y, 24.0, 24.0),
        });
        engine.tick(FRAME);
        handle
    }

    fn activate(engine: &mut DiscoveryEngine, handle: MarkerHandle) {
        engine.push_input(InputEvent::Activate {
            marker: handle,
            source: ActivationSource::Pointer,
        });
        engine.tick(FRAME);
    }

    #[test]
    fn fresh_session_scenario() {
        let mut engine = engine(&["a", "b", "c"]);
        let ha = mount_painted(&mut engine, "a", 0.0, 0.0);
        let hb = mount_painted(&mut engine, "b", 300.0, 0.0);
        let hc = mount_painted(&mut engine, "c", 600.0, 0.0);

        activate(&mut engine, ha);
        assert_eq!(engine.progress(), 1);
        assert!(!engine.completed());

        activate(&mut engine, hb);
        assert_eq!(engine.progress(), 2);

        activate(&mut engine, hc);
        assert_eq!(engine.progress(), 3);
        assert!(engine.completed());
        let message = engine.reward_message().unwrap();
        assert!(crate::reward::REWARD_MESSAGES.contains(&message));
    }

    #[test]
    fn reload_mid_progress_scenario() {
        let backend = MemoryBackend::new();
        {
            let mut engine =
                engine_with(&["a", "b", "c"], backend.clone(), EngineConfig::default());
            let ha = mount_painted(&mut engine, "a", 0.0, 0.0);
            activate(&mut engine, ha);
        }
        let engine = engine_with(&["a", "b", "c"], backend, EngineConfig::default());
        assert!(engine.is_found("a"));
        assert!(!engine.is_found("b"));
        assert_eq!(engine.progress(), 1);
    }

    #[test]
    fn duplicate_activation_scenario() {
        let mut engine = engine(&["a", "b"]);
        let ha = mount_painted(&mut engine, "a", 0.0, 0.0);

        activate(&mut engine, ha);
        let events = engine.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, EngineEvent::Discovered { .. })));

        activate(&mut engine, ha);
        let events = engine.drain_events();
        assert!(events.is_empty());
        assert_eq!(engine.progress(), 1);
        assert_eq!(engine.reward_phase(), RewardPhase::Incomplete);
    }

    #[test]
    fn completion_event_fires_once() {
        let mut engine = engine(&["a"]);
        let ha = mount_painted(&mut engine, "a", 0.0, 0.0);
        activate(&mut engine, ha);

        let events = engine.drain_events();
        assert!(events.contains(&EngineEvent::CompletionReady));
        assert_eq!(engine.reward_phase(), RewardPhase::Shown);

        engine.tick(FRAME);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn reload_after_completion_re_arms_the_notice() {
        let backend = MemoryBackend::new();
        {
            let mut engine = engine_with(&["a"], backend.clone(), EngineConfig::default());
            let ha = mount_painted(&mut engine, "a", 0.0, 0.0);
            activate(&mut engine, ha);
            engine.dismiss_reward();
            assert_eq!(engine.reward_phase(), RewardPhase::Dismissed);
        }
        // Fresh session, persisted completion: notice shows again.
        let mut engine = engine_with(&["a"], backend, EngineConfig::default());
        assert_eq!(engine.reward_phase(), RewardPhase::Pending);
        engine.tick(FRAME);
        assert!(engine.drain_events().contains(&EngineEvent::CompletionReady));
    }

    #[test]
    fn pointer_proximity_reveals_marker() {
        let mut engine = engine(&["a"]);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);

        engine.push_input(InputEvent::PointerMove { x: 2000.0, y: 2000.0 });
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Hidden));

        engine.push_input(InputEvent::PointerMove { x: 130.0, y: 90.0 });
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Near));

        let snapshot = engine.snapshots()[0];
        assert_eq!(snapshot.opacity, 1.0);
        assert_eq!(snapshot.handle, handle.0 as f32);
    }

    #[test]
    fn touch_device_markers_always_faintly_visible() {
        let config = EngineConfig {
            touch_device: true,
            ..Default::default()
        };
        let mut engine = engine_with(&["a"], MemoryBackend::new(), config);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Near));
        assert_eq!(engine.snapshots()[0].opacity, TOUCH_NEAR_OPACITY);
    }

    #[test]
    fn debug_reveal_forces_visibility() {
        let config = EngineConfig {
            debug_reveal: true,
            ..Default::default()
        };
        let mut engine = engine_with(&["a"], MemoryBackend::new(), config);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Found));
        assert!(!engine.is_found("a"));
    }

    #[test]
    fn reduced_motion_clears_animate_flag() {
        let config = EngineConfig {
            reduced_motion: true,
            ..Default::default()
        };
        let mut engine = engine_with(&["a"], MemoryBackend::new(), config);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);
        engine.push_input(InputEvent::PointerMove { x: 110.0, y: 110.0 });
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Near));
        assert_eq!(engine.snapshots()[0].animate, 0.0);
    }

    #[test]
    fn unpainted_marker_is_not_activatable() {
        let mut engine = engine(&["a"]);
        let handle = engine.mount("a").unwrap();
        // No LayoutChange yet.
        activate(&mut engine, handle);
        assert_eq!(engine.progress(), 0);
    }

    #[test]
    fn unknown_id_mount_and_mark_found_are_no_ops() {
        let mut engine = engine(&["a"]);
        assert!(engine.mount("zzz").is_none());
        engine.mark_found("zzz");
        assert_eq!(engine.progress(), 0);
    }

    #[test]
    fn sign_in_policy_prompts_instead_of_recording() {
        let config = EngineConfig {
            sign_in_policy: SignInPolicy::RequireSignIn,
            ..Default::default()
        };
        let mut engine = engine_with(&["a"], MemoryBackend::new(), config);
        let handle = mount_painted(&mut engine, "a", 0.0, 0.0);

        activate(&mut engine, handle);
        assert_eq!(engine.progress(), 0);
        assert!(engine
            .drain_events()
            .contains(&EngineEvent::SignInPrompt { handle }));

        engine.set_signed_in(true);
        activate(&mut engine, handle);
        assert_eq!(engine.progress(), 1);
    }

    #[test]
    fn reset_requires_debug_tools() {
        let mut engine = engine(&["a"]);
        let handle = mount_painted(&mut engine, "a", 0.0, 0.0);
        activate(&mut engine, handle);
        engine.reset();
        assert_eq!(engine.progress(), 1, "reset must be ignored in production");

        let config = EngineConfig {
            debug_tools: true,
            ..Default::default()
        };
        let mut engine = engine_with(&["a"], MemoryBackend::new(), config);
        let handle = mount_painted(&mut engine, "a", 0.0, 0.0);
        activate(&mut engine, handle);
        engine.reset();
        assert_eq!(engine.progress(), 0);
        assert!(!engine.completed());
    }

    #[test]
    fn environment_toggles_apply_on_the_next_frame() {
        let mut engine = engine(&["a"]);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);
        assert_eq!(engine.tier(handle), Some(Tier::Hidden));

        engine.set_touch_device(true);
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Near));

        engine.set_touch_device(false);
        engine.set_debug_reveal(true);
        engine.tick(FRAME);
        assert_eq!(engine.tier(handle), Some(Tier::Found));
    }

    #[test]
    fn unmount_disposes_all_timers() {
        let mut engine = engine(&["a", "b"]);
        let ha = mount_painted(&mut engine, "a", 100.0, 100.0);
        let _hb = mount_painted(&mut engine, "b", 400.0, 100.0);

        // Bring `a` into range so its pulse timer is live.
        engine.push_input(InputEvent::PointerMove { x: 110.0, y: 110.0 });
        engine.push_input(InputEvent::HoverEnter { marker: ha });
        engine.tick(FRAME);

        engine.unmount(ha);
        assert_eq!(engine.mounted(), 1);
        assert!(engine.tier(ha).is_none());
        // A tick after unmount must not fire stale callbacks or panic.
        engine.tick(FRAME);
        assert_eq!(engine.snapshots().len(), 1);
    }

    #[test]
    fn hint_shows_on_hover_and_clears_on_escape() {
        let mut engine = engine(&["a"]);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);

        engine.push_input(InputEvent::HoverEnter { marker: handle });
        engine.tick(FRAME);
        assert_eq!(engine.snapshots()[0].hint, 1.0);

        engine.push_input(InputEvent::Escape);
        engine.tick(FRAME);
        assert_eq!(engine.snapshots()[0].hint, 0.0);
    }

    #[test]
    fn first_reveal_pulse_fires_and_found_stops_pulsing() {
        let mut engine = engine(&["a"]);
        let handle = mount_painted(&mut engine, "a", 100.0, 100.0);

        engine.push_input(InputEvent::PointerMove { x: 110.0, y: 110.0 });
        engine.tick(FRAME);
        engine.tick(FRAME);
        assert!(
            engine.snapshots()[0].pulse > 0.0,
            "first reveal should pulse"
        );

        activate(&mut engine, handle);
        engine.tick(FRAME);
        assert_eq!(engine.snapshots()[0].pulse, 0.0);
        assert_eq!(engine.tier(handle), Some(Tier::Found));
        assert_eq!(engine.snapshots()[0].opacity, FOUND_OPACITY);
    }

    #[test]
    fn indicator_lifecycle() {
        let mut engine = engine(&["a", "b", "c"]);
        assert!(engine.indicator_visible());

        engine.dismiss_indicator();
        assert!(!engine.indicator_visible());

        // Dismissal is sticky for the session.
        let ha = mount_painted(&mut engine, "a", 0.0, 0.0);
        activate(&mut engine, ha);
        assert!(!engine.indicator_visible());
    }

    #[test]
    fn persisted_ids_outside_the_catalog_never_complete_early() {
        let backend = MemoryBackend::new();
        backend.seed(
            crate::progress::record::STORAGE_KEY,
            r#"{"found":{"old-marker":"2026-01-01T00:00:00Z"}}"#,
        );
        let mut engine = engine_with(&["a", "b"], backend, EngineConfig::default());
        assert_eq!(engine.progress(), 0);

        let ha = mount_painted(&mut engine, "a", 0.0, 0.0);
        activate(&mut engine, ha);
        assert_eq!(engine.progress(), 1);
        assert!(!engine.completed());
        assert_eq!(engine.reward_phase(), RewardPhase::Incomplete);

        let hb = mount_painted(&mut engine, "b", 300.0, 0.0);
        activate(&mut engine, hb);
        assert_eq!(engine.progress(), 2);
        assert!(engine.completed());
    }

    #[test]
    fn programmatic_mark_found_emits_events() {
        let mut engine = engine(&["a", "b"]);
        engine.mark_found("a");
        let events = engine.drain_events();
        assert_eq!(
            events[0],
            EngineEvent::Discovered {
                handle: None,
                id: "a".into(),
                bonus: false
            }
        );
        assert_eq!(events[1], EngineEvent::Progress { found: 1, total: 2 });
        // Repeat is silent.
        engine.mark_found("a");
        assert!(engine.drain_events().is_empty());
    }
}
