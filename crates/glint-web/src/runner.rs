use glint_engine::{
    encode_event, DiscoveryEngine, EngineConfig, EventRecord, InputEvent, MarkerCatalog,
    MemoryBackend, ProgressBackend, RewardPhase,
};

use crate::clock::JsClock;
use crate::storage::LocalStorageBackend;

/// Owns the engine plus the flat event buffer the UI reads after each tick.
///
/// The page creates one `DiscoveryRunner` via the `#[wasm_bindgen]` exports
/// in `lib.rs` and drives it from a single rAF loop.
pub struct DiscoveryRunner {
    engine: DiscoveryEngine,
    /// Encoded events from the most recent tick, 4 floats per record.
    event_floats: Vec<f32>,
}

impl DiscoveryRunner {
    /// Build a runner from a catalog manifest. Falls back to in-memory
    /// persistence when `localStorage` is unavailable.
    pub fn new(catalog_json: &str, config: EngineConfig) -> Result<Self, String> {
        let catalog = MarkerCatalog::from_json(catalog_json).map_err(|err| err.to_string())?;
        let backend: Box<dyn ProgressBackend> = match LocalStorageBackend::new() {
            Ok(backend) => Box::new(backend),
            Err(err) => {
                log::warn!("localStorage unavailable ({err}), progress will not persist");
                Box::new(MemoryBackend::new())
            }
        };
        let engine = DiscoveryEngine::new(catalog, backend, Box::new(JsClock), config);
        Ok(Self {
            engine,
            event_floats: Vec::with_capacity(32 * EventRecord::FLOATS),
        })
    }

    pub fn engine(&self) -> &DiscoveryEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut DiscoveryEngine {
        &mut self.engine
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.engine.push_input(event);
    }

    /// Run one frame: advance the engine and re-encode its events.
    pub fn tick(&mut self, dt: f32) {
        self.engine.tick(dt);
        self.event_floats.clear();
        for event in self.engine.drain_events() {
            let record = encode_event(&event);
            self.event_floats
                .extend_from_slice(&[record.kind, record.a, record.b, record.c]);
        }
    }

    // -- Buffer reads (pointer + length, for zero-copy JS views) --

    pub fn snapshot_ptr(&self) -> *const f32 {
        self.engine.snapshot_floats().as_ptr()
    }

    pub fn snapshot_len(&self) -> u32 {
        self.engine.snapshot_floats().len() as u32
    }

    pub fn events_ptr(&self) -> *const f32 {
        self.event_floats.as_ptr()
    }

    pub fn events_len(&self) -> u32 {
        self.event_floats.len() as u32
    }

    /// Reward message for the completion notice, once available.
    pub fn reward_message(&self) -> Option<String> {
        match self.engine.reward_phase() {
            RewardPhase::Incomplete => None,
            _ => self.engine.reward_message().map(str::to_owned),
        }
    }
}
