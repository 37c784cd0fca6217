pub mod api;
pub mod bridge;
pub mod catalog;
pub mod core;
pub mod input;
pub mod interact;
pub mod progress;
pub mod proximity;
pub mod pulse;
pub mod reward;

// Re-export key types at crate root for convenience
pub use api::engine::{DiscoveryEngine, EngineConfig, SignInPolicy};
pub use api::types::{ActivationSource, EngineEvent, MarkerHandle};
pub use bridge::protocol::{encode_event, EventRecord, MarkerSnapshot, SnapshotBuffer, PROTOCOL_VERSION};
pub use catalog::definition::{MarkerDefinition, MarkerShape, MarkerStyle};
pub use catalog::registry::{CatalogError, MarkerCatalog};
pub use core::clock::{Clock, FixedClock, SystemClock};
pub use core::frame::FrameGate;
pub use input::queue::{InputEvent, InputQueue};
pub use interact::controller::{ControllerTimings, DiscoveryController};
pub use progress::backend::{MemoryBackend, ProgressBackend, StorageError};
pub use progress::record::{ProgressRecord, STORAGE_KEY};
pub use progress::store::{MarkFound, ProgressStore};
pub use proximity::detector::{Classification, PolicyContext, ProximityDetector, Tier};
pub use proximity::rect::Rect;
pub use pulse::scheduler::{PulsePhase, PulseScheduler, PulseTimings};
pub use reward::manager::{RewardManager, RewardPhase, REWARD_MESSAGES};
