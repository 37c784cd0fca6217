pub mod engine;
pub mod types;

pub use engine::{DiscoveryEngine, EngineConfig, SignInPolicy};
pub use types::{ActivationSource, EngineEvent, MarkerHandle};
