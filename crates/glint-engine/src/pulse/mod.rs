pub mod scheduler;

pub use scheduler::{PulsePhase, PulseScheduler, PulseTimings};
