pub mod controller;

pub use controller::{ControllerTimings, DiscoveryController};
