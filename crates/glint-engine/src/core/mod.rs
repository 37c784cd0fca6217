pub mod clock;
pub mod frame;
pub mod rng;
