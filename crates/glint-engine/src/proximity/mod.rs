pub mod detector;
pub mod rect;

pub use detector::{classify, Classification, PolicyContext, ProximityDetector, Tier};
pub use rect::Rect;
